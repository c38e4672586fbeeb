use std::sync::{Arc, Mutex};

use crate::error::ScopeError;
use crate::results::ResultSet;
use crate::source::{ConnectionSource, ScopeConnection};
use crate::types::SqlValue;

/// Which mock operations should fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureInjection {
    pub acquire: bool,
    pub begin: bool,
    pub commit: bool,
    pub rollback: bool,
    pub release: bool,
    pub select: bool,
    pub dml: bool,
}

/// Shared, ordered log of the operations a mock connection performed.
pub type OpLog = Arc<Mutex<Vec<String>>>;

fn record(ops: &OpLog, entry: impl Into<String>) {
    let mut guard = match ops.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.push(entry.into());
}

/// A connection source whose connections follow a script.
///
/// Every acquired connection shares the source's operation log, so a test
/// can inspect ordering after the scope has been consumed.
#[derive(Debug, Clone)]
pub struct MockSource {
    failures: FailureInjection,
    select_result: ResultSet,
    dml_affected: u64,
    ops: OpLog,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            failures: FailureInjection::default(),
            select_result: ResultSet::new(Vec::new()),
            dml_affected: 1,
            ops: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_failures(failures: FailureInjection) -> Self {
        Self {
            failures,
            ..Self::new()
        }
    }

    /// Script the result set every select returns.
    pub fn set_select_result(&mut self, result: ResultSet) {
        self.select_result = result;
    }

    /// Script the affected-row count every DML statement returns.
    pub fn set_dml_affected(&mut self, affected: u64) {
        self.dml_affected = affected;
    }

    /// Handle on the shared operation log.
    #[must_use]
    pub fn ops(&self) -> OpLog {
        Arc::clone(&self.ops)
    }

    /// Snapshot of the operations recorded so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<String> {
        match self.ops.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ConnectionSource for MockSource {
    type Conn = MockConnection;

    fn acquire(&self) -> Result<MockConnection, ScopeError> {
        if self.failures.acquire {
            record(&self.ops, "acquire:fail");
            return Err(ScopeError::AcquisitionFailure(
                "injected acquire failure".into(),
            ));
        }
        record(&self.ops, "acquire");
        Ok(MockConnection {
            failures: self.failures,
            select_result: self.select_result.clone(),
            dml_affected: self.dml_affected,
            auto_commit: true,
            ops: Arc::clone(&self.ops),
        })
    }
}

/// A scripted [`ScopeConnection`].
#[derive(Debug)]
pub struct MockConnection {
    failures: FailureInjection,
    select_result: ResultSet,
    dml_affected: u64,
    auto_commit: bool,
    ops: OpLog,
}

impl MockConnection {
    /// Handle on the shared operation log.
    #[must_use]
    pub fn ops(&self) -> OpLog {
        Arc::clone(&self.ops)
    }
}

impl ScopeConnection for MockConnection {
    fn set_auto_commit(&mut self, enabled: bool) -> Result<(), ScopeError> {
        if !enabled && self.failures.begin {
            record(&self.ops, "auto_commit:off:fail");
            return Err(ScopeError::ExecutionFailure("injected begin failure".into()));
        }
        record(
            &self.ops,
            if enabled {
                "auto_commit:on"
            } else {
                "auto_commit:off"
            },
        );
        self.auto_commit = enabled;
        Ok(())
    }

    fn auto_commit(&self) -> bool {
        self.auto_commit
    }

    fn commit(&mut self) -> Result<(), ScopeError> {
        if self.failures.commit {
            record(&self.ops, "commit:fail");
            return Err(ScopeError::ExecutionFailure(
                "injected commit failure".into(),
            ));
        }
        record(&self.ops, "commit");
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), ScopeError> {
        if self.failures.rollback {
            record(&self.ops, "rollback:fail");
            return Err(ScopeError::ExecutionFailure(
                "injected rollback failure".into(),
            ));
        }
        record(&self.ops, "rollback");
        Ok(())
    }

    fn execute_select(
        &mut self,
        sql: &str,
        _params: &[SqlValue],
    ) -> Result<ResultSet, ScopeError> {
        if self.failures.select {
            record(&self.ops, format!("select:fail:{sql}"));
            return Err(ScopeError::ExecutionFailure(
                "injected select failure".into(),
            ));
        }
        record(&self.ops, format!("select:{sql}"));
        Ok(self.select_result.clone())
    }

    fn execute_dml(&mut self, sql: &str, _params: &[SqlValue]) -> Result<u64, ScopeError> {
        if self.failures.dml {
            record(&self.ops, format!("dml:fail:{sql}"));
            return Err(ScopeError::ExecutionFailure("injected dml failure".into()));
        }
        record(&self.ops, format!("dml:{sql}"));
        Ok(self.dml_affected)
    }

    fn execute_batch(&mut self, sql: &str) -> Result<(), ScopeError> {
        record(&self.ops, format!("batch:{sql}"));
        Ok(())
    }

    fn release(self) -> Result<(), ScopeError> {
        if self.failures.release {
            record(&self.ops, "release:fail");
            return Err(ScopeError::ExecutionFailure(
                "injected release failure".into(),
            ));
        }
        record(&self.ops, "release");
        Ok(())
    }
}
