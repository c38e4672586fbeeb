use sql_scope::prelude::*;
use sql_scope::test_utils::{FailureInjection, MockSource};

#[test]
fn failed_rollback_is_attached_as_secondary() -> Result<(), Box<dyn std::error::Error>> {
    let source = MockSource::with_failures(FailureInjection {
        rollback: true,
        ..Default::default()
    });
    let ops = source.ops();

    let mut scope = ConnectionScope::open_transactional(&source)?;
    let err = scope
        .execute::<(), _>(|_client| Err(ScopeError::ExecutionFailure("boom".into())))
        .unwrap_err();

    // the original failure is primary; the rollback failure rides along
    assert!(matches!(err.primary(), ScopeError::ExecutionFailure(msg) if msg == "boom"));
    assert!(matches!(
        err.secondary(),
        Some(ScopeError::RollbackFailure(_))
    ));
    assert!(scope.is_completed());

    // later failures no longer attempt a rollback
    let err = scope
        .execute::<(), _>(|_client| Err(ScopeError::ExecutionFailure("again".into())))
        .unwrap_err();
    assert!(err.secondary().is_none());

    // completed scope: close releases without another rollback
    scope.close()?;

    let recorded = ops.lock().unwrap().clone();
    assert_eq!(
        recorded
            .iter()
            .filter(|op| op.starts_with("rollback"))
            .count(),
        1
    );
    assert_eq!(recorded.last().map(String::as_str), Some("release"));
    Ok(())
}

#[test]
fn close_reports_rollback_failure_before_release_failure()
-> Result<(), Box<dyn std::error::Error>> {
    let source = MockSource::with_failures(FailureInjection {
        rollback: true,
        release: true,
        ..Default::default()
    });
    let ops = source.ops();

    let scope = ConnectionScope::open_transactional(&source)?;
    let err = scope.close().unwrap_err();

    assert!(
        matches!(err.primary(), ScopeError::CloseFailure(msg) if msg.contains("rollback on close"))
    );
    assert!(
        matches!(err.secondary(), Some(ScopeError::CloseFailure(msg)) if msg.contains("release"))
    );

    // release was still attempted after the failed rollback
    let recorded = ops.lock().unwrap().clone();
    assert_eq!(
        recorded,
        ["acquire", "auto_commit:off", "rollback:fail", "release:fail"]
    );
    Ok(())
}

#[test]
fn release_failure_alone_is_a_close_failure() -> Result<(), Box<dyn std::error::Error>> {
    let source = MockSource::with_failures(FailureInjection {
        release: true,
        ..Default::default()
    });

    let mut scope = ConnectionScope::open_transactional(&source)?;
    scope.commit()?;
    let err = scope.close().unwrap_err();
    assert!(matches!(err, ScopeError::CloseFailure(_)));
    assert!(err.secondary().is_none());
    Ok(())
}

#[test]
fn failed_commit_leaves_scope_active_for_rollback() -> Result<(), Box<dyn std::error::Error>> {
    let source = MockSource::with_failures(FailureInjection {
        commit: true,
        ..Default::default()
    });
    let ops = source.ops();

    let mut scope = ConnectionScope::open_transactional(&source)?;
    let err = scope.commit().unwrap_err();
    assert!(matches!(err, ScopeError::CommitFailure(_)));
    assert!(!scope.is_completed());

    // the caller decides what happens after a failed commit
    scope.rollback()?;
    assert!(scope.is_completed());
    scope.close()?;

    let recorded = ops.lock().unwrap().clone();
    assert_eq!(
        recorded,
        [
            "acquire",
            "auto_commit:off",
            "commit:fail",
            "rollback",
            "release"
        ]
    );
    Ok(())
}

#[test]
fn acquisition_failures_surface_at_open() {
    let source = MockSource::with_failures(FailureInjection {
        acquire: true,
        ..Default::default()
    });
    let err = ConnectionScope::open_transactional(&source).unwrap_err();
    assert!(matches!(err, ScopeError::AcquisitionFailure(_)));
}

#[test]
fn failed_auto_commit_toggle_releases_the_connection() {
    let source = MockSource::with_failures(FailureInjection {
        begin: true,
        ..Default::default()
    });
    let ops = source.ops();

    let err = ConnectionScope::open_transactional(&source).unwrap_err();
    assert!(matches!(err, ScopeError::AcquisitionFailure(_)));

    let recorded = ops.lock().unwrap().clone();
    assert_eq!(recorded, ["acquire", "auto_commit:off:fail", "release"]);
}

#[test]
fn happy_path_runs_operations_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let source = MockSource::new();
    let ops = source.ops();

    let mut scope = ConnectionScope::open_transactional(&source)?;
    let affected =
        scope.execute(|client| client.update("INSERT INTO t (id) VALUES (?1);", &[]))?;
    assert_eq!(affected.rows_affected(), Some(1));
    scope.commit()?;
    scope.close()?;

    let recorded = ops.lock().unwrap().clone();
    assert_eq!(
        recorded,
        [
            "acquire",
            "auto_commit:off",
            "dml:INSERT INTO t (id) VALUES (?1);",
            "commit",
            "release"
        ]
    );
    Ok(())
}
