#![cfg(feature = "sqlite")]

use sql_scope::prelude::*;
use sql_scope::test_utils::{FailureInjection, MockSource};

#[test]
fn updates_apply_immediately_without_transaction() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("test3.db").to_string_lossy().into_owned();
    let source = SqliteSource::open(db.as_str());

    let mut scope = ConnectionScope::open(&source)?;
    assert!(!scope.is_transactional());
    scope.execute(|client| {
        client.batch("CREATE TABLE account (id INTEGER PRIMARY KEY, balance INTEGER);")
    })?;

    // two sequential updates, each committed as it runs
    scope.execute(|client| {
        client.update(
            "INSERT INTO account (id, balance) VALUES (?1, ?2);",
            &[SqlValue::Int(1), SqlValue::Int(100)],
        )
    })?;
    scope.execute(|client| {
        client.update(
            "UPDATE account SET balance = balance + ?1 WHERE id = ?2;",
            &[SqlValue::Int(50), SqlValue::Int(1)],
        )
    })?;

    // the connection never left auto-commit mode
    scope.execute(|client| {
        assert!(client.connection().auto_commit());
        Ok(())
    })?;

    let err = scope.commit().unwrap_err();
    assert!(matches!(err, ScopeError::InvalidState(_)));
    let err = scope.rollback().unwrap_err();
    assert!(matches!(err, ScopeError::InvalidState(_)));

    scope.close()?;

    // both updates survived the close with no commit ever issued
    let mut scope = ConnectionScope::open(&source)?;
    let balances = scope.execute(|client| {
        client.query(
            "SELECT balance FROM account WHERE id = ?1;",
            |row: &Row| {
                row.get("balance")
                    .and_then(SqlValue::as_int)
                    .ok_or_else(|| ScopeError::ExecutionFailure("balance missing".into()))
            },
            &[SqlValue::Int(1)],
        )
    })?;
    assert_eq!(balances.as_rows(), Some(&[150_i64][..]));
    scope.close()?;
    Ok(())
}

#[test]
fn failure_propagates_without_rollback() -> Result<(), Box<dyn std::error::Error>> {
    let source = MockSource::with_failures(FailureInjection {
        dml: true,
        ..Default::default()
    });
    let ops = source.ops();

    let mut scope = ConnectionScope::open(&source)?;
    let err = scope
        .execute(|client| client.update("INSERT INTO t (id) VALUES (1);", &[]))
        .unwrap_err();
    assert!(matches!(err.primary(), ScopeError::ExecutionFailure(_)));
    assert!(err.secondary().is_none());
    assert!(!scope.is_completed());
    scope.close()?;

    let recorded = ops.lock().unwrap().clone();
    assert!(recorded.iter().all(|op| !op.starts_with("rollback")));
    assert_eq!(recorded.iter().filter(|op| *op == "release").count(), 1);
    Ok(())
}
