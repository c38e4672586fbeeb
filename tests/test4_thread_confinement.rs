use sql_scope::prelude::*;
use sql_scope::test_utils::MockSource;

#[test]
fn operations_fail_from_a_foreign_thread() -> Result<(), Box<dyn std::error::Error>> {
    let source = MockSource::new();
    let ops = source.ops();
    let mut scope = ConnectionScope::open_transactional(&source)?;

    let handle = std::thread::spawn(move || {
        let err = scope.execute(|_client| Ok(())).unwrap_err();
        assert!(matches!(err, ScopeError::ThreadViolation { .. }));
        let err = scope.commit().unwrap_err();
        assert!(matches!(err, ScopeError::ThreadViolation { .. }));
        let err = scope.rollback().unwrap_err();
        assert!(matches!(err, ScopeError::ThreadViolation { .. }));
        scope
    });
    let mut scope = handle.join().expect("worker thread panicked");

    // scope state is untouched: back on the owner thread everything works
    assert!(!scope.is_completed());
    scope.commit()?;
    scope.close()?;

    let recorded = ops.lock().unwrap().clone();
    assert_eq!(recorded, ["acquire", "auto_commit:off", "commit", "release"]);
    Ok(())
}

#[test]
fn close_from_foreign_thread_still_releases() -> Result<(), Box<dyn std::error::Error>> {
    let source = MockSource::new();
    let ops = source.ops();
    let scope = ConnectionScope::open_transactional(&source)?;

    std::thread::spawn(move || {
        let err = scope.close().unwrap_err();
        assert!(matches!(err, ScopeError::ThreadViolation { .. }));
        // the consumed scope is dropped here; the backstop takes over
    })
    .join()
    .expect("worker thread panicked");

    let recorded = ops.lock().unwrap().clone();
    assert_eq!(recorded, ["acquire", "auto_commit:off", "rollback", "release"]);
    Ok(())
}
