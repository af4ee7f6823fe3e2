use std::sync::Arc;

use super::*;
use crate::model::{NewTodo, TodoId};
use crate::test_support::{MemoryApi, todo};

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn requests_run_in_submission_order() {
    let api = Arc::new(MemoryApi::new());
    let worker = SyncWorker::spawn(Arc::clone(&api)).unwrap();

    worker
        .submit(Request::Create(NewTodo::titled("first")))
        .unwrap();
    worker
        .submit(Request::Create(NewTodo::titled("second")))
        .unwrap();
    worker.submit(Request::Reload { generation: 1 }).unwrap();

    let Some(Outcome::Created(Ok(a))) = worker.recv_timeout(WAIT) else {
        panic!("expected first create");
    };
    let Some(Outcome::Created(Ok(b))) = worker.recv_timeout(WAIT) else {
        panic!("expected second create");
    };
    let Some(Outcome::Reloaded { generation, result }) = worker.recv_timeout(WAIT) else {
        panic!("expected reload");
    };

    assert_eq!(a.title, "first");
    assert_eq!(b.title, "second");
    assert_eq!(generation, 1);
    assert_eq!(result.unwrap(), vec![a, b]);
    assert_eq!(api.calls(), vec!["create first", "create second", "list"]);
    assert!(worker.try_outcome().is_none());
}

#[test]
fn failures_come_back_as_outcomes() {
    let api = Arc::new(MemoryApi::with_items(vec![todo(1, "a", false)]));
    let worker = SyncWorker::spawn(Arc::clone(&api)).unwrap();

    worker
        .submit(Request::Delete { id: TodoId::Num(7) })
        .unwrap();
    let Some(Outcome::Deleted { id, result }) = worker.recv_timeout(WAIT) else {
        panic!("expected delete outcome");
    };
    assert_eq!(id, TodoId::Num(7));
    assert!(result.unwrap_err().is_not_found());
}
