use std::sync::Arc;

use super::*;
use crate::error::Error;
use crate::model::TodoItem;
use crate::sync::{NoticeKind, Phase};
use crate::test_support::{MemoryApi, todo};

fn container(api: &Arc<MemoryApi>, reload_after_mutation: bool) -> Container<Arc<MemoryApi>> {
    Container::new(Arc::clone(api), reload_after_mutation)
}

fn titles(items: &[&TodoItem]) -> Vec<String> {
    items.iter().map(|t| t.title.clone()).collect()
}

#[test]
fn buy_milk_lifecycle() {
    let api = Arc::new(MemoryApi::new());
    let mut todos = container(&api, false);

    todos.reload().unwrap();
    assert!(todos.state().visible_items().is_empty());

    todos.add_item("Buy milk").unwrap();
    let visible = todos.state().visible_items();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Buy milk");
    assert!(!visible[0].completed);
    let id = visible[0].id.clone();

    assert!(todos.toggle_item(&id).unwrap());
    assert!(todos.state().find(&id).unwrap().completed);
    let stats = todos.state().stats();
    assert_eq!((stats.total, stats.active, stats.completed), (1, 0, 1));

    assert!(todos.remove_item(&id, |_| true).unwrap());
    assert!(todos.state().visible_items().is_empty());
    assert_eq!(todos.state().phase(), Phase::Idle);

    assert_eq!(
        api.calls(),
        vec!["list", "create Buy milk", "replace 1", "delete 1"]
    );
}

#[test]
fn reload_after_mutation_refetches_every_time() {
    let api = Arc::new(MemoryApi::new());
    let mut todos = container(&api, true);

    todos.reload().unwrap();
    todos.add_item("a").unwrap();
    todos.toggle_item(&TodoId::Num(1)).unwrap();
    assert_eq!(
        api.calls(),
        vec!["list", "create a", "list", "replace 1", "list"]
    );
    assert_eq!(todos.state().items(), api.items().as_slice());
}

#[test]
fn each_add_grows_the_snapshot_by_one() {
    let api = Arc::new(MemoryApi::new());
    let mut todos = container(&api, true);
    todos.reload().unwrap();

    for (n, title) in ["one", "two", "three", "four"].into_iter().enumerate() {
        todos.add_item(title).unwrap();
        let stats = todos.state().stats();
        assert_eq!(todos.state().items().len(), n + 1);
        assert_eq!(stats.total, todos.state().items().len());
        assert_eq!(stats.active + stats.completed, stats.total);
    }
    assert_eq!(
        titles(&todos.state().visible_items()),
        vec!["one", "two", "three", "four"]
    );
}

#[test]
fn invalid_titles_and_unknown_ids_send_nothing() {
    let api = Arc::new(MemoryApi::with_items(vec![todo(1, "a", false)]));
    let mut todos = container(&api, false);
    todos.reload().unwrap();

    assert!(matches!(todos.add_item(""), Err(Error::Validation(_))));
    assert!(matches!(todos.add_item("   "), Err(Error::Validation(_))));
    assert!(!todos.toggle_item(&TodoId::Num(42)).unwrap());
    assert!(!todos.remove_item(&TodoId::Num(42), |_| true).unwrap());

    assert_eq!(api.calls(), vec!["list"]);
    assert_eq!(todos.state().items().len(), 1);
}

#[test]
fn declined_confirmation_keeps_the_todo() {
    let api = Arc::new(MemoryApi::with_items(vec![todo(1, "a", false)]));
    let mut todos = container(&api, false);
    todos.reload().unwrap();

    let mut asked = None;
    let removed = todos
        .remove_item(&TodoId::Num(1), |pending| {
            asked = Some(pending.title.clone());
            false
        })
        .unwrap();
    assert!(!removed);
    assert_eq!(asked.as_deref(), Some("a"));
    assert!(todos.state().pending_delete().is_none());
    assert_eq!(api.calls(), vec!["list"]);
}

#[test]
fn two_step_delete_through_tokens() {
    let api = Arc::new(MemoryApi::with_items(vec![todo(1, "a", false)]));
    let mut todos = container(&api, false);
    todos.reload().unwrap();

    let pending = todos.request_delete(&TodoId::Num(1)).unwrap();
    assert!(todos.cancel(pending.token));
    assert!(!todos.confirm(pending.token).unwrap());

    let pending = todos.request_delete(&TodoId::Num(1)).unwrap();
    assert!(todos.confirm(pending.token).unwrap());
    assert!(api.items().is_empty());
}

#[test]
fn store_failures_surface_and_keep_the_snapshot() {
    let api = Arc::new(MemoryApi::with_items(vec![todo(1, "a", false)]));
    let mut todos = container(&api, false);
    todos.reload().unwrap();

    api.fail_next(500);
    let err = todos.reload().unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(todos.state().items().len(), 1);

    api.fail_next(500);
    let err = todos.add_item("b").unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(todos.state().items().len(), 1);
    assert_eq!(todos.state().notice().unwrap().kind, NoticeKind::Error);
}

#[test]
fn not_found_is_distinguishable_from_server_errors() {
    let api = Arc::new(MemoryApi::with_items(vec![todo(1, "a", false)]));
    let todos = container(&api, false);

    let missing = todos.api().get(&TodoId::Num(99)).unwrap_err();
    assert!(missing.is_not_found());
    assert_eq!(missing.status(), Some(404));

    api.fail_next(500);
    let broken = todos.api().get(&TodoId::Num(1)).unwrap_err();
    assert!(!broken.is_not_found());
    assert_eq!(broken.status(), Some(500));
}

/// Store whose next call after every successful mutation answers 500.
struct ReloadFailsAfterWrite(MemoryApi);

impl TodoApi for ReloadFailsAfterWrite {
    fn list(&self) -> crate::error::Result<Vec<TodoItem>> {
        self.0.list()
    }

    fn get(&self, id: &TodoId) -> crate::error::Result<TodoItem> {
        self.0.get(id)
    }

    fn create(&self, draft: &crate::model::NewTodo) -> crate::error::Result<TodoItem> {
        let item = self.0.create(draft)?;
        self.0.fail_next(500);
        Ok(item)
    }

    fn replace(&self, id: &TodoId, record: &TodoItem) -> crate::error::Result<TodoItem> {
        let item = self.0.replace(id, record)?;
        self.0.fail_next(500);
        Ok(item)
    }

    fn delete(&self, id: &TodoId) -> crate::error::Result<()> {
        self.0.delete(id)?;
        self.0.fail_next(500);
        Ok(())
    }
}

#[test]
fn failed_follow_up_reload_does_not_fail_the_mutation() {
    let mut todos = Container::new(ReloadFailsAfterWrite(MemoryApi::new()), true);
    todos.reload().unwrap();

    todos.add_item("Buy milk").unwrap();
    assert_eq!(todos.state().items(), &[todo(1, "Buy milk", false)]);
    assert_eq!(todos.api().0.items(), vec![todo(1, "Buy milk", false)]);
    let notice = todos.state().notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.starts_with("Could not refresh todos"));
    assert_eq!(todos.state().phase(), Phase::Idle);

    let id = TodoId::Num(1);
    assert!(todos.toggle_item(&id).unwrap());
    assert!(todos.state().find(&id).unwrap().completed);

    assert!(todos.remove_item(&id, |_| true).unwrap());
    assert!(todos.state().items().is_empty());
    assert_eq!(
        todos.api().0.calls(),
        vec!["list", "create Buy milk", "list", "replace 1", "list", "delete 1", "list"]
    );
}
