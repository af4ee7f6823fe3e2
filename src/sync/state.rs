use std::collections::HashMap;

use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::model::{Filter, NewTodo, Stats, TodoId, TodoItem};

use super::request::{Outcome, Request};

pub const EMPTY_TITLE_NOTICE: &str = "Please enter a todo title.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    Error,
}

/// User-visible banner message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Requesting,
    Reloading,
}

/// First half of a delete: nothing is sent until the token is confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub token: u64,
    pub id: TodoId,
    pub title: String,
}

/// What applying an outcome produced.
#[derive(Debug, Default)]
pub struct Applied {
    /// Request to run next (a reload, when reloading after mutations).
    pub follow_up: Option<Request>,
    /// The failure, already turned into a notice.
    pub error: Option<Error>,
}

#[derive(Clone, Copy, Debug)]
struct QueuedToggle {
    target: bool,
    outstanding: usize,
}

#[derive(Debug)]
pub struct TodoState {
    snapshot: Vec<TodoItem>,
    filter: Filter,
    notice: Option<Notice>,
    reload_after_mutation: bool,

    issued_generation: u64,
    applied_generation: u64,
    reloads_in_flight: usize,
    mutations_in_flight: usize,
    queued_toggles: HashMap<TodoId, QueuedToggle>,

    pending_delete: Option<PendingConfirmation>,
    next_token: u64,

    synced_at: Option<OffsetDateTime>,
}

impl TodoState {
    pub fn new(reload_after_mutation: bool) -> Self {
        Self {
            snapshot: Vec::new(),
            filter: Filter::All,
            notice: None,
            reload_after_mutation,
            issued_generation: 0,
            applied_generation: 0,
            reloads_in_flight: 0,
            mutations_in_flight: 0,
            queued_toggles: HashMap::new(),
            pending_delete: None,
            next_token: 1,
            synced_at: None,
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.snapshot
    }

    pub fn find(&self, id: &TodoId) -> Option<&TodoItem> {
        self.snapshot.iter().find(|t| &t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Snapshot items passing the current filter, in snapshot order.
    pub fn visible_items(&self) -> Vec<&TodoItem> {
        self.snapshot
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    pub fn stats(&self) -> Stats {
        Stats::of(&self.snapshot)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn synced_at(&self) -> Option<OffsetDateTime> {
        self.synced_at
    }

    pub fn phase(&self) -> Phase {
        if self.mutations_in_flight > 0 {
            Phase::Requesting
        } else if self.reloads_in_flight > 0 {
            Phase::Reloading
        } else {
            Phase::Idle
        }
    }

    pub fn pending_delete(&self) -> Option<&PendingConfirmation> {
        self.pending_delete.as_ref()
    }

    pub fn reload(&mut self) -> Request {
        self.issued_generation += 1;
        self.reloads_in_flight += 1;
        Request::Reload {
            generation: self.issued_generation,
        }
    }

    pub fn add_item(&mut self, title: &str) -> Result<Request> {
        let title = title.trim();
        if title.is_empty() {
            self.notice = Some(Notice::new(NoticeKind::Validation, EMPTY_TITLE_NOTICE));
            return Err(Error::Validation(EMPTY_TITLE_NOTICE.to_string()));
        }
        self.mutations_in_flight += 1;
        Ok(Request::Create(NewTodo::titled(title)))
    }

    /// Flips `completed` for `id`. Unknown ids produce no request.
    ///
    /// The flip is computed from the newest queued target for the id when one
    /// exists, so back-to-back toggles alternate instead of both writing the
    /// same stale value.
    pub fn toggle_item(&mut self, id: &TodoId) -> Option<Request> {
        let item = self.find(id)?;
        let current = self
            .queued_toggles
            .get(id)
            .map(|q| q.target)
            .unwrap_or(item.completed);
        let record = item.with_completed(!current);

        let entry = self.queued_toggles.entry(id.clone()).or_insert(QueuedToggle {
            target: !current,
            outstanding: 0,
        });
        entry.target = !current;
        entry.outstanding += 1;

        self.mutations_in_flight += 1;
        Some(Request::Replace {
            id: id.clone(),
            record,
        })
    }

    /// Opens a confirmation for deleting `id`, replacing any earlier one.
    pub fn request_delete(&mut self, id: &TodoId) -> Option<PendingConfirmation> {
        let item = self.find(id)?;
        let pending = PendingConfirmation {
            token: self.next_token,
            id: item.id.clone(),
            title: item.title.clone(),
        };
        self.next_token += 1;
        self.pending_delete = Some(pending.clone());
        Some(pending)
    }

    pub fn confirm(&mut self, token: u64) -> Option<Request> {
        if self.pending_delete.as_ref().map(|p| p.token) != Some(token) {
            return None;
        }
        let pending = self.pending_delete.take()?;
        self.mutations_in_flight += 1;
        Some(Request::Delete { id: pending.id })
    }

    pub fn cancel(&mut self, token: u64) -> bool {
        if self.pending_delete.as_ref().map(|p| p.token) == Some(token) {
            self.pending_delete = None;
            return true;
        }
        false
    }

    pub fn apply(&mut self, outcome: Outcome) -> Applied {
        match outcome {
            Outcome::Reloaded { generation, result } => {
                self.reloads_in_flight = self.reloads_in_flight.saturating_sub(1);
                self.apply_reload(generation, result)
            }
            Outcome::Created(result) => {
                self.mutations_in_flight = self.mutations_in_flight.saturating_sub(1);
                match result {
                    Ok(item) => {
                        tracing::info!(id = %item.id, title = %item.title, "todo created");
                        self.upsert(item);
                        self.after_mutation()
                    }
                    Err(err) => self.fail("Could not add todo", err),
                }
            }
            Outcome::Replaced { id, result } => {
                self.mutations_in_flight = self.mutations_in_flight.saturating_sub(1);
                self.settle_toggle(&id);
                match result {
                    Ok(item) => {
                        tracing::info!(id = %item.id, completed = item.completed, "todo updated");
                        self.upsert(item);
                        self.after_mutation()
                    }
                    Err(err) => self.fail("Could not update todo", err),
                }
            }
            Outcome::Deleted { id, result } => {
                self.mutations_in_flight = self.mutations_in_flight.saturating_sub(1);
                match result {
                    Ok(()) => {
                        tracing::info!(id = %id, "todo deleted");
                        self.snapshot.retain(|t| t.id != id);
                        self.after_mutation()
                    }
                    // Already gone on the store; the outcome the user asked for holds.
                    Err(err) if err.is_not_found() => {
                        tracing::info!(id = %id, "todo already deleted");
                        self.snapshot.retain(|t| t.id != id);
                        self.after_mutation()
                    }
                    Err(err) => self.fail("Could not delete todo", err),
                }
            }
        }
    }

    fn apply_reload(&mut self, generation: u64, result: Result<Vec<TodoItem>>) -> Applied {
        if generation < self.applied_generation {
            tracing::debug!(
                generation,
                applied = self.applied_generation,
                "discarding stale reload"
            );
            return Applied::default();
        }
        match result {
            Ok(items) => {
                tracing::debug!(generation, count = items.len(), "snapshot reloaded");
                self.snapshot = items;
                self.applied_generation = generation;
                self.synced_at = Some(OffsetDateTime::now_utc());
                if self
                    .notice
                    .as_ref()
                    .is_some_and(|n| n.kind == NoticeKind::Error)
                {
                    self.notice = None;
                }
                Applied::default()
            }
            Err(err) => self.fail("Could not refresh todos", err),
        }
    }

    fn after_mutation(&mut self) -> Applied {
        self.notice = None;
        self.synced_at = Some(OffsetDateTime::now_utc());
        let follow_up = if self.reload_after_mutation {
            Some(self.reload())
        } else {
            None
        };
        Applied {
            follow_up,
            error: None,
        }
    }

    fn fail(&mut self, what: &str, err: Error) -> Applied {
        tracing::warn!(error = %err, "{}", what);
        self.notice = Some(Notice::new(
            NoticeKind::Error,
            format!("{}: {}", what, err),
        ));
        Applied {
            follow_up: None,
            error: Some(err),
        }
    }

    fn settle_toggle(&mut self, id: &TodoId) {
        if let Some(q) = self.queued_toggles.get_mut(id) {
            q.outstanding = q.outstanding.saturating_sub(1);
            if q.outstanding == 0 {
                self.queued_toggles.remove(id);
            }
        }
    }

    fn upsert(&mut self, item: TodoItem) {
        match self.snapshot.iter_mut().find(|t| t.id == item.id) {
            Some(slot) => *slot = item,
            None => self.snapshot.push(item),
        }
    }
}

#[cfg(test)]
#[path = "../tests/sync/state_tests.rs"]
mod tests;
