use crate::error::Result;
use crate::model::{Filter, TodoId};
use crate::remote::TodoApi;

use super::request::{Request, execute};
use super::state::{PendingConfirmation, TodoState};

/// Runs the synchronizer's requests inline against `api`.
pub struct Container<A> {
    api: A,
    state: TodoState,
}

impl<A: TodoApi> Container<A> {
    pub fn new(api: A, reload_after_mutation: bool) -> Self {
        Self {
            api,
            state: TodoState::new(reload_after_mutation),
        }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replaces the snapshot with the store's list. On failure the previous
    /// snapshot stays and the error notice is set.
    pub fn reload(&mut self) -> Result<()> {
        let req = self.state.reload();
        self.drive(req)
    }

    pub fn add_item(&mut self, title: &str) -> Result<()> {
        let req = self.state.add_item(title)?;
        self.drive(req)
    }

    /// Returns `false` without a request when `id` is not in the snapshot.
    pub fn toggle_item(&mut self, id: &TodoId) -> Result<bool> {
        let Some(req) = self.state.toggle_item(id) else {
            return Ok(false);
        };
        self.drive(req)?;
        Ok(true)
    }

    pub fn request_delete(&mut self, id: &TodoId) -> Option<PendingConfirmation> {
        self.state.request_delete(id)
    }

    pub fn confirm(&mut self, token: u64) -> Result<bool> {
        let Some(req) = self.state.confirm(token) else {
            return Ok(false);
        };
        self.drive(req)?;
        Ok(true)
    }

    pub fn cancel(&mut self, token: u64) -> bool {
        self.state.cancel(token)
    }

    /// Delete behind a synchronous yes/no gate.
    pub fn remove_item(
        &mut self,
        id: &TodoId,
        confirm: impl FnOnce(&PendingConfirmation) -> bool,
    ) -> Result<bool> {
        let Some(pending) = self.state.request_delete(id) else {
            return Ok(false);
        };
        if confirm(&pending) {
            self.confirm(pending.token)
        } else {
            self.state.cancel(pending.token);
            Ok(false)
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.state.set_filter(filter);
    }

    /// Runs `req` and any follow-up reloads. Only the failure of `req` itself
    /// is returned; once a mutation has applied, a failed follow-up reload is
    /// left in the notice.
    fn drive(&mut self, req: Request) -> Result<()> {
        let applied = self.state.apply(execute(&self.api, req));
        if let Some(err) = applied.error {
            return Err(err);
        }
        let mut next = applied.follow_up;
        while let Some(req) = next.take() {
            let applied = self.state.apply(execute(&self.api, req));
            if let Some(err) = applied.error {
                tracing::warn!(error = %err, "follow-up reload failed");
                break;
            }
            next = applied.follow_up;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/sync/container_tests.rs"]
mod tests;
