use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Filter, TodoItem};
use crate::sync::{NoticeKind, Outcome, Phase, Request, SyncWorker, TodoState};

use super::draft::DraftForm;
use super::modal::{self, Modal};
use super::view::{RenderCtx, View};
use super::views::TodoListView;

mod event_loop;
mod render;

pub(super) use self::event_loop::run_loop;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Focus {
    Form,
    List,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Form => Focus::List,
            Focus::List => Focus::Form,
        }
    }
}

pub(super) struct App {
    pub(super) state: TodoState,
    worker: SyncWorker,

    pub(super) focus: Focus,
    pub(super) draft: DraftForm,
    pub(super) list: TodoListView,
    pub(super) modal: Option<Modal>,

    pub(super) quit: bool,
}

impl App {
    pub(super) fn new(worker: SyncWorker, reload_after_mutation: bool) -> Self {
        Self {
            state: TodoState::new(reload_after_mutation),
            worker,
            focus: Focus::Form,
            draft: DraftForm::default(),
            list: TodoListView::default(),
            modal: None,
            quit: false,
        }
    }

    fn dispatch(&mut self, req: Request) {
        if let Err(req) = self.worker.submit(req) {
            let outcome = Outcome::failed(req, crate::error::Error::Disconnected);
            self.apply(outcome);
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        let applied = self.state.apply(outcome);
        if let Some(next) = applied.follow_up {
            self.dispatch(next);
        }
        let visible = self.state.visible_items();
        self.list.sync_selection(&visible);
    }

    /// Applies every outcome the worker has finished so far.
    pub(super) fn pump(&mut self) {
        while let Some(outcome) = self.worker.try_outcome() {
            self.apply(outcome);
        }
    }

    /// Blocks until the worker has nothing outstanding or `timeout` passes.
    #[cfg(test)]
    pub(super) fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        while self.state.phase() != Phase::Idle {
            let left = deadline.saturating_duration_since(std::time::Instant::now());
            if left.is_zero() {
                return false;
            }
            if let Some(outcome) = self.worker.recv_timeout(left) {
                self.apply(outcome);
            }
        }
        true
    }

    pub(super) fn reload(&mut self) {
        let req = self.state.reload();
        self.dispatch(req);
    }

    pub(super) fn submit_draft(&mut self) {
        let Some(draft) = self.draft.submit() else {
            return;
        };
        if let Ok(req) = self.state.add_item(&draft.title) {
            self.dispatch(req);
        }
    }

    fn visible(&self) -> Vec<&TodoItem> {
        self.state.visible_items()
    }

    pub(super) fn toggle_selected(&mut self) {
        let Some(id) = self.list.selected_id(&self.visible()) else {
            return;
        };
        if let Some(req) = self.state.toggle_item(&id) {
            self.dispatch(req);
        }
    }

    pub(super) fn delete_selected(&mut self) {
        let Some(id) = self.list.selected_id(&self.visible()) else {
            return;
        };
        if let Some(pending) = self.state.request_delete(&id) {
            self.modal = Some(Modal::confirm_delete(pending.token, &pending.title));
        }
    }

    pub(super) fn confirm_delete(&mut self, token: u64) {
        if let Some(req) = self.state.confirm(token) {
            self.dispatch(req);
        }
    }

    pub(super) fn cancel_delete(&mut self, token: u64) {
        self.state.cancel(token);
    }

    pub(super) fn set_filter(&mut self, filter: Filter) {
        self.state.set_filter(filter);
        let visible = self.state.visible_items();
        self.list.sync_selection(&visible);
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        if self.modal.is_some() {
            modal::handle_modal_key(self, key);
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                return;
            }
            KeyCode::F(5) => {
                self.reload();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_draft(),
            KeyCode::Esc => {
                if self.draft.input.buf.is_empty() {
                    self.focus = Focus::List;
                } else {
                    self.draft.input.clear();
                    self.draft.edited();
                }
            }
            KeyCode::Down => self.focus = Focus::List,
            KeyCode::Backspace => {
                self.draft.input.backspace();
                self.draft.edited();
            }
            KeyCode::Delete => {
                self.draft.input.delete();
                self.draft.edited();
            }
            KeyCode::Left => self.draft.input.move_left(),
            KeyCode::Right => self.draft.input.move_right(),
            KeyCode::Home => self.draft.input.home(),
            KeyCode::End => self.draft.input.end(),
            KeyCode::Char(c) => {
                self.draft.input.insert_char(c);
                self.draft.edited();
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                if self.list.selected == 0 {
                    self.focus = Focus::Form;
                } else {
                    self.list.move_up();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible().len();
                self.list.move_down(len);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('a') | KeyCode::Char('i') => self.focus = Focus::Form,
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Active),
            KeyCode::Char('3') => self.set_filter(Filter::Completed),
            KeyCode::Char('f') => {
                let next = self.state.filter().next();
                self.set_filter(next);
            }
            KeyCode::Char('x') => self.state.dismiss_notice(),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
