//! Terminal and command-line client for a REST todo list.
//!
//! [`remote`] talks to the record store, [`sync`] owns the list snapshot and
//! its request cycle, and [`tui`] draws it.

pub mod error;
pub mod model;
pub mod remote;
pub mod sync;
pub mod tui;

mod tui_shell;

#[cfg(test)]
#[path = "tests/support/mod.rs"]
mod test_support;
