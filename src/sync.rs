//! Todo list synchronization: the authoritative snapshot, its derived views,
//! and the request cycle that keeps it in step with the record store.
//!
//! [`TodoState`] is a plain single-writer state machine: user intents turn
//! into [`Request`]s, and the [`Outcome`] of each request is applied back.
//! Two drivers execute the requests: [`Container`] runs them inline (command
//! line, tests) and [`SyncWorker`] runs them on a background queue so the
//! terminal shell never blocks on the network.

mod container;
mod request;
mod state;
mod worker;

pub use self::container::Container;
pub use self::request::{Outcome, Request, execute};
pub use self::state::{
    Applied, EMPTY_TITLE_NOTICE, Notice, NoticeKind, PendingConfirmation, Phase, TodoState,
};
pub use self::worker::SyncWorker;
