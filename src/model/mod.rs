mod config;
mod ids;
mod todo;

pub use self::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_RESOURCE};
pub use self::ids::TodoId;
pub use self::todo::{Filter, NewTodo, Stats, TodoItem};

#[cfg(test)]
#[path = "../tests/model/model_tests.rs"]
mod tests;
