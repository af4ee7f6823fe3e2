use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Store-assigned todo identifier.
///
/// json-server hands out numbers while newer releases use short strings, so
/// both forms are accepted and written back exactly as received.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Num(u64),
    Text(String),
}

impl TodoId {
    /// True when the id carries no usable value (an empty string).
    pub fn is_blank(&self) -> bool {
        match self {
            TodoId::Num(_) => false,
            TodoId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Num(n) => write!(f, "{}", n),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for TodoId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<u64>() {
            Ok(n) => TodoId::Num(n),
            Err(_) => TodoId::Text(s.to_string()),
        })
    }
}

impl From<u64> for TodoId {
    fn from(n: u64) -> Self {
        TodoId::Num(n)
    }
}
