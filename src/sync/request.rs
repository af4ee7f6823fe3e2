use crate::error::{Error, Result};
use crate::model::{NewTodo, TodoId, TodoItem};
use crate::remote::TodoApi;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Reload { generation: u64 },
    Create(NewTodo),
    Replace { id: TodoId, record: TodoItem },
    Delete { id: TodoId },
}

impl Request {
    pub fn label(&self) -> &'static str {
        match self {
            Request::Reload { .. } => "reload",
            Request::Create(_) => "create",
            Request::Replace { .. } => "replace",
            Request::Delete { .. } => "delete",
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Reloaded {
        generation: u64,
        result: Result<Vec<TodoItem>>,
    },
    Created(Result<TodoItem>),
    Replaced {
        id: TodoId,
        result: Result<TodoItem>,
    },
    Deleted {
        id: TodoId,
        result: Result<()>,
    },
}

impl Outcome {
    /// Failure outcome for a request that never reached the store.
    pub fn failed(req: Request, err: Error) -> Self {
        match req {
            Request::Reload { generation } => Outcome::Reloaded {
                generation,
                result: Err(err),
            },
            Request::Create(_) => Outcome::Created(Err(err)),
            Request::Replace { id, .. } => Outcome::Replaced {
                id,
                result: Err(err),
            },
            Request::Delete { id } => Outcome::Deleted {
                id,
                result: Err(err),
            },
        }
    }
}

/// Runs one request against the store. Never retries.
pub fn execute<A: TodoApi + ?Sized>(api: &A, req: Request) -> Outcome {
    match req {
        Request::Reload { generation } => Outcome::Reloaded {
            generation,
            result: api.list(),
        },
        Request::Create(draft) => Outcome::Created(api.create(&draft)),
        Request::Replace { id, record } => {
            let result = api.replace(&id, &record);
            Outcome::Replaced { id, result }
        }
        Request::Delete { id } => {
            let result = api.delete(&id);
            Outcome::Deleted { id, result }
        }
    }
}
