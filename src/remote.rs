use std::time::Duration;

use crate::error::{Error, Result};
use crate::model::{ClientConfig, NewTodo, TodoId, TodoItem};

mod http_client;
mod operations;

/// CRUD surface of the record store's todo collection.
///
/// Every call is a single request/response: no retries, no caching. Failures
/// are returned to the caller unchanged.
pub trait TodoApi: Send {
    fn list(&self) -> Result<Vec<TodoItem>>;
    fn get(&self, id: &TodoId) -> Result<TodoItem>;
    fn create(&self, draft: &NewTodo) -> Result<TodoItem>;
    fn replace(&self, id: &TodoId, record: &TodoItem) -> Result<TodoItem>;
    fn delete(&self, id: &TodoId) -> Result<()>;
}

impl<T: TodoApi + Sync> TodoApi for std::sync::Arc<T> {
    fn list(&self) -> Result<Vec<TodoItem>> {
        (**self).list()
    }

    fn get(&self, id: &TodoId) -> Result<TodoItem> {
        (**self).get(id)
    }

    fn create(&self, draft: &NewTodo) -> Result<TodoItem> {
        (**self).create(draft)
    }

    fn replace(&self, id: &TodoId, record: &TodoItem) -> Result<TodoItem> {
        (**self).replace(id, record)
    }

    fn delete(&self, id: &TodoId) -> Result<()> {
        (**self).delete(id)
    }
}

pub struct RemoteClient {
    collection: reqwest::Url,
    resource: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let config = config.clone().validated()?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("checklist/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| Error::Config(format!("build http client: {}", e)))?;
        let collection =
            reqwest::Url::parse(&format!("{}/{}", config.base_url, config.resource))
                .map_err(|e| Error::Config(format!("invalid base_url: {}", e)))?;
        if collection.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base_url cannot hold a path: {}",
                config.base_url
            )));
        }
        Ok(Self {
            collection,
            resource: config.resource,
            client,
        })
    }
}
