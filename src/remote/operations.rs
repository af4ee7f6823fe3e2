//! Collection and item requests against the record store.

use super::*;

impl TodoApi for RemoteClient {
    fn list(&self) -> Result<Vec<TodoItem>> {
        let label = format!("/{}", self.resource);
        tracing::debug!(method = "GET", path = %label, "list todos");
        let resp = self.send(self.client.get(self.collection_url()), &label)?;
        let items: Vec<TodoItem> = resp.json().map_err(Error::Decode)?;
        Ok(items)
    }

    fn get(&self, id: &TodoId) -> Result<TodoItem> {
        let label = self.item_label(id);
        tracing::debug!(method = "GET", path = %label, "get todo");
        let resp = self.send(self.client.get(self.item_url(id)), &label)?;
        let item: TodoItem = resp.json().map_err(Error::Decode)?;
        Ok(item)
    }

    fn create(&self, draft: &NewTodo) -> Result<TodoItem> {
        let label = format!("/{}", self.resource);
        tracing::debug!(method = "POST", path = %label, title = %draft.title, "create todo");
        let resp = self.send(self.client.post(self.collection_url()).json(draft), &label)?;
        let item: TodoItem = resp.json().map_err(Error::Decode)?;
        Ok(item)
    }

    fn replace(&self, id: &TodoId, record: &TodoItem) -> Result<TodoItem> {
        let label = self.item_label(id);
        tracing::debug!(method = "PUT", path = %label, completed = record.completed, "replace todo");
        let resp = self.send(self.client.put(self.item_url(id)).json(record), &label)?;
        let item: TodoItem = resp.json().map_err(Error::Decode)?;
        Ok(item)
    }

    fn delete(&self, id: &TodoId) -> Result<()> {
        let label = self.item_label(id);
        tracing::debug!(method = "DELETE", path = %label, "delete todo");
        // 200 carries the removed record (or `{}`), 204 nothing; neither is needed.
        self.send(self.client.delete(self.item_url(id)), &label)?;
        Ok(())
    }
}
