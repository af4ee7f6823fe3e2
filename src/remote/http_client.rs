use super::*;

impl RemoteClient {
    /// Maps a non-2xx response onto the error taxonomy; 2xx passes through.
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        resource: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        tracing::debug!(status = status.as_u16(), resource, "store rejected request");
        Err(Error::from_status(status, resource))
    }

    pub(super) fn send(
        &self,
        req: reqwest::blocking::RequestBuilder,
        resource: &str,
    ) -> Result<reqwest::blocking::Response> {
        let resp = req.send().map_err(Error::Network)?;
        self.ensure_ok(resp, resource)
    }

    pub(super) fn collection_url(&self) -> reqwest::Url {
        self.collection.clone()
    }

    /// The id becomes one percent-encoded path segment, so `a#b` or `a/b`
    /// never escape it.
    pub(super) fn item_url(&self, id: &TodoId) -> reqwest::Url {
        let mut url = self.collection.clone();
        // `new` rejects cannot-be-a-base URLs, so this always applies.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    pub(super) fn item_label(&self, id: &TodoId) -> String {
        format!("/{}/{}", self.resource, id)
    }
}
