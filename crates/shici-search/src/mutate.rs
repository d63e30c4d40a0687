use serde_json::Value;
use shici_core::document::Searchable;
use shici_core::paths;
use shici_transport::Method;
use tracing::info;

use crate::error::SearchError;
use crate::response::check_response;
use crate::searcher::Searcher;

impl Searcher {
    /// Index `doc` under its own id, replacing any existing version.
    pub fn create_document<T: Searchable>(&self, index: &str, doc: &T) -> Result<(), SearchError> {
        let id = doc.id();
        self.check_index(index)?;
        self.check_id(id)?;
        let body = serde_json::to_string(doc)?;
        info!(index, doc_type = T::TYPE_NAME, id, "indexing document");
        self.execute::<Value>(
            Method::Put,
            &paths::document(index, T::TYPE_NAME, id),
            Some(body),
        )?;
        Ok(())
    }

    /// Fetch the document with `id`.
    pub fn get_document<T: Searchable>(&self, index: &str, id: &str) -> Result<T, SearchError> {
        self.check_index(index)?;
        self.check_id(id)?;
        let decoder = self.decoders().document_decoder::<T>()?;
        let resp = self.send(Method::Get, &paths::document(index, T::TYPE_NAME, id), None)?;
        check_response(&resp)?;
        decoder.decode(&resp.body, id)
    }

    /// Delete the document with `id`.
    pub fn delete_document<T: Searchable>(&self, index: &str, id: &str) -> Result<(), SearchError> {
        self.check_index(index)?;
        self.check_id(id)?;
        info!(index, doc_type = T::TYPE_NAME, id, "deleting document");
        self.execute::<Value>(
            Method::Delete,
            &paths::document(index, T::TYPE_NAME, id),
            None,
        )?;
        Ok(())
    }
}
