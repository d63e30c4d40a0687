use serde_json::Value;
use shici_core::document::Searchable;
use shici_core::paths;
use shici_transport::Method;
use tracing::info;

use crate::error::SearchError;
use crate::mapping::mapping_body;
use crate::searcher::Searcher;

impl Searcher {
    /// Whether index `name` exists.
    ///
    /// An engine "not found" answer means `false`; any other error is
    /// returned as is.
    pub fn index_exists(&self, name: &str) -> Result<bool, SearchError> {
        self.check_index(name)?;
        match self.execute::<Value>(Method::Get, &paths::index(name), None) {
            Ok(_) => Ok(true),
            Err(SearchError::Engine { status: 404, .. }) => {
                info!(index = name, "index does not exist");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Create an empty index.
    pub fn create_index(&self, name: &str) -> Result<(), SearchError> {
        self.check_index(name)?;
        info!(index = name, "creating index");
        self.execute::<Value>(Method::Put, &paths::index(name), None)?;
        Ok(())
    }

    /// Delete an index and every document in it.
    pub fn delete_index(&self, name: &str) -> Result<(), SearchError> {
        self.check_index(name)?;
        info!(index = name, "deleting index");
        self.execute::<Value>(Method::Delete, &paths::index(name), None)?;
        Ok(())
    }

    /// Put the field mapping derived from `T`'s declared fields.
    ///
    /// Re-applying an unchanged mapping is accepted by the engine.
    pub fn create_mapping<T: Searchable>(&self, index: &str) -> Result<(), SearchError> {
        self.check_index(index)?;
        let body = serde_json::to_string(&mapping_body::<T>()?)?;
        info!(index, doc_type = T::TYPE_NAME, "putting mapping");
        self.execute::<Value>(
            Method::Put,
            &paths::mapping(index, T::TYPE_NAME),
            Some(body),
        )?;
        Ok(())
    }
}
