use std::future::Future;

use crate::core::record::Record;
use crate::error::ExportError;

pub mod paged;

/// Query parameters handed to a fetch collaborator, a JSON object map so the
/// caller's filter shape passes through untouched.
pub type FetchParams = serde_json::Map<String, serde_json::Value>;

/// The remote-acquisition seam of the engine.
///
/// The orchestrator only depends on this contract: resolve with the ordered
/// records (an empty sequence means "no data"), or reject with an error.
/// Transport, authentication and pagination mechanics stay behind it.
pub trait RecordFetcher {
    fn fetch(
        &self,
        params: &FetchParams,
    ) -> impl Future<Output = Result<Vec<Record>, ExportError>>;
}

/// Placeholder fetcher for exports whose records are already in memory.
#[derive(Default)]
pub struct NoFetcher;

impl RecordFetcher for NoFetcher {
    async fn fetch(&self, _params: &FetchParams) -> Result<Vec<Record>, ExportError> {
        Err(ExportError::Fetch("no fetcher configured".to_string()))
    }
}
