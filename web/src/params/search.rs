use serde::Deserialize;

/// Query parameters accepted by GET /search.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    pub query: String,
    pub limit: Option<u32>,
}
