use std::sync::Arc;

use crate::extract::encoding::TextDecoder;
use crate::fetch::PageFetcher;

/// Shared application state passed to all handlers.
/// The fetcher and decoder are trait objects so tests can swap in stubs.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub decoder: Arc<dyn TextDecoder>,
}
