//! Application State

use std::sync::Arc;

use helios::ReportCatalog;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-only view of the reports directory
    pub catalog: Arc<ReportCatalog>,
}

impl AppState {
    pub fn new(catalog: ReportCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}
