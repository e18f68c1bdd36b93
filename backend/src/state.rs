use std::sync::Arc;
use std::time::Duration;

use crate::client::CourseApi;
use crate::services::{AllocationService, ImportService};

#[derive(Clone)]
pub struct AppState {
    pub imports: Arc<ImportService>,
    pub allocations: Arc<AllocationService>,
}

impl AppState {
    pub fn new(api: Arc<dyn CourseApi>, allocation_timeout: Duration) -> Self {
        Self {
            imports: Arc::new(ImportService::new(api.clone())),
            allocations: Arc::new(AllocationService::new(api, allocation_timeout)),
        }
    }
}
