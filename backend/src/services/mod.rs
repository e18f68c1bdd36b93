pub mod allocation_service;
pub mod import_service;

pub use allocation_service::AllocationService;
pub use import_service::ImportService;
