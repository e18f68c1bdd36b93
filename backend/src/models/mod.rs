pub mod allocation;
pub mod course;
pub mod import;

pub use allocation::{AssignStaffRequest, Batch};
pub use course::{Category, CourseImportRecord, CourseSummary, CourseType};
pub use import::{ImportBatchResult, ImportReport, InvalidRecord};
