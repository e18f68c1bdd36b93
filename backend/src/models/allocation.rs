use serde::{Deserialize, Serialize};

/// A section of a course taught by at most one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    #[serde(default)]
    pub staff_id: Option<i64>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStaffRequest {
    pub staff_id: Option<i64>,
}
