use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Curriculum category a course is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Hsmc,
    Bsc,
    Esc,
    Pec,
    Oec,
    Eec,
    Pcc,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Hsmc,
        Category::Bsc,
        Category::Esc,
        Category::Pec,
        Category::Oec,
        Category::Eec,
        Category::Pcc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hsmc => "HSMC",
            Category::Bsc => "BSC",
            Category::Esc => "ESC",
            Category::Pec => "PEC",
            Category::Oec => "OEC",
            Category::Eec => "EEC",
            Category::Pcc => "PCC",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseType {
    #[serde(rename = "THEORY")]
    Theory,
    #[serde(rename = "PRACTICAL")]
    Practical,
    #[serde(rename = "INTEGRATED")]
    Integrated,
    #[serde(rename = "EXPERIENTIAL LEARNING")]
    ExperientialLearning,
}

impl CourseType {
    pub const ALL: [CourseType; 4] = [
        CourseType::Theory,
        CourseType::Practical,
        CourseType::Integrated,
        CourseType::ExperientialLearning,
    ];

    /// Classifies a course from its L/T/P/E hours.
    ///
    /// Experiential hours win over everything else; practical hours make the
    /// course practical, or integrated when any lecture or tutorial hours
    /// accompany them.
    pub fn derive(lecture: i64, tutorial: i64, practical: i64, experiential: i64) -> Self {
        if experiential > 0 {
            CourseType::ExperientialLearning
        } else if practical > 0 {
            if lecture > 0 || tutorial > 0 {
                CourseType::Integrated
            } else {
                CourseType::Practical
            }
        } else {
            CourseType::Theory
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::Theory => "THEORY",
            CourseType::Practical => "PRACTICAL",
            CourseType::Integrated => "INTEGRATED",
            CourseType::ExperientialLearning => "EXPERIENTIAL LEARNING",
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One course as read from an import sheet.
///
/// `None` in a numeric field means the cell did not hold a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseImportRecord {
    pub course_code: String,
    pub course_title: String,
    pub category: String,
    pub lecture_hours: i64,
    pub tutorial_hours: i64,
    pub practical_hours: i64,
    pub experiential_hours: i64,
    pub total_contact_periods: Option<i64>,
    pub credits: Option<i64>,
    pub min_mark: Option<i64>,
    pub max_mark: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester_number: Option<i64>,
    #[serde(rename = "type")]
    pub course_type: CourseType,
}

impl CourseImportRecord {
    /// L + T + P + E, or `None` when the sum does not fit in an `i64`.
    pub fn hours_total(&self) -> Option<i64> {
        self.lecture_hours
            .checked_add(self.tutorial_hours)?
            .checked_add(self.practical_hours)?
            .checked_add(self.experiential_hours)
    }
}

/// Course as listed by the backend after an import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: i64,
    pub course_code: String,
    pub course_title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub course_type: Option<String>,
}
