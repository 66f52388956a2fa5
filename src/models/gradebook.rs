use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Student;
use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedAssignment {
    pub assignment_title: String,
    pub subject: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, with = "timestamp::option")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// One row of the teacher's gradebook: a student and their submitted work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookRecord {
    pub student: Student,
    pub assignments: Vec<GradedAssignment>,
}
