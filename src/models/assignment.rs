use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl Question {
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_answer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub grade_level: String,
    pub topic: String,
    #[serde(default)]
    pub reading_passage: Option<String>,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Lifecycle of one assignment handed to one student. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    Assigned,
    Completed,
}

/// An assignment as seen by the student it was assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAssignment {
    pub student_assignment_id: String,
    pub assignment: Assignment,
    pub completed: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, with = "timestamp::option")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub assigned_at: DateTime<Utc>,
}

impl StudentAssignment {
    pub fn status(&self) -> AssignmentStatus {
        if self.completed {
            AssignmentStatus::Completed
        } else {
            AssignmentStatus::Assigned
        }
    }

    /// Score of a completed assignment, if the server recorded one.
    pub fn graded_score(&self) -> Option<f64> {
        if self.completed { self.score } else { None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub subject: String,
    pub grade_level: String,
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    pub assignment_id: String,
    pub student_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub student_assignment_id: String,
    pub answers: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub score: f64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub correct_answers: Option<usize>,
    #[serde(default)]
    pub total_questions: Option<usize>,
}

pub const SUBJECTS: [&str; 5] = ["Math", "Reading", "Science", "History", "English"];

pub const GRADE_LEVELS: [&str; 8] = [
    "1st Grade",
    "2nd Grade",
    "3rd Grade",
    "4th Grade",
    "5th Grade",
    "6th Grade",
    "7th Grade",
    "8th Grade",
];
