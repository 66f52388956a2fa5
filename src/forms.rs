//! Dialog input checks run before anything is sent to the server.

use crate::error::AppError;
use crate::models::{AssignRequest, GenerateRequest, NewMessageRequest, NewStudentRequest, Student};

const FILL_ALL_FIELDS: &str = "Please fill in all fields";

pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

fn all_filled(fields: &[&str]) -> Result<(), AppError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::Validation(FILL_ALL_FIELDS.to_string()));
    }
    Ok(())
}

impl Validate for GenerateRequest {
    fn validate(&self) -> Result<(), AppError> {
        all_filled(&[&self.subject, &self.grade_level, &self.topic])
    }
}

impl Validate for NewStudentRequest {
    fn validate(&self) -> Result<(), AppError> {
        all_filled(&[
            &self.first_name,
            &self.last_name,
            &self.username,
            &self.password,
        ])
    }
}

impl Validate for AssignRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.assignment_id.trim().is_empty() {
            return Err(AppError::Validation("No assignment selected".to_string()));
        }
        if self.student_ids.is_empty() {
            return Err(AppError::Validation(
                "Please select at least one student".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for NewMessageRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.recipient_id.trim().is_empty() {
            return Err(AppError::Validation("No recipient selected".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::Validation("Message cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Students picked in the assign dialog, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentSelection {
    selected: Vec<String>,
}

impl StudentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, student_id: &str) {
        if let Some(pos) = self.selected.iter().position(|id| id == student_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(student_id.to_string());
        }
    }

    /// Select everyone, or clear the selection when everyone is already selected.
    pub fn toggle_all(&mut self, students: &[Student]) {
        let everyone_selected = students.iter().all(|s| self.is_selected(&s.id));
        if everyone_selected && self.selected.len() == students.len() {
            self.selected.clear();
        } else {
            self.selected = students.iter().map(|s| s.id.clone()).collect();
        }
    }

    pub fn is_selected(&self, student_id: &str) -> bool {
        self.selected.iter().any(|id| id == student_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn to_request(&self, assignment_id: &str) -> AssignRequest {
        AssignRequest {
            assignment_id: assignment_id.to_string(),
            student_ids: self.selected.clone(),
        }
    }
}
