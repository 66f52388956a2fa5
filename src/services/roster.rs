use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::client::ClassroomApi;
use crate::error::AppError;
use crate::filters;
use crate::forms::Validate;
use crate::models::{NewStudentRequest, Student};
use crate::services::Written;

/// The teacher's student accounts.
pub struct RosterService {
    api: Arc<dyn ClassroomApi>,
    students: Vec<Student>,
}

impl RosterService {
    pub fn new(api: Arc<dyn ClassroomApi>) -> Self {
        Self {
            api,
            students: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<&[Student], AppError> {
        match self.api.list_students().await {
            Ok(students) => {
                info!("Loaded {} students", students.len());
                self.students = students;
                Ok(&self.students)
            }
            Err(e) => {
                warn!("Failed to load students: {}", e);
                Err(e)
            }
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn filtered(&self, term: &str) -> Vec<&Student> {
        filters::filter_students(&self.students, term)
    }

    /// Accounts created in the last 7 and 30 days.
    pub fn recently_added(&self, now: DateTime<Utc>) -> (usize, usize) {
        (
            filters::recently_added(&self.students, now, 7),
            filters::recently_added(&self.students, now, 30),
        )
    }

    /// Create the account, then re-fetch the roster. A failed re-fetch does not undo the create.
    pub async fn create(
        &mut self,
        request: NewStudentRequest,
    ) -> Result<Written<Student>, AppError> {
        request.validate()?;
        let student = self.api.create_student(&request).await.map_err(|e| {
            warn!("Failed to create student {}: {}", request.username, e);
            e
        })?;
        info!("Created student {}", student.username);
        let refreshed = self.refresh().await.is_ok();
        Ok(Written {
            value: student,
            refreshed,
        })
    }

    pub async fn delete(&mut self, student_id: &str) -> Result<Written<()>, AppError> {
        self.api.delete_student(student_id).await.map_err(|e| {
            warn!("Failed to delete student {}: {}", student_id, e);
            e
        })?;
        info!("Deleted student {}", student_id);
        let refreshed = self.refresh().await.is_ok();
        Ok(Written {
            value: (),
            refreshed,
        })
    }
}
