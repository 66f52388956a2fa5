use std::sync::Arc;

use tracing::{info, warn};

use crate::client::ClassroomApi;
use crate::error::AppError;
use crate::forms::{StudentSelection, Validate};
use crate::models::{Assignment, GenerateRequest, LessonPlan};
use crate::services::Written;

/// Generated assignments and lesson plans owned by the teacher.
pub struct AuthoringService {
    api: Arc<dyn ClassroomApi>,
    assignments: Vec<Assignment>,
    lesson_plans: Vec<LessonPlan>,
}

impl AuthoringService {
    pub fn new(api: Arc<dyn ClassroomApi>) -> Self {
        Self {
            api,
            assignments: Vec::new(),
            lesson_plans: Vec::new(),
        }
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn lesson_plans(&self) -> &[LessonPlan] {
        &self.lesson_plans
    }

    pub async fn refresh_assignments(&mut self) -> Result<&[Assignment], AppError> {
        match self.api.list_assignments().await {
            Ok(assignments) => {
                self.assignments = assignments;
                Ok(&self.assignments)
            }
            Err(e) => {
                warn!("Failed to load assignments: {}", e);
                Err(e)
            }
        }
    }

    pub async fn refresh_lesson_plans(&mut self) -> Result<&[LessonPlan], AppError> {
        match self.api.list_lesson_plans().await {
            Ok(plans) => {
                self.lesson_plans = plans;
                Ok(&self.lesson_plans)
            }
            Err(e) => {
                warn!("Failed to load lesson plans: {}", e);
                Err(e)
            }
        }
    }

    pub async fn generate_assignment(
        &mut self,
        request: &GenerateRequest,
    ) -> Result<Written<Assignment>, AppError> {
        request.validate()?;
        info!(
            "Generating {} assignment on {} for {}",
            request.subject, request.topic, request.grade_level
        );
        let assignment = self.api.generate_assignment(request).await.map_err(|e| {
            warn!("Assignment generation failed: {}", e);
            e
        })?;
        let refreshed = self.refresh_assignments().await.is_ok();
        Ok(Written {
            value: assignment,
            refreshed,
        })
    }

    /// Assign to the selected students and return how many were assigned.
    pub async fn assign(
        &self,
        assignment_id: &str,
        selection: &StudentSelection,
    ) -> Result<usize, AppError> {
        let request = selection.to_request(assignment_id);
        request.validate()?;
        self.api.assign_assignment(&request).await.map_err(|e| {
            warn!("Failed to assign {}: {}", assignment_id, e);
            e
        })?;
        info!(
            "Assigned {} to {} student(s)",
            assignment_id,
            request.student_ids.len()
        );
        Ok(request.student_ids.len())
    }

    pub async fn generate_lesson_plan(
        &mut self,
        request: &GenerateRequest,
    ) -> Result<Written<LessonPlan>, AppError> {
        request.validate()?;
        let plan = self.api.generate_lesson_plan(request).await.map_err(|e| {
            warn!("Lesson plan generation failed: {}", e);
            e
        })?;
        info!("Generated lesson plan {}", plan.title);
        let refreshed = self.refresh_lesson_plans().await.is_ok();
        Ok(Written {
            value: plan,
            refreshed,
        })
    }
}
