use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::client::ClassroomApi;
use crate::error::AppError;
use crate::filters::{self, StatusFilter};
use crate::grading::{self, AnswerCollector, ScoreSummary};
use crate::models::{AssignmentStatus, StudentAssignment, SubmissionRequest, SubmissionResult};

/// A student's assignment list, as last fetched from the server.
pub struct AssignmentService {
    api: Arc<dyn ClassroomApi>,
    assignments: Vec<StudentAssignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignmentCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl AssignmentService {
    pub fn new(api: Arc<dyn ClassroomApi>) -> Self {
        Self {
            api,
            assignments: Vec::new(),
        }
    }

    /// Re-fetch the list. On failure the previously loaded list is kept as is.
    pub async fn refresh(&mut self) -> Result<&[StudentAssignment], AppError> {
        match self.api.list_student_assignments().await {
            Ok(assignments) => {
                info!("Loaded {} assignments", assignments.len());
                self.assignments = assignments;
                Ok(&self.assignments)
            }
            Err(e) => {
                warn!("Failed to load assignments: {}", e);
                Err(e)
            }
        }
    }

    pub fn assignments(&self) -> &[StudentAssignment] {
        &self.assignments
    }

    pub fn find(&self, student_assignment_id: &str) -> Result<&StudentAssignment, AppError> {
        self.assignments
            .iter()
            .find(|a| a.student_assignment_id == student_assignment_id)
            .ok_or_else(|| AppError::NotFound(format!("assignment {}", student_assignment_id)))
    }

    pub fn filtered(&self, term: &str, status: StatusFilter) -> Vec<&StudentAssignment> {
        filters::filter_student_assignments(&self.assignments, term, status)
    }

    pub fn grades(&self, term: &str) -> Vec<&StudentAssignment> {
        filters::graded_assignments(&self.assignments, term)
    }

    pub fn counts(&self) -> AssignmentCounts {
        let completed = self.assignments.iter().filter(|a| a.completed).count();
        AssignmentCounts {
            total: self.assignments.len(),
            pending: self.assignments.len() - completed,
            completed,
        }
    }

    pub fn summary(&self) -> ScoreSummary {
        grading::summarize_assignments(&self.assignments)
    }

    /// Fetch the latest list and start a session on one assignment.
    pub async fn open(
        &mut self,
        student_assignment_id: &str,
    ) -> Result<AssignmentSession, AppError> {
        self.refresh().await?;
        let record = self.find(student_assignment_id)?.clone();
        Ok(AssignmentSession::new(self.api.clone(), record))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub result: SubmissionResult,
    /// False when the post-submit re-fetch failed and the record is only marked completed.
    pub refreshed: bool,
}

/// One student working through one assignment.
pub struct AssignmentSession {
    api: Arc<dyn ClassroomApi>,
    record: StudentAssignment,
    answers: AnswerCollector,
}

impl AssignmentSession {
    pub fn new(api: Arc<dyn ClassroomApi>, record: StudentAssignment) -> Self {
        Self {
            api,
            record,
            answers: AnswerCollector::new(),
        }
    }

    pub fn record(&self) -> &StudentAssignment {
        &self.record
    }

    pub fn status(&self) -> AssignmentStatus {
        self.record.status()
    }

    pub fn answers(&self) -> &AnswerCollector {
        &self.answers
    }

    pub fn question_count(&self) -> usize {
        self.record.assignment.question_count()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.answered_count()
    }

    pub fn select(&mut self, question_index: usize, option_index: usize) -> Result<(), AppError> {
        if self.status() == AssignmentStatus::Completed {
            return Err(AppError::AlreadyCompleted);
        }
        self.answers.select(question_index, option_index);
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.status() == AssignmentStatus::Assigned
            && grading::validate_submission(&self.answers, self.question_count()).is_ok()
    }

    /// Submit once, then re-fetch so the record reflects what the server stored.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, AppError> {
        if self.status() == AssignmentStatus::Completed {
            return Err(AppError::AlreadyCompleted);
        }

        let answers = grading::validate_submission(&self.answers, self.question_count())?;
        let request = SubmissionRequest {
            student_assignment_id: self.record.student_assignment_id.clone(),
            answers,
        };

        let result = self.api.submit_assignment(&request).await.map_err(|e| {
            warn!(
                "Submit failed for {}: {}",
                self.record.student_assignment_id, e
            );
            e
        })?;
        info!(
            "Submitted {} (score {})",
            self.record.student_assignment_id,
            grading::round_percent(result.score)
        );

        self.answers.clear();
        let refreshed = self.reload().await;
        // The server accepted the submission, so this record is terminal either way.
        self.record.completed = true;

        Ok(SubmissionOutcome { result, refreshed })
    }

    async fn reload(&mut self) -> bool {
        let id = self.record.student_assignment_id.clone();
        match self.api.list_student_assignments().await {
            Ok(list) => match list.into_iter().find(|a| a.student_assignment_id == id) {
                Some(fresh) => {
                    self.record = fresh;
                    true
                }
                None => {
                    warn!("Assignment {} missing after submit", id);
                    false
                }
            },
            Err(e) => {
                warn!("Failed to refresh after submit: {}", e);
                false
            }
        }
    }
}
