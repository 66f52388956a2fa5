use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::client::ClassroomApi;
use crate::error::AppError;
use crate::filters;
use crate::grading::{self, ClassroomStats};
use crate::models::{Assignment, GradebookRecord, Student, StudentAssignment};

const RECENT_ACTIVITY_LIMIT: usize = 5;
const UPCOMING_LIMIT: usize = 3;
const RECENT_GRADES_LIMIT: usize = 4;

pub struct GradebookService {
    api: Arc<dyn ClassroomApi>,
    records: Vec<GradebookRecord>,
}

impl GradebookService {
    pub fn new(api: Arc<dyn ClassroomApi>) -> Self {
        Self {
            api,
            records: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<&[GradebookRecord], AppError> {
        match self.api.gradebook().await {
            Ok(records) => {
                info!("Loaded gradebook for {} students", records.len());
                self.records = records;
                Ok(&self.records)
            }
            Err(e) => {
                warn!("Failed to load gradebook: {}", e);
                Err(e)
            }
        }
    }

    pub fn records(&self) -> &[GradebookRecord] {
        &self.records
    }

    pub fn stats(&self) -> ClassroomStats {
        grading::classroom_stats(&self.records)
    }

    pub fn filtered(&self, term: &str) -> Vec<&GradebookRecord> {
        filters::filter_gradebook(&self.records, term)
    }
}

/// A submission shown in the teacher's recent activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub student_id: String,
    pub student_name: String,
    pub assignment_title: String,
    pub score: Option<f64>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherOverview {
    pub total_students: usize,
    pub total_assignments: usize,
    pub completed_assignments: usize,
    pub average: u32,
    pub recent_activity: Vec<Activity>,
}

impl TeacherOverview {
    pub fn build(
        students: &[Student],
        assignments: &[Assignment],
        gradebook: &[GradebookRecord],
    ) -> Self {
        let stats = grading::classroom_stats(gradebook);

        let mut recent_activity: Vec<Activity> = gradebook
            .iter()
            .flat_map(|record| {
                record.assignments.iter().filter_map(move |a| {
                    a.submitted_at.map(|submitted_at| Activity {
                        student_id: record.student.id.clone(),
                        student_name: record.student.full_name(),
                        assignment_title: a.assignment_title.clone(),
                        score: a.score,
                        submitted_at,
                    })
                })
            })
            .collect();
        recent_activity.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

        Self {
            total_students: students.len(),
            total_assignments: assignments.len(),
            completed_assignments: stats.total_submissions,
            average: stats.average,
            recent_activity,
        }
    }

    /// Loads students, assignments and the gradebook in turn; any failure aborts the load.
    pub async fn load(api: &dyn ClassroomApi) -> Result<Self, AppError> {
        let students = api.list_students().await?;
        let assignments = api.list_assignments().await?;
        let gradebook = api.gradebook().await?;
        Ok(Self::build(&students, &assignments, &gradebook))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentOverview {
    pub total_assignments: usize,
    pub completed_assignments: usize,
    pub pending_assignments: usize,
    pub average: u32,
    pub upcoming: Vec<StudentAssignment>,
    pub recent_grades: Vec<StudentAssignment>,
}

impl StudentOverview {
    pub fn build(assignments: &[StudentAssignment]) -> Self {
        let completed = assignments.iter().filter(|a| a.completed).count();
        let summary = grading::summarize_assignments(assignments);

        let upcoming = assignments
            .iter()
            .filter(|a| !a.completed)
            .take(UPCOMING_LIMIT)
            .cloned()
            .collect();

        let recent_grades = filters::graded_assignments(assignments, "")
            .into_iter()
            .take(RECENT_GRADES_LIMIT)
            .cloned()
            .collect();

        Self {
            total_assignments: assignments.len(),
            completed_assignments: completed,
            pending_assignments: assignments.len() - completed,
            average: summary.average,
            upcoming,
            recent_grades,
        }
    }
}
