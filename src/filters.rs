use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::error::AppError;
use crate::models::{Conversation, GradebookRecord, Student, StudentAssignment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn accepts(self, assignment: &StudentAssignment) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !assignment.completed,
            StatusFilter::Completed => assignment.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(AppError::Validation(format!("Unknown status filter: {}", other))),
        }
    }
}

/// Case-insensitive substring match against any of `fields`. An empty term matches everything.
pub fn matches_term(term: &str, fields: &[&str]) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Search by title, subject or topic; pending work first, then newest assignment first.
pub fn filter_student_assignments<'a>(
    assignments: &'a [StudentAssignment],
    term: &str,
    status: StatusFilter,
) -> Vec<&'a StudentAssignment> {
    let mut out: Vec<&StudentAssignment> = assignments
        .iter()
        .filter(|a| status.accepts(a))
        .filter(|a| {
            matches_term(
                term,
                &[&a.assignment.title, &a.assignment.subject, &a.assignment.topic],
            )
        })
        .collect();

    out.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.assigned_at.cmp(&a.assigned_at))
    });
    out
}

/// Completed assignments with a score, newest submission first.
pub fn graded_assignments<'a>(
    assignments: &'a [StudentAssignment],
    term: &str,
) -> Vec<&'a StudentAssignment> {
    let mut out: Vec<&StudentAssignment> = assignments
        .iter()
        .filter(|a| a.graded_score().is_some())
        .filter(|a| matches_term(term, &[&a.assignment.title, &a.assignment.subject]))
        .collect();

    out.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    out
}

pub fn filter_students<'a>(students: &'a [Student], term: &str) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|s| {
            let haystack = format!("{} {} {}", s.first_name, s.last_name, s.username);
            matches_term(term, &[&haystack])
        })
        .collect()
}

pub fn filter_gradebook<'a>(
    records: &'a [GradebookRecord],
    term: &str,
) -> Vec<&'a GradebookRecord> {
    records
        .iter()
        .filter(|r| matches_term(term, &[&r.student.full_name()]))
        .collect()
}

pub fn filter_conversations<'a>(
    conversations: &'a [Conversation],
    term: &str,
) -> Vec<&'a Conversation> {
    conversations
        .iter()
        .filter(|c| matches_term(term, &[&c.contact.name]))
        .collect()
}

/// Students whose account was created within the last `days` days.
pub fn recently_added(students: &[Student], now: DateTime<Utc>, days: i64) -> usize {
    let cutoff = now - Duration::days(days);
    students.iter().filter(|s| s.created_at > cutoff).count()
}
