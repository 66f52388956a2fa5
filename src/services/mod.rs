pub mod assignments;
pub mod authoring;
pub mod gradebook;
pub mod messaging;
pub mod roster;

use serde::Serialize;

pub use assignments::{AssignmentCounts, AssignmentService, AssignmentSession, SubmissionOutcome};
pub use authoring::AuthoringService;
pub use gradebook::{Activity, GradebookService, StudentOverview, TeacherOverview};
pub use messaging::{MessagingService, latest_message, message_time_label, summarize_conversation};
pub use roster::RosterService;

/// A write the server accepted. `refreshed` is false when the follow-up re-fetch failed and
/// the cached list still shows the state from before the write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Written<T> {
    pub value: T,
    pub refreshed: bool,
}
