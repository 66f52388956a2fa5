pub mod assignment;
pub mod gradebook;
pub mod lesson_plan;
pub mod message;
pub mod student;
pub mod timestamp;

pub use assignment::{
    AssignRequest, Assignment, AssignmentStatus, GRADE_LEVELS, GenerateRequest, Question, SUBJECTS,
    StudentAssignment, SubmissionRequest, SubmissionResult,
};
pub use gradebook::{GradebookRecord, GradedAssignment};
pub use lesson_plan::LessonPlan;
pub use message::{Contact, ContactKind, Conversation, Message, NewMessageRequest};
pub use student::{NewStudentRequest, Student};
