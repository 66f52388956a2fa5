pub mod collector;
pub mod score;
pub mod validator;

pub use collector::AnswerCollector;
pub use score::{
    ClassroomStats, GradeTier, LetterGrade, ScoreSummary, classroom_stats, performance_message,
    round_percent, student_average, summarize, summarize_assignments,
};
pub use validator::{UNANSWERED, dense_answers, validate_submission};
