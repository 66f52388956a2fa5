use crate::error::AppError;

use super::AnswerCollector;

/// Placeholder for a question with no recorded answer in a dense submission.
pub const UNANSWERED: i64 = -1;

/// Turn collected answers into the ordered sequence the submit endpoint expects.
///
/// Every index in `0..question_count` must be answered. Keys outside that range do not
/// count towards completeness, so a stray index can never stand in for a missing one.
pub fn validate_submission(
    collector: &AnswerCollector,
    question_count: usize,
) -> Result<Vec<i64>, AppError> {
    let answered = (0..question_count)
        .filter(|i| collector.is_answered(*i))
        .count();

    if answered < question_count {
        return Err(AppError::IncompleteSubmission {
            answered,
            total: question_count,
        });
    }

    Ok(dense_answers(collector, question_count))
}

/// Dense answers of length `question_count`, with [`UNANSWERED`] in any gap.
pub fn dense_answers(collector: &AnswerCollector, question_count: usize) -> Vec<i64> {
    (0..question_count)
        .map(|i| {
            collector
                .selected(i)
                .map(|option| option as i64)
                .unwrap_or(UNANSWERED)
        })
        .collect()
}
