use std::collections::BTreeMap;

/// In-progress answers for one assignment, keyed by question index.
///
/// Indices are not range-checked here; [`validate_submission`](super::validate_submission)
/// does that when the answers are turned into a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerCollector {
    answers: BTreeMap<usize, usize>,
}

impl AnswerCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selected option for a question, replacing any earlier choice.
    pub fn select(&mut self, question_index: usize, option_index: usize) {
        self.answers.insert(question_index, option_index);
    }

    pub fn selected(&self, question_index: usize) -> Option<usize> {
        self.answers.get(&question_index).copied()
    }

    pub fn is_answered(&self, question_index: usize) -> bool {
        self.answers.contains_key(&question_index)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

impl FromIterator<(usize, usize)> for AnswerCollector {
    fn from_iter<T: IntoIterator<Item = (usize, usize)>>(iter: T) -> Self {
        let mut collector = Self::new();
        for (question, option) in iter {
            collector.select(question, option);
        }
        collector
    }
}
