use std::fmt;

use serde::Serialize;

use crate::models::{GradebookRecord, GradedAssignment, StudentAssignment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Lower bounds are inclusive: 90 is an A, 89.99 a B.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            LetterGrade::A
        } else if score >= 80.0 {
            LetterGrade::B
        } else if score >= 70.0 {
            LetterGrade::C
        } else if score >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    pub fn tier(self) -> GradeTier {
        match self {
            LetterGrade::A => GradeTier::Green,
            LetterGrade::B => GradeTier::Blue,
            LetterGrade::C => GradeTier::Yellow,
            LetterGrade::D => GradeTier::Orange,
            LetterGrade::F => GradeTier::Red,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display severity for a score, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeTier {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
}

impl GradeTier {
    pub fn from_score(score: f64) -> Self {
        LetterGrade::from_score(score).tier()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GradeTier::Green => "green",
            GradeTier::Blue => "blue",
            GradeTier::Yellow => "yellow",
            GradeTier::Orange => "orange",
            GradeTier::Red => "red",
        }
    }
}

/// Round half up to a whole percentage, as scores are displayed.
pub fn round_percent(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    (value + 0.5).floor() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub count: usize,
    /// Rounded mean; 0 when there is nothing to average.
    pub average: u32,
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
}

impl ScoreSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

pub fn summarize<I>(scores: I) -> ScoreSummary
where
    I: IntoIterator<Item = f64>,
{
    let mut count: usize = 0;
    let mut sum: f64 = 0.0;
    let mut highest: Option<f64> = None;
    let mut lowest: Option<f64> = None;

    for s in scores {
        count += 1;
        sum += s;
        highest = Some(highest.map_or(s, |h| h.max(s)));
        lowest = Some(lowest.map_or(s, |l| l.min(s)));
    }

    let average = if count > 0 {
        round_percent(sum / count as f64)
    } else {
        0
    };

    ScoreSummary {
        count,
        average,
        highest,
        lowest,
    }
}

/// Summary over completed assignments that carry a score; pending work is ignored.
pub fn summarize_assignments(assignments: &[StudentAssignment]) -> ScoreSummary {
    summarize(assignments.iter().filter_map(StudentAssignment::graded_score))
}

/// Rounded mean of the scored entries in one gradebook row.
pub fn student_average(assignments: &[GradedAssignment]) -> u32 {
    summarize(assignments.iter().filter_map(|a| a.score)).average
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassroomStats {
    pub total_students: usize,
    pub total_submissions: usize,
    pub graded_submissions: usize,
    pub average: u32,
    /// Graded submissions as a rounded percentage of all submissions.
    pub completion_rate: u32,
}

pub fn classroom_stats(gradebook: &[GradebookRecord]) -> ClassroomStats {
    let total_submissions: usize = gradebook.iter().map(|r| r.assignments.len()).sum();
    let summary = summarize(
        gradebook
            .iter()
            .flat_map(|r| r.assignments.iter())
            .filter_map(|a| a.score),
    );

    let completion_rate = if total_submissions > 0 {
        round_percent(summary.count as f64 / total_submissions as f64 * 100.0)
    } else {
        0
    };

    ClassroomStats {
        total_students: gradebook.len(),
        total_submissions,
        graded_submissions: summary.count,
        average: summary.average,
        completion_rate,
    }
}

pub fn performance_message(average: u32) -> &'static str {
    match average {
        90.. => "Excellent work! Keep it up!",
        80..=89 => "Great job! You're doing well!",
        70..=79 => "Good progress! Room for improvement.",
        60..=69 => "Keep working hard!",
        _ => "Don't give up! Ask for help if needed.",
    }
}
