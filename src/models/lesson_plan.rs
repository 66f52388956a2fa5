use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonPlan {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub grade_level: String,
    pub topic: String,
    pub content: String,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}
