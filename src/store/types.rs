use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value of a single intake-form question.
///
/// Variants:
/// - `Text`: free text, selects and dates exactly as submitted.
/// - `Flag`: a yes/no question.
/// - `Missing`: the question was shown but left unanswered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Answer {
    Text(String),
    Flag(bool),
    Missing,
}

impl Answer {
    /// True when the answer carries nothing worth displaying.
    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Text(s) => s.is_empty(),
            Answer::Flag(_) => false,
            Answer::Missing => true,
        }
    }
}

/// One guest-filled crime report pending officer review.
///
/// Content is immutable once added to the store; submissions are only ever
/// created and later deleted in full. `dashboard_id` is a reference to the
/// externally persisted dashboard session, not an owning link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub submission_id: Uuid,
    pub dashboard_id: i32,
    pub guest_name: String,
    pub dob: Option<String>,
    pub rg: Option<String>,
    pub cpf: Option<String>,
    pub address: Option<String>,
    /// Question id to answer, in the order the intake form presented them.
    pub answers: Vec<(String, Answer)>,
    pub narrative: Option<String>,
    /// Tag selecting which question schema applies (see `schemas`).
    pub crime_type: String,
    /// Image bytes, metadata already stripped at the intake boundary.
    pub photos: Vec<Vec<u8>>,
    pub received_at: DateTime<Utc>,
}

impl Submission {
    /// Point lookup of an answer by question id.
    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_blankness() {
        assert!(Answer::Missing.is_blank());
        assert!(Answer::Text(String::new()).is_blank());
        assert!(!Answer::Text("às 22h".into()).is_blank());
        assert!(!Answer::Flag(false).is_blank());
    }
}
