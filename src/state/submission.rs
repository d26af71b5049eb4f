//! Feedback submission model
//!
//! `Submission` is the in-progress value the wizard edits. `NewSubmission` is
//! the normalized record handed to the store, serialized with the column
//! names of the hosted `manifestacoes` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a feedback submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    #[serde(rename = "reclamacao")]
    Complaint,
    #[serde(rename = "sugestao")]
    Suggestion,
    #[serde(rename = "denuncia")]
    Report,
    #[serde(rename = "elogio")]
    Praise,
}

impl FeedbackKind {
    /// All kinds in selector order
    pub const ALL: [FeedbackKind; 4] = [
        FeedbackKind::Complaint,
        FeedbackKind::Suggestion,
        FeedbackKind::Report,
        FeedbackKind::Praise,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Complaint => "Complaint",
            Self::Suggestion => "Suggestion",
            Self::Report => "Report",
            Self::Praise => "Praise",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Complaint => "Report a problem",
            Self::Suggestion => "Propose improvements",
            Self::Report => "Report misconduct",
            Self::Praise => "Recognise good work",
        }
    }

    /// Value stored in the `tipo` column
    pub fn as_wire_value(self) -> &'static str {
        match self {
            Self::Complaint => "reclamacao",
            Self::Suggestion => "sugestao",
            Self::Report => "denuncia",
            Self::Praise => "elogio",
        }
    }

    /// Position in `ALL`
    pub fn index(self) -> usize {
        match self {
            Self::Complaint => 0,
            Self::Suggestion => 1,
            Self::Report => 2,
            Self::Praise => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Submission field, used to point errors and focus at an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFieldId {
    Kind,
    Body,
    Name,
    Email,
}

impl FormFieldId {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kind => "type",
            Self::Body => "message",
            Self::Name => "name",
            Self::Email => "e-mail",
        }
    }
}

/// Review status written with every new record; the board moves records
/// along from the admin side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[default]
    #[serde(rename = "pendente")]
    Pending,
}

/// Submission fields as the user fills them in. Empty strings mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub kind: Option<FeedbackKind>,
    pub body: String,
    pub is_anonymous: bool,
    pub name: String,
    pub email: String,
}

impl Submission {
    /// Trimmed email, or `None` when blank or not applicable (anonymous)
    pub fn effective_email(&self) -> Option<&str> {
        if self.is_anonymous {
            return None;
        }
        let email = self.email.trim();
        if email.is_empty() {
            None
        } else {
            Some(email)
        }
    }

    /// Trimmed name, or `None` when blank or anonymous
    pub fn effective_name(&self) -> Option<&str> {
        if self.is_anonymous {
            return None;
        }
        let name = self.name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Normalized record sent to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
    #[serde(rename = "tipo")]
    pub kind: FeedbackKind,
    #[serde(rename = "conteudo")]
    pub body: String,
    #[serde(rename = "anonimo")]
    pub is_anonymous: bool,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: SubmissionStatus,
}

impl NewSubmission {
    /// Build the record with trimmed strings and inapplicable fields nulled
    pub fn normalize(kind: FeedbackKind, submission: &Submission) -> Self {
        Self {
            kind,
            body: submission.body.trim().to_string(),
            is_anonymous: submission.is_anonymous,
            name: submission.effective_name().map(str::to_string),
            email: submission.effective_email().map(str::to_string),
            status: SubmissionStatus::Pending,
        }
    }
}

/// A record the store has accepted. `id` and `created_at` come from the
/// store when it reports them; the record itself is what was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSubmission {
    pub id: Option<String>,
    pub record: NewSubmission,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_wire_values() {
        for kind in FeedbackKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_wire_value()));
        }
    }

    #[test]
    fn test_kind_index_matches_all_order() {
        for (i, kind) in FeedbackKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(FeedbackKind::from_index(i), Some(*kind));
        }
        assert_eq!(FeedbackKind::from_index(4), None);
    }

    #[test]
    fn test_default_submission_is_blank() {
        let submission = Submission::default();
        assert!(submission.kind.is_none());
        assert!(submission.body.is_empty());
        assert!(!submission.is_anonymous);
        assert_eq!(submission.effective_name(), None);
        assert_eq!(submission.effective_email(), None);
    }

    #[test]
    fn test_effective_fields_null_when_anonymous() {
        let submission = Submission {
            is_anonymous: true,
            name: "Maria".to_string(),
            email: "maria@uni.edu".to_string(),
            ..Default::default()
        };
        assert_eq!(submission.effective_name(), None);
        assert_eq!(submission.effective_email(), None);
    }

    #[test]
    fn test_effective_fields_trimmed() {
        let submission = Submission {
            name: "  Maria ".to_string(),
            email: " maria@uni.edu ".to_string(),
            ..Default::default()
        };
        assert_eq!(submission.effective_name(), Some("Maria"));
        assert_eq!(submission.effective_email(), Some("maria@uni.edu"));
    }

    #[test]
    fn test_normalize_trims_and_sets_pending() {
        let submission = Submission {
            kind: Some(FeedbackKind::Complaint),
            body: "  The library closes too early.  ".to_string(),
            is_anonymous: false,
            name: " Maria ".to_string(),
            email: "   ".to_string(),
        };
        let record = NewSubmission::normalize(FeedbackKind::Complaint, &submission);
        assert_eq!(
            record,
            NewSubmission {
                kind: FeedbackKind::Complaint,
                body: "The library closes too early.".to_string(),
                is_anonymous: false,
                name: Some("Maria".to_string()),
                email: None,
                status: SubmissionStatus::Pending,
            }
        );
    }

    #[test]
    fn test_record_serializes_with_column_names() {
        let record = NewSubmission {
            kind: FeedbackKind::Suggestion,
            body: "Please add more bike racks.".to_string(),
            is_anonymous: true,
            name: None,
            email: None,
            status: SubmissionStatus::Pending,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "tipo": "sugestao",
                "conteudo": "Please add more bike racks.",
                "anonimo": true,
                "nome": null,
                "email": null,
                "status": "pendente",
            })
        );
    }
}
