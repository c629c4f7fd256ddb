use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failures raised while interpreting draft identifiers or statuses at the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("draft id (rid) must not be empty")]
    EmptyDraftId,
    #[error("draft id (rid) cannot be used in a redirect location")]
    InvalidDraftId,
    #[error("unknown draft status '{value}'")]
    UnknownStatus { value: String },
}

/// Coarse progress marker of a single quiz-taking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Started,
    IntakeDone,
    MacroDone,
    RiasecDone,
    FreeDone,
    PremiumDone,
    Archived,
}

impl DraftStatus {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Started,
            Self::IntakeDone,
            Self::MacroDone,
            Self::RiasecDone,
            Self::FreeDone,
            Self::PremiumDone,
            Self::Archived,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::IntakeDone => "intake_done",
            Self::MacroDone => "macro_done",
            Self::RiasecDone => "riasec_done",
            Self::FreeDone => "free_done",
            Self::PremiumDone => "premium_done",
            Self::Archived => "archived",
        }
    }

    /// Archived drafts are never the user's active session.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Archived)
    }

    /// Every question stage has been answered.
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::RiasecDone | Self::FreeDone | Self::PremiumDone)
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftStatus {
    type Err = DraftError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str() == trimmed)
            .ok_or_else(|| DraftError::UnknownStatus {
                value: raw.to_string(),
            })
    }
}

/// Access tier attached to a draft. New drafts start on the free track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entitlement {
    #[default]
    Free,
    Premium,
}

/// Quiz stages that may carry a payload on the draft document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizSection {
    Intake,
    Macro,
    Riasec,
}

impl QuizSection {
    pub const fn ordered() -> [Self; 3] {
        [Self::Intake, Self::Macro, Self::Riasec]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Macro => "macro",
            Self::Riasec => "riasec",
        }
    }
}

/// Opaque draft identifier carried across pages as the `rid` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DraftId(String);

impl DraftId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DraftError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DraftError::EmptyDraftId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DraftId {
    type Error = DraftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DraftId> for String {
    fn from(value: DraftId) -> Self {
        value.0
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored draft document. Section payloads are opaque to the routing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDoc {
    pub status: DraftStatus,
    #[serde(default)]
    pub entitlement: Entitlement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intake: Option<Value>,
    #[serde(rename = "macro", default, skip_serializing_if = "Option::is_none")]
    pub macro_section: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riasec: Option<Value>,
}

impl DraftDoc {
    /// Seeds a fresh draft at the start of the quiz.
    pub fn new(entitlement: Entitlement, now: DateTime<Utc>) -> Self {
        Self {
            status: DraftStatus::Started,
            entitlement,
            created_at: Some(now),
            updated_at: Some(now),
            intake: None,
            macro_section: None,
            riasec: None,
        }
    }

    pub fn section(&self, section: QuizSection) -> Option<&Value> {
        match section {
            QuizSection::Intake => self.intake.as_ref(),
            QuizSection::Macro => self.macro_section.as_ref(),
            QuizSection::Riasec => self.riasec.as_ref(),
        }
    }
}

/// One scored quiz response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub score: f64,
}

/// Macro-stage response, keeping the prompt and chosen label for later review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroAnswer {
    pub question_id: String,
    pub score: f64,
    pub question_text: String,
    pub selected_label: String,
}
