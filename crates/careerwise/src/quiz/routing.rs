use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{DraftDoc, DraftStatus};

/// Quiz pages a resumed draft can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Intake,
    Macro,
    Riasec,
    Results,
    Final,
}

impl Destination {
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Macro => "macro",
            Self::Riasec => "riasec",
            Self::Results => "results",
            Self::Final => "final",
        }
    }

    /// Next page for a draft in `status`. Archived drafts restart at intake.
    pub const fn for_status(status: DraftStatus) -> Self {
        match status {
            DraftStatus::Started => Self::Intake,
            DraftStatus::IntakeDone => Self::Macro,
            DraftStatus::MacroDone => Self::Riasec,
            DraftStatus::RiasecDone | DraftStatus::FreeDone => Self::Results,
            DraftStatus::PremiumDone => Self::Final,
            DraftStatus::Archived => Self::Intake,
        }
    }

    /// `rid` is embedded verbatim; callers must pass an already URL-safe token.
    pub fn path(self, rid: &str) -> String {
        format!("/{}?rid={rid}", self.segment())
    }
}

/// Relative path the user should be sent to for a draft in `status`.
pub fn destination_for_status(status: DraftStatus, rid: &str) -> String {
    Destination::for_status(status).path(rid)
}

/// Outcome of routing a status that arrived as an untyped string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedDestination {
    pub status: Option<DraftStatus>,
    pub destination: Destination,
    pub path: String,
    pub fallback: bool,
}

/// Routes a raw status string. Unrecognised values land on intake and are logged.
pub fn destination_for_raw_status(raw: &str, rid: &str) -> RoutedDestination {
    match raw.parse::<DraftStatus>() {
        Ok(status) => {
            if !status.is_active() {
                debug!(rid, %status, "routing inactive draft back to intake");
            }
            let destination = Destination::for_status(status);
            RoutedDestination {
                status: Some(status),
                destination,
                path: destination.path(rid),
                fallback: false,
            }
        }
        Err(_) => {
            warn!(rid, status = raw, "unrecognised draft status; falling back to intake");
            let destination = Destination::Intake;
            RoutedDestination {
                status: None,
                destination,
                path: destination.path(rid),
                fallback: true,
            }
        }
    }
}

/// Every status paired with the path it routes to, in progression order.
pub fn routing_table(rid: &str) -> Vec<(DraftStatus, String)> {
    DraftStatus::ordered()
        .into_iter()
        .map(|status| (status, destination_for_status(status, rid)))
        .collect()
}

impl DraftDoc {
    pub fn destination(&self, rid: &str) -> String {
        destination_for_status(self.status, rid)
    }
}
