//! Integration specifications for resuming a quiz draft.
//!
//! Scenarios go through the public crate surface only: the typed router, the raw-status entry
//! point used by HTTP callers, and the stored draft document shape.

use careerwise::quiz::{
    destination_for_raw_status, destination_for_status, Destination, DraftDoc, DraftStatus,
    Entitlement,
};
use chrono::Utc;
use serde_json::json;

#[test]
fn documented_destinations_hold_for_every_status() {
    let expectations = [
        (DraftStatus::Started, "abc123", "/intake?rid=abc123"),
        (DraftStatus::IntakeDone, "abc123", "/macro?rid=abc123"),
        (DraftStatus::MacroDone, "abc123", "/riasec?rid=abc123"),
        (DraftStatus::RiasecDone, "xyz", "/results?rid=xyz"),
        (DraftStatus::FreeDone, "xyz", "/results?rid=xyz"),
        (DraftStatus::PremiumDone, "xyz", "/final?rid=xyz"),
        (DraftStatus::Archived, "xyz", "/intake?rid=xyz"),
    ];

    for (status, rid, expected) in expectations {
        assert_eq!(destination_for_status(status, rid), expected, "{status}");
    }
}

#[test]
fn free_track_progression_ends_on_results() {
    let mut draft = DraftDoc::new(Entitlement::Free, Utc::now());
    let mut visited = Vec::new();

    for status in [
        DraftStatus::Started,
        DraftStatus::IntakeDone,
        DraftStatus::MacroDone,
        DraftStatus::FreeDone,
    ] {
        draft.status = status;
        visited.push(draft.destination("run-1"));
    }

    assert_eq!(
        visited,
        vec![
            "/intake?rid=run-1",
            "/macro?rid=run-1",
            "/riasec?rid=run-1",
            "/results?rid=run-1",
        ]
    );
}

#[test]
fn stored_document_status_drives_raw_routing() {
    let stored = json!({
        "status": "riasec_done",
        "entitlement": "free",
        "updatedAt": "2025-06-12T18:04:11Z",
        "riasec": [{ "questionId": "R1", "score": 3 }]
    });
    let raw_status = stored["status"].as_str().expect("status is a string");

    let routed = destination_for_raw_status(raw_status, "stored-7");
    let draft: DraftDoc = serde_json::from_value(stored).expect("document decodes");

    assert_eq!(routed.destination, Destination::Results);
    assert_eq!(routed.path, draft.destination("stored-7"));
    assert!(!routed.fallback);
}

#[test]
fn legacy_statuses_are_absorbed_by_the_intake_fallback() {
    let routed = destination_for_raw_status("big5_in_progress", "old-draft");

    assert!(routed.fallback);
    assert_eq!(routed.path, "/intake?rid=old-draft");
    assert_eq!(
        routed.path,
        destination_for_status(DraftStatus::Archived, "old-draft")
    );
}
