// Accepted candidates become the next draft

use chrono::{TimeZone, Utc};
use semstore_core::candidate::CandidateReducer;
use semstore_core::model::{CandidateItem, CandidateSet, FieldSuggestion, RecognitionRun};
use semstore_engine::VersionStore;

fn suggestion(object_id: &str, name: &str) -> FieldSuggestion {
    FieldSuggestion {
        object_id: object_id.to_string(),
        name: name.to_string(),
        label: name.to_string(),
        field_type: "string".to_string(),
        required: true,
        description: None,
    }
}

fn run() -> RecognitionRun {
    RecognitionRun {
        run_id: "run-1".to_string(),
        scenario: Some("Loan application".to_string()),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        candidates: CandidateSet {
            primary_business_object: Some(CandidateItem::new("bo_applicant", "BO", "Applicant")),
            related_business_objects: vec![
                CandidateItem::new("bo_loan", "BO", "Loan"),
                CandidateItem::new("bo_branch", "BO", "Branch"),
            ],
            field_suggestions: vec![
                suggestion("bo_applicant", "name"),
                suggestion("bo_loan", "amount"),
            ],
            ..CandidateSet::default()
        },
    }
}

#[test]
fn test_reviewed_run_becomes_draft() {
    let store = VersionStore::in_memory();
    let mut reducer = CandidateReducer::new(run());
    assert!(reducer.accept("bo_applicant"));
    assert!(reducer.accept("bo_loan"));
    assert!(reducer.reject("bo_branch"));
    assert!(!reducer.accept("unknown"));

    let draft = store.create_draft_from_review(&reducer).unwrap();

    let ids: Vec<&str> = draft
        .snapshot
        .business_objects
        .iter()
        .map(|bo| bo.id.as_str())
        .collect();
    assert_eq!(ids, vec!["bo_applicant", "bo_loan"]);
    assert_eq!(draft.stats.unwrap().field_count, 2);
}

#[test]
fn test_re_reviewing_produces_identical_snapshot() {
    let store = VersionStore::in_memory();
    let mut reducer = CandidateReducer::new(run());
    reducer.accept("bo_applicant");
    reducer.accept("bo_loan");

    let first = store.create_draft_from_review(&reducer).unwrap();
    let published = store.publish(&first.version_id, "reviewed").unwrap();
    let second = store
        .create_draft_from_working_copy(reducer.working_copy())
        .unwrap();

    assert_ne!(second.version_id, published.version_id);
    assert!(store
        .compare(&published.version_id, &second.version_id)
        .unwrap()
        .is_empty());
}
