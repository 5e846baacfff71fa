use super::common::*;
use crate::workflows::adverse_credit::domain::{AdverseCreditProfile, ClientId, OrganizationId};
use crate::workflows::adverse_credit::repository::RepositoryError;
use crate::workflows::adverse_credit::{
    LenderSearchError, LenderSearchRequest, LenderSearchService, LenderStatus, MatchingConfig,
    ValidationError,
};
use std::sync::Arc;

#[test]
fn search_returns_one_decision_per_panel_lender() {
    let (service, panels, assessments) = build_service();

    let decisions = service
        .search(
            search_request(None, mortgage_arrears_profile(3)),
            reference_time(),
        )
        .expect("search succeeds");

    let statuses: Vec<LenderStatus> = decisions.iter().map(|d| d.status).collect();
    assert_eq!(
        statuses,
        vec![
            LenderStatus::Accept,
            LenderStatus::Accept,
            LenderStatus::Consider,
            LenderStatus::Accept
        ]
    );
    assert_eq!(panels.lookups(), 1);
    assert_eq!(assessments.len(), 0, "anonymous searches are not stored");
}

#[test]
fn search_stores_results_on_the_client_record() {
    let (service, _, assessments) = build_service();
    let profile = bankruptcy_profile(300);

    let decisions = service
        .search(
            search_request(Some("client-42"), profile.clone()),
            reference_time(),
        )
        .expect("search succeeds");

    let stored = assessments.stored("client-42").expect("assessment stored");
    assert_eq!(stored.lender_results, decisions);
    assert_eq!(stored.profile, profile);
    assert_eq!(stored.assessed_at, reference_time());
    assert_eq!(stored.summary().decline, 1);

    let fetched = service
        .assessment(&ClientId("client-42".to_string()))
        .expect("assessment available");
    assert_eq!(fetched, stored);
}

#[test]
fn a_new_search_replaces_the_stored_assessment() {
    let (service, _, assessments) = build_service();

    service
        .search(
            search_request(Some("client-7"), bankruptcy_profile(300)),
            reference_time(),
        )
        .expect("first search");
    service
        .search(
            search_request(Some("client-7"), AdverseCreditProfile::default()),
            reference_time(),
        )
        .expect("second search");

    let stored = assessments.stored("client-7").expect("assessment stored");
    assert!(stored.lender_results.iter().all(|d| d.meets_all_criteria()));
    assert_eq!(assessments.len(), 1);
}

#[test]
fn invalid_profile_is_rejected_before_the_panel_is_loaded() {
    let (service, panels, assessments) = build_service();
    let mut entry = ccj(40, 100.0, false);
    entry.amount = -1.0;

    let result = service.search(
        search_request(Some("client-9"), ccj_profile(vec![entry])),
        reference_time(),
    );

    assert!(matches!(
        result,
        Err(LenderSearchError::Validation(ValidationError::InvalidAmount { .. }))
    ));
    assert_eq!(panels.lookups(), 0);
    assert!(assessments.stored("client-9").is_none());
}

#[test]
fn organization_without_panel_yields_no_decisions() {
    let (service, _, _) = build_service();
    let request = LenderSearchRequest {
        organization_id: OrganizationId("org-unknown".to_string()),
        client_id: None,
        profile: ccj_profile(vec![ccj(400, 500.0, true)]),
    };

    let decisions = service
        .search(request, reference_time())
        .expect("empty panel is not an error");
    assert!(decisions.is_empty());
}

#[test]
fn panel_failures_propagate_as_repository_errors() {
    let service = LenderSearchService::new(
        Arc::new(UnavailablePanels),
        Arc::new(MemoryAssessments::default()),
        MatchingConfig::default(),
    );

    let result = service.search(
        search_request(None, AdverseCreditProfile::default()),
        reference_time(),
    );

    assert!(matches!(
        result,
        Err(LenderSearchError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[test]
fn storage_failures_propagate_as_repository_errors() {
    let service = LenderSearchService::new(
        Arc::new(MemoryPanels::with_panel(organization(), panel())),
        Arc::new(UnavailableAssessments),
        MatchingConfig::default(),
    );

    let result = service.search(
        search_request(Some("client-1"), AdverseCreditProfile::default()),
        reference_time(),
    );

    assert!(matches!(
        result,
        Err(LenderSearchError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[test]
fn assessment_lookup_reports_missing_clients() {
    let (service, _, _) = build_service();

    match service.assessment(&ClientId("client-none".to_string())) {
        Err(LenderSearchError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}
