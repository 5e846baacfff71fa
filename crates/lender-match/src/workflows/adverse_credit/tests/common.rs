use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::adverse_credit::criteria::{
    ArrearsCriteria, ArrearsTolerance, CriteriaThresholds, InsolvencyCriteria, LenderCriteria,
    LenderId, LenderRecord, SatisfactionRequirement,
};
use crate::workflows::adverse_credit::domain::{
    AdverseCreditProfile, AdverseCreditType, ClientId, CreditEntry, InsolvencyEntry,
    MissedPayments, OrganizationId,
};
use crate::workflows::adverse_credit::repository::{
    AssessmentRecord, AssessmentRepository, LenderPanelRepository, RepositoryError,
};
use crate::workflows::adverse_credit::{
    lender_search_router, LenderSearchRequest, LenderSearchService, MatchingConfig,
};

pub(super) fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0)
        .single()
        .expect("valid reference time")
}

pub(super) fn days_ago(days: i64) -> String {
    (reference_time() - Duration::days(days))
        .date_naive()
        .format("%Y-%m-%d")
        .to_string()
}

pub(super) fn organization() -> OrganizationId {
    OrganizationId("org-harbour".to_string())
}

pub(super) fn ccj(days: i64, amount: f64, satisfied: bool) -> CreditEntry {
    CreditEntry {
        date_registered: days_ago(days),
        amount,
        satisfied,
        date_satisfied: satisfied.then(|| days_ago(days.saturating_sub(30).max(0))),
    }
}

pub(super) fn ccj_profile(entries: Vec<CreditEntry>) -> AdverseCreditProfile {
    AdverseCreditProfile {
        selected_types: vec![AdverseCreditType::Ccjs],
        ccjs: Some(entries),
        ..AdverseCreditProfile::default()
    }
}

pub(super) fn bankruptcy_profile(discharged_days_ago: i64) -> AdverseCreditProfile {
    AdverseCreditProfile {
        selected_types: vec![AdverseCreditType::Bankruptcy],
        bankruptcy: Some(InsolvencyEntry {
            date_registered: days_ago(discharged_days_ago + 365),
            total_debt: 18_000.0,
            date_discharged: days_ago(discharged_days_ago),
        }),
        ..AdverseCreditProfile::default()
    }
}

pub(super) fn missed(last_12_months: i64) -> MissedPayments {
    MissedPayments {
        last_6_months: last_12_months.min(1),
        last_12_months,
        last_24_months: last_12_months,
        last_36_months: last_12_months,
        last_48_months: last_12_months,
    }
}

pub(super) fn mortgage_arrears_profile(last_12_months: i64) -> AdverseCreditProfile {
    AdverseCreditProfile {
        selected_types: vec![AdverseCreditType::MortgageArrears],
        mortgage_arrears: Some(missed(last_12_months)),
        ..AdverseCreditProfile::default()
    }
}

pub(super) fn ccj_thresholds() -> CriteriaThresholds {
    CriteriaThresholds {
        max_amount: Some(1000.0),
        max_count: Some(5),
        min_seasoning_months: Some(6),
        status: SatisfactionRequirement::Satisfied,
    }
}

pub(super) fn lender(id: &str, name: &str, criteria: LenderCriteria) -> LenderRecord {
    LenderRecord {
        id: LenderId(id.to_string()),
        name: name.to_string(),
        product: None,
        criteria,
    }
}

pub(super) fn ccj_lender() -> LenderRecord {
    lender(
        "lender-ccj",
        "Harbour Mutual",
        LenderCriteria {
            ccjs: Some(ccj_thresholds()),
            ..LenderCriteria::default()
        },
    )
}

pub(super) fn bankruptcy_lender(discharge_period_months: u32) -> LenderRecord {
    lender(
        "lender-bankruptcy",
        "Northgate Homes",
        LenderCriteria {
            bankruptcy: Some(InsolvencyCriteria {
                thresholds: CriteriaThresholds::default(),
                discharge_period_months: Some(discharge_period_months),
            }),
            ..LenderCriteria::default()
        },
    )
}

pub(super) fn arrears_lender(count: u32) -> LenderRecord {
    lender(
        "lender-arrears",
        "Cornerstone Finance",
        LenderCriteria {
            arrears: Some(ArrearsCriteria {
                thresholds: CriteriaThresholds::default(),
                arrears_tolerance: Some(ArrearsTolerance { months: 12, count }),
            }),
            ..LenderCriteria::default()
        },
    )
}

/// A panel with every published category, used where one lender should see
/// the whole profile.
pub(super) fn strict_lender() -> LenderRecord {
    lender(
        "lender-strict",
        "Fortress Bank",
        LenderCriteria {
            ccjs: Some(ccj_thresholds()),
            defaults: Some(CriteriaThresholds {
                max_amount: Some(500.0),
                max_count: Some(1),
                min_seasoning_months: Some(12),
                status: SatisfactionRequirement::Unsatisfied,
            }),
            bankruptcy: Some(InsolvencyCriteria {
                thresholds: CriteriaThresholds::default(),
                discharge_period_months: Some(72),
            }),
            arrears: Some(ArrearsCriteria {
                thresholds: CriteriaThresholds::default(),
                arrears_tolerance: Some(ArrearsTolerance {
                    months: 12,
                    count: 0,
                }),
            }),
            iva: Some(InsolvencyCriteria {
                thresholds: CriteriaThresholds::default(),
                discharge_period_months: Some(36),
            }),
            repossessions: Some(CriteriaThresholds::default()),
        },
    )
}

pub(super) fn panel() -> Vec<LenderRecord> {
    vec![
        ccj_lender(),
        bankruptcy_lender(24),
        arrears_lender(2),
        lender("lender-open", "Open Door Lending", LenderCriteria::default()),
    ]
}

pub(super) fn search_request(
    client_id: Option<&str>,
    profile: AdverseCreditProfile,
) -> LenderSearchRequest {
    LenderSearchRequest {
        organization_id: organization(),
        client_id: client_id.map(|id| ClientId(id.to_string())),
        profile,
    }
}

pub(super) fn build_service() -> (
    LenderSearchService<MemoryPanels, MemoryAssessments>,
    Arc<MemoryPanels>,
    Arc<MemoryAssessments>,
) {
    let panels = Arc::new(MemoryPanels::with_panel(organization(), panel()));
    let assessments = Arc::new(MemoryAssessments::default());
    let service =
        LenderSearchService::new(panels.clone(), assessments.clone(), MatchingConfig::default());
    (service, panels, assessments)
}

pub(super) fn lender_search_router_with_service(
    service: LenderSearchService<MemoryPanels, MemoryAssessments>,
) -> axum::Router {
    lender_search_router(Arc::new(service))
}

#[derive(Default)]
pub(super) struct MemoryPanels {
    panels: HashMap<OrganizationId, Vec<LenderRecord>>,
    lookups: Mutex<usize>,
}

impl MemoryPanels {
    pub(super) fn with_panel(organization: OrganizationId, lenders: Vec<LenderRecord>) -> Self {
        let mut panels = HashMap::new();
        panels.insert(organization, lenders);
        Self {
            panels,
            lookups: Mutex::new(0),
        }
    }

    pub(super) fn lookups(&self) -> usize {
        *self.lookups.lock().expect("lookup mutex poisoned")
    }
}

impl LenderPanelRepository for MemoryPanels {
    fn lenders_for(
        &self,
        organization: &OrganizationId,
    ) -> Result<Vec<LenderRecord>, RepositoryError> {
        *self.lookups.lock().expect("lookup mutex poisoned") += 1;
        Ok(self.panels.get(organization).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAssessments {
    records: Arc<Mutex<HashMap<ClientId, AssessmentRecord>>>,
}

impl MemoryAssessments {
    pub(super) fn stored(&self, client: &str) -> Option<AssessmentRecord> {
        self.records
            .lock()
            .expect("assessment mutex poisoned")
            .get(&ClientId(client.to_string()))
            .cloned()
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("assessment mutex poisoned").len()
    }
}

impl AssessmentRepository for MemoryAssessments {
    fn save(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("assessment mutex poisoned")
            .insert(record.client_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, client: &ClientId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("assessment mutex poisoned")
            .get(client)
            .cloned())
    }
}

pub(super) struct UnavailablePanels;

impl LenderPanelRepository for UnavailablePanels {
    fn lenders_for(
        &self,
        _organization: &OrganizationId,
    ) -> Result<Vec<LenderRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("panel store offline".to_string()))
    }
}

pub(super) struct UnavailableAssessments;

impl AssessmentRepository for UnavailableAssessments {
    fn save(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("client store offline".to_string()))
    }

    fn fetch(&self, _client: &ClientId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("client store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
