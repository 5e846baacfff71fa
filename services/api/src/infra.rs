use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use lender_match::error::AppError;
use lender_match::workflows::adverse_credit::{
    ArrearsCriteria, ArrearsTolerance, AssessmentRecord, AssessmentRepository, ClientId,
    CriteriaThresholds, InsolvencyCriteria, LenderCriteria, LenderId, LenderPanelRepository,
    LenderRecord, OrganizationId, RepositoryError, SatisfactionRequirement,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Lender panels held in memory, loaded once at start-up.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryLenderPanel {
    shared: Vec<LenderRecord>,
    organizations: HashMap<OrganizationId, Vec<LenderRecord>>,
}

impl InMemoryLenderPanel {
    pub(crate) fn shared(lenders: Vec<LenderRecord>) -> Self {
        Self {
            shared: lenders,
            organizations: HashMap::new(),
        }
    }

    /// Decode a panel file: a JSON array is one panel shared by every
    /// organization, a JSON object maps organization ids to their panels.
    pub(crate) fn from_json(raw: &str) -> Result<Self, AppError> {
        let panel = if raw.trim_start().starts_with('{') {
            let entries: HashMap<String, Vec<LenderRecord>> = serde_json::from_str(raw)?;
            Self {
                shared: Vec::new(),
                organizations: entries
                    .into_iter()
                    .map(|(id, lenders)| (OrganizationId(id), lenders))
                    .collect(),
            }
        } else {
            Self::shared(serde_json::from_str(raw)?)
        };
        Ok(panel)
    }

    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let panel = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            organizations = panel.organizations.len(),
            shared_lenders = panel.shared.len(),
            "loaded lender panel"
        );
        Ok(panel)
    }

    /// Load from `path` when given, otherwise fall back to the demo panel.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::shared(demo_panel())),
        }
    }

    /// Lenders for a single assessment run.
    ///
    /// Without an organization only a shared panel can answer; a panel kept
    /// per organization needs one named.
    pub(crate) fn lenders_for_run(
        &self,
        organization: Option<&OrganizationId>,
    ) -> Result<Vec<LenderRecord>, RepositoryError> {
        match organization {
            Some(organization) => self.lenders_for(organization),
            None if self.organizations.is_empty() => Ok(self.shared.clone()),
            None => {
                let mut known: Vec<String> =
                    self.organizations.keys().map(|id| id.0.clone()).collect();
                known.sort_unstable();
                Err(RepositoryError::OrganizationRequired { known })
            }
        }
    }
}

impl LenderPanelRepository for InMemoryLenderPanel {
    fn lenders_for(
        &self,
        organization: &OrganizationId,
    ) -> Result<Vec<LenderRecord>, RepositoryError> {
        Ok(self
            .organizations
            .get(organization)
            .cloned()
            .unwrap_or_else(|| self.shared.clone()))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentStore {
    records: Arc<Mutex<HashMap<ClientId, AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentStore {
    fn save(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("assessment store poisoned".to_string()))?;
        guard.insert(record.client_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, client: &ClientId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("assessment store poisoned".to_string()))?;
        Ok(guard.get(client).cloned())
    }
}

/// A small panel used when no panel file is configured.
pub(crate) fn demo_panel() -> Vec<LenderRecord> {
    vec![
        LenderRecord {
            id: LenderId("harbour-mutual".to_string()),
            name: "Harbour Mutual".to_string(),
            product: None,
            criteria: LenderCriteria {
                ccjs: Some(CriteriaThresholds {
                    max_amount: Some(1000.0),
                    max_count: Some(3),
                    min_seasoning_months: Some(12),
                    status: SatisfactionRequirement::Satisfied,
                }),
                defaults: Some(CriteriaThresholds {
                    max_amount: Some(2500.0),
                    max_count: Some(4),
                    min_seasoning_months: Some(6),
                    status: SatisfactionRequirement::Unsatisfied,
                }),
                bankruptcy: Some(InsolvencyCriteria {
                    thresholds: CriteriaThresholds::default(),
                    discharge_period_months: Some(36),
                }),
                arrears: Some(ArrearsCriteria {
                    thresholds: CriteriaThresholds::default(),
                    arrears_tolerance: Some(ArrearsTolerance {
                        months: 12,
                        count: 1,
                    }),
                }),
                ..LenderCriteria::default()
            },
        },
        LenderRecord {
            id: LenderId("northgate-specialist".to_string()),
            name: "Northgate Specialist".to_string(),
            product: Some("Specialist Residential".to_string()),
            criteria: LenderCriteria {
                ccjs: Some(CriteriaThresholds {
                    max_amount: Some(10_000.0),
                    max_count: Some(6),
                    min_seasoning_months: Some(3),
                    status: SatisfactionRequirement::Unsatisfied,
                }),
                bankruptcy: Some(InsolvencyCriteria {
                    thresholds: CriteriaThresholds::default(),
                    discharge_period_months: Some(12),
                }),
                iva: Some(InsolvencyCriteria {
                    thresholds: CriteriaThresholds::default(),
                    discharge_period_months: Some(12),
                }),
                arrears: Some(ArrearsCriteria {
                    thresholds: CriteriaThresholds::default(),
                    arrears_tolerance: Some(ArrearsTolerance {
                        months: 12,
                        count: 3,
                    }),
                }),
                ..LenderCriteria::default()
            },
        },
        LenderRecord {
            id: LenderId("cornerstone-btl".to_string()),
            name: "Cornerstone BTL".to_string(),
            product: Some("Buy to Let".to_string()),
            criteria: LenderCriteria::default(),
        },
    ]
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Midnight UTC on `date`, the reference point for a dated assessment.
pub(crate) fn reference_time_on(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
