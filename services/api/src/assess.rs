use crate::infra::{reference_time_on, InMemoryLenderPanel};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use lender_match::config::AppConfig;
use lender_match::error::AppError;
use lender_match::workflows::adverse_credit::{
    write_decisions_csv, write_panel_csv, AdverseCreditProfile, DecisionSummary, LenderDecision,
    LenderRecord, MatchingConfig, OrganizationId, ProfileEvaluator,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Adverse-credit profile JSON, as stored on the client record
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Lender panel JSON (defaults to LENDER_PANEL_PATH, then the demo panel)
    #[arg(long)]
    pub(crate) panel: Option<PathBuf>,
    /// Organization whose panel to use; required when the panel file is
    /// keyed by organization
    #[arg(long)]
    pub(crate) organization: Option<String>,
    /// Assess as of midnight UTC on this date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) reference_date: Option<NaiveDate>,
    /// Write the decisions to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Write the panel's criteria to this CSV file
    #[arg(long)]
    pub(crate) panel_csv: Option<PathBuf>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let panel_path = args
        .panel
        .clone()
        .or_else(|| config.panel.lender_panel_path.clone());
    let reference_time = args
        .reference_date
        .map(reference_time_on)
        .unwrap_or_else(Utc::now);

    let organization = args.organization.map(OrganizationId);

    let panel = InMemoryLenderPanel::load(panel_path.as_deref())?;
    let lenders = panel.lenders_for_run(organization.as_ref())?;
    let decisions = match_profile(
        &args.profile,
        &lenders,
        config.panel.matching_config(),
        reference_time,
    )?;

    print!("{}", render_decisions(&decisions, reference_time));

    if let Some(path) = args.csv.as_deref() {
        write_decisions_csv(BufWriter::new(File::create(path)?), &decisions)?;
        println!("Decisions written to {}", path.display());
    }
    if let Some(path) = args.panel_csv.as_deref() {
        write_panel_csv(BufWriter::new(File::create(path)?), &lenders)?;
        println!("Panel criteria written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn match_profile(
    profile_path: &Path,
    lenders: &[LenderRecord],
    config: MatchingConfig,
    reference_time: DateTime<Utc>,
) -> Result<Vec<LenderDecision>, AppError> {
    let raw = std::fs::read_to_string(profile_path)?;
    let profile: AdverseCreditProfile = serde_json::from_str(&raw)?;

    let decisions = ProfileEvaluator::new(config).evaluate(&profile, lenders, reference_time)?;
    info!(
        profile = %profile_path.display(),
        lenders = lenders.len(),
        "matched profile from file"
    );
    Ok(decisions)
}

pub(crate) fn render_decisions(decisions: &[LenderDecision], reference_time: DateTime<Utc>) -> String {
    let summary = DecisionSummary::from_decisions(decisions);
    let mut out = format!(
        "Lender match as of {}\n{} lenders | {} accept | {} consider | {} decline\n",
        reference_time.format("%Y-%m-%d %H:%M UTC"),
        decisions.len(),
        summary.accept,
        summary.consider,
        summary.decline
    );

    for decision in decisions {
        out.push_str(&format!(
            "- {} [{}]: {}\n    {}\n",
            decision.lender_name,
            decision.product,
            decision.status.label(),
            decision.reason.trim_end()
        ));
    }

    out
}
