use std::io;

use super::criteria::{CriteriaThresholds, LenderCategory, LenderRecord};
use super::evaluation::LenderDecision;

/// Errors raised while writing spreadsheet exports.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export: {0}")]
    Io(#[from] io::Error),
}

pub const DECISION_HEADERS: [&str; 4] = ["Name", "Product", "Status", "Reason"];

/// Write lender decisions as a four-column sheet.
pub fn write_decisions_csv<W: io::Write>(
    writer: W,
    decisions: &[LenderDecision],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(DECISION_HEADERS)?;

    for decision in decisions {
        csv.write_record([
            decision.lender_name.as_str(),
            decision.product.as_str(),
            decision.status.label(),
            decision.reason.trim_end(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Column headers for a panel export, one block per lender category.
pub fn panel_headers() -> Vec<String> {
    let mut headers = vec!["Name".to_string()];
    for category in LenderCategory::ALL {
        for field in category_fields(category) {
            headers.push(format!("{} {}", category.label(), field));
        }
    }
    headers
}

/// Write a lender panel with its criteria flattened into columns. Criteria a
/// lender does not publish are left blank.
pub fn write_panel_csv<W: io::Write>(
    writer: W,
    lenders: &[LenderRecord],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(panel_headers())?;

    for lender in lenders {
        let mut row = vec![lender.name.clone()];
        for category in LenderCategory::ALL {
            row.extend(category_cells(lender, category));
        }
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

fn category_fields(category: LenderCategory) -> &'static [&'static str] {
    const COMMON: &[&str] = &["max_amount", "max_count", "max_age_months", "status"];
    const INSOLVENCY: &[&str] = &[
        "max_amount",
        "max_count",
        "max_age_months",
        "status",
        "discharge_period_months",
    ];
    const ARREARS: &[&str] = &[
        "max_amount",
        "max_count",
        "max_age_months",
        "status",
        "arrears_months",
        "arrears_count",
    ];

    match category {
        LenderCategory::Bankruptcy | LenderCategory::Iva => INSOLVENCY,
        LenderCategory::Arrears => ARREARS,
        LenderCategory::Ccjs | LenderCategory::Defaults | LenderCategory::Repossessions => COMMON,
    }
}

fn category_cells(lender: &LenderRecord, category: LenderCategory) -> Vec<String> {
    let width = category_fields(category).len();
    let Some(thresholds) = lender.criteria.thresholds(category) else {
        return vec![String::new(); width];
    };

    let mut cells = threshold_cells(thresholds);
    match category {
        LenderCategory::Bankruptcy | LenderCategory::Iva => {
            let insolvency = match category {
                LenderCategory::Bankruptcy => lender.criteria.bankruptcy.as_ref(),
                _ => lender.criteria.iva.as_ref(),
            };
            cells.push(optional_cell(
                insolvency.and_then(|criteria| criteria.discharge_period_months),
            ));
        }
        LenderCategory::Arrears => {
            let tolerance = lender
                .criteria
                .arrears
                .as_ref()
                .and_then(|criteria| criteria.arrears_tolerance);
            cells.push(optional_cell(tolerance.map(|t| t.months)));
            cells.push(optional_cell(tolerance.map(|t| t.count)));
        }
        LenderCategory::Ccjs | LenderCategory::Defaults | LenderCategory::Repossessions => {}
    }

    cells
}

fn threshold_cells(thresholds: &CriteriaThresholds) -> Vec<String> {
    vec![
        optional_cell(thresholds.max_amount),
        optional_cell(thresholds.max_count),
        optional_cell(thresholds.min_seasoning_months),
        thresholds.status.label().to_string(),
    ]
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}
