//! # Mode Arbitration
//!
//! Decides which process a quote is priced with.
//!
//! ```text
//!                      ┌──────────────────────────┐
//!   job, requested ──► │ digital: always computed │
//!                      │ offset:  requested, or   │
//!                      │          qty > threshold │
//!                      └────────────┬─────────────┘
//!                                   ▼
//!        primary      = breakdown of the requested mode
//!        recommended  = offset if strictly cheaper, else digital
//!        effective    = offset if requested, or qty > threshold and cheaper
//! ```
//!
//! The calculators stay independent of each other; this module only compares
//! their outputs.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::digital::calculate_digital_quote;
use crate::money::Money;
use crate::offset::calculate_offset_quote;
use crate::rate_card::RateCard;
use crate::types::{CostBreakdown, JobDescription, PrintMode};

/// Headline figures of one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ModeSummary {
    #[ts(as = "f64")]
    pub total_price: Money,
    #[ts(as = "f64")]
    pub price_per_unit: Money,
    pub margin_rate: f64,
}

impl From<&CostBreakdown> for ModeSummary {
    fn from(breakdown: &CostBreakdown) -> Self {
        ModeSummary {
            total_price: breakdown.total_price,
            price_per_unit: breakdown.price_per_unit,
            margin_rate: breakdown.margin_rate,
        }
    }
}

/// Side-by-side totals, reported above the comparison threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub digital: ModeSummary,
    pub offset: ModeSummary,
    #[ts(as = "f64")]
    pub savings: Money,
    pub most_economical: PrintMode,
}

/// Outcome of pricing a job in one or both modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ModeComparison {
    pub requested: PrintMode,
    pub digital: CostBreakdown,
    pub offset: Option<CostBreakdown>,
    /// Cheaper of the computed modes.
    pub recommended: PrintMode,
    /// Mode the quote is actually produced in.
    pub effective: PrintMode,
    /// Digital total minus offset total, never negative.
    #[ts(as = "f64")]
    pub savings: Money,
    pub comparison: Option<ComparisonSummary>,
}

impl ModeComparison {
    /// Breakdown of the requested mode.
    pub fn primary(&self) -> &CostBreakdown {
        match (self.requested, &self.offset) {
            (PrintMode::Offset, Some(offset)) => offset,
            _ => &self.digital,
        }
    }

    /// Breakdown of the effective mode.
    pub fn effective_breakdown(&self) -> &CostBreakdown {
        match (self.effective, &self.offset) {
            (PrintMode::Offset, Some(offset)) => offset,
            _ => &self.digital,
        }
    }
}

/// Prices `job` in the requested mode and, above `threshold` copies, in both.
pub fn compare_modes(
    job: &JobDescription,
    requested: PrintMode,
    card: &RateCard,
    threshold: u32,
) -> ModeComparison {
    let above_threshold = job.quantity > threshold;

    let digital = calculate_digital_quote(job, card);
    let offset = (requested == PrintMode::Offset || above_threshold)
        .then(|| calculate_offset_quote(job, card));

    let offset_cheaper = offset
        .as_ref()
        .is_some_and(|o| o.total_price < digital.total_price);

    let recommended = if offset_cheaper {
        PrintMode::Offset
    } else {
        PrintMode::Digital
    };

    let effective = if requested == PrintMode::Offset || (above_threshold && offset_cheaper) {
        PrintMode::Offset
    } else {
        PrintMode::Digital
    };

    let savings = offset
        .as_ref()
        .map(|o| digital.total_price - o.total_price)
        .filter(|diff| diff.is_positive())
        .unwrap_or_default();

    let comparison = offset
        .as_ref()
        .filter(|_| above_threshold)
        .map(|o| ComparisonSummary {
            digital: ModeSummary::from(&digital),
            offset: ModeSummary::from(o),
            savings,
            most_economical: recommended,
        });

    debug!(
        quantity = job.quantity,
        ?requested,
        ?recommended,
        ?effective,
        savings = %savings,
        "modes compared"
    );

    ModeComparison {
        requested,
        digital,
        offset,
        recommended,
        effective,
        savings,
        comparison,
    }
}
