//! # Digital Calculator
//!
//! Prices a job on the digital press: paper by weight, a flat cost per printed
//! side, and finishing priced per copy plus setup.
//!
//! ## Cost Pipeline
//! ```text
//! JobDescription ──► weight ──► paper ──► printing ──► binding ──► lamination
//!                                                                      │
//!   CostBreakdown ◄── margin 5% ◄── subtotal ◄── delivery ◄── packaging ◄── folding
//! ```

use tracing::{debug, trace};

use crate::delivery::delivery_cost;
use crate::rate_card::lookup::at_or_above;
use crate::rate_card::{DigitalRates, RateCard};
use crate::types::{
    BindingType, CostBreakdown, JobDescription, LaminationOrientation, PackagingType, PrintMode,
    ProductType, RawCosts,
};
use crate::weight::{CoverSurface, PartWeights};

/// Computes the digital breakdown of a job.
///
/// Total over any structurally valid job; `quantity` must be at least 1.
pub fn calculate_digital_quote(job: &JobDescription, card: &RateCard) -> CostBreakdown {
    let weights = PartWeights::compute(job, card, CoverSurface::Finished);
    let rates = &card.digital;
    let quantity = f64::from(job.quantity);

    let costs = RawCosts {
        paper: paper_cost(job, card, &weights),
        printing: printing_cost(job, rates),
        binding: binding_cost(job, rates),
        lamination: lamination_cost(job, rates),
        folding: folding_cost(job, rates),
        packaging: packaging_cost(job, rates),
        delivery: delivery_cost(&job.deliveries, weights.per_copy_kg(), &card.transport),
    };
    let subtotal = costs.sum();

    let breakdown = CostBreakdown::assemble(
        PrintMode::Digital,
        costs,
        subtotal,
        card.digital_margin,
        job.quantity,
        weights.totals(job.quantity),
    );

    debug!(
        quantity,
        subtotal = %breakdown.subtotal,
        total = %breakdown.total_price,
        "digital quote computed"
    );

    breakdown
}

/// [`calculate_digital_quote`] against the standard rate card.
pub fn calculate_digital_quote_standard(job: &JobDescription) -> CostBreakdown {
    calculate_digital_quote(job, RateCard::global())
}

fn paper_cost(job: &JobDescription, card: &RateCard, weights: &PartWeights) -> f64 {
    let quantity = f64::from(job.quantity);
    let interior_rate = card.paper_rate(&job.interior_paper_type, job.interior_grammage);
    let interior = weights.interior_kg() * quantity * interior_rate;

    let cover = match job.cover_paper() {
        Some((label, grammage)) => {
            let cover_kg = weights.cover_g / 1000.0;
            cover_kg * quantity * card.paper_rate(label, grammage)
        }
        None => 0.0,
    };

    interior + cover
}

fn printing_cost(job: &JobDescription, rates: &DigitalRates) -> f64 {
    let quantity = f64::from(job.quantity);
    let interior =
        f64::from(job.interior_pages) * quantity * rates.per_side.get(job.interior_colors);

    let cover = match job.cover_color_mode() {
        Some(mode) => f64::from(job.cover_pages.count()) * quantity * rates.per_side.get(mode),
        None => 0.0,
    };

    interior + cover
}

fn binding_cost(job: &JobDescription, rates: &DigitalRates) -> f64 {
    let binding = match job.binding_type {
        BindingType::None => return 0.0,
        BindingType::PerfectBoundSewn => {
            trace!("sewn binding priced with the PUR table");
            BindingType::PerfectBoundPur
        }
        other => other,
    };

    let per_unit = rates.binding_per_unit(binding, job.interior_pages, job.quantity);
    let setup = if binding == BindingType::SaddleStitched
        && job.quantity > rates.saddle_stitch_bulk_above
    {
        rates.saddle_stitch_bulk_setup
    } else {
        rates.binding_setup(binding).unwrap_or(0.0)
    };

    per_unit * f64::from(job.quantity) + setup
}

fn lamination_cost(job: &JobDescription, rates: &DigitalRates) -> f64 {
    if job.lamination_orientation == LaminationOrientation::None {
        return 0.0;
    }

    let Some(per_unit) = rates
        .lamination
        .get(&job.lamination_orientation)
        .and_then(|table| at_or_above(table, job.quantity))
        .map(|(_, rate)| *rate)
    else {
        return 0.0;
    };

    per_unit * f64::from(job.quantity) * rates.finish_multiplier(job.lamination_finish)
}

fn folding_cost(job: &JobDescription, rates: &DigitalRates) -> f64 {
    if job.product_type != ProductType::Leaflet {
        return 0.0;
    }
    let folds = match job.fold_count {
        Some(n) if n > 0 => n.min(rates.max_folds),
        _ => return 0.0,
    };

    let Some(per_unit) = rates
        .folding
        .get(&folds)
        .and_then(|table| at_or_above(table, job.quantity))
        .map(|(_, rate)| *rate)
    else {
        trace!(folds, "no folding rate for fold count");
        return 0.0;
    };
    let setup = rates.folding_setup.get(&folds).copied().unwrap_or(0.0);

    per_unit * f64::from(job.quantity) + setup
}

fn packaging_cost(job: &JobDescription, rates: &DigitalRates) -> f64 {
    if job.packaging_type == PackagingType::None {
        return 0.0;
    }

    let table = match job.product_type {
        ProductType::Brochure | ProductType::Leaflet => &rates.packaging_brochure,
        ProductType::BusinessCard => &rates.packaging_card,
        ProductType::FlyerPoster => return 0.0,
    };

    match at_or_above(table, job.quantity) {
        Some((_, rate)) => rate.per_unit * f64::from(job.quantity) + rate.fixed,
        None => rates.packaging_minimum_fee,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
