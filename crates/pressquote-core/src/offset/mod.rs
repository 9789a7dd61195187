//! # Offset Calculator
//!
//! Prices a job on the offset press. Unlike digital, cost is driven by the
//! number of signatures: each one needs its own plates and its share of a
//! press sheet, and a fixed make-ready is paid once per run.
//!
//! ## Cost Pipeline
//! ```text
//! JobDescription
//!   │
//!   ├── SheetFormat::for_finished_size ──► sheet price column
//!   ├── calculate_signatures ──► sheets per copy, plates, impressions, sections
//!   │
//!   ▼
//! paper + printing (plates, impressions, make-ready) + binding + lamination + delivery
//!   │
//!   ▼
//! + supplements (% of the sum) = subtotal ──► margin 7% ──► CostBreakdown
//! ```
//!
//! Folding and packaging are not priced separately on offset and are always
//! zero.

mod imposition;

use tracing::{debug, trace};

use crate::delivery::delivery_cost;
use crate::rate_card::brackets::SheetFormat;
use crate::rate_card::paper::PaperKind;
use crate::rate_card::{OffsetRates, RateCard};
use crate::types::{
    BindingType, ColorMode, CostBreakdown, CoverPages, JobDescription, LaminationOrientation,
    PrintMode, Rate, RawCosts,
};
use crate::weight::{CoverSurface, PartWeights};
use imposition::{calculate_signatures, SignatureInfo};

/// Computes the offset breakdown of a job.
///
/// Total over any structurally valid job; `quantity` must be at least 1.
pub fn calculate_offset_quote(job: &JobDescription, card: &RateCard) -> CostBreakdown {
    let weights = PartWeights::compute(job, card, CoverSurface::WithFlap);
    let rates = &card.offset;
    let signatures = calculate_signatures(job.interior_pages);
    let format = SheetFormat::for_finished_size(job.format_width, job.format_height);

    let costs = RawCosts {
        paper: paper_cost(job, rates, &signatures, format),
        printing: press_cost(job, rates, &signatures) + make_ready_cost(job, rates),
        binding: binding_cost(job, card, &signatures),
        lamination: lamination_cost(job, rates),
        folding: 0.0,
        packaging: 0.0,
        delivery: delivery_cost(&job.deliveries, weights.per_copy_kg(), &card.transport),
    };

    let base = costs.sum();
    let supplements = supplement_rate(job, rates);
    let subtotal = base + base * supplements.fraction();

    let breakdown = CostBreakdown::assemble(
        PrintMode::Offset,
        costs,
        subtotal,
        card.offset_margin,
        job.quantity,
        weights.totals(job.quantity),
    );

    debug!(
        quantity = job.quantity,
        signatures = signatures.total_signatures,
        ?format,
        supplements_bps = supplements.bps(),
        subtotal = %breakdown.subtotal,
        total = %breakdown.total_price,
        "offset quote computed"
    );

    breakdown
}

/// [`calculate_offset_quote`] against the standard rate card.
pub fn calculate_offset_quote_standard(job: &JobDescription) -> CostBreakdown {
    calculate_offset_quote(job, RateCard::global())
}

fn sheet_price(rates: &OffsetRates, grammage: u32, format: SheetFormat, default: f64) -> f64 {
    rates.sheet_price(grammage, format).unwrap_or_else(|| {
        trace!(grammage, ?format, default, "no sheet price for grammage");
        default
    })
}

fn paper_cost(
    job: &JobDescription,
    rates: &OffsetRates,
    signatures: &SignatureInfo,
    format: SheetFormat,
) -> f64 {
    let quantity = f64::from(job.quantity);

    let interior_price = sheet_price(
        rates,
        job.interior_grammage,
        format,
        rates.default_interior_sheet_price,
    );
    let interior_sheets = (signatures.sheets_per_copy() * quantity * rates.waste_factor).ceil();
    let interior = interior_sheets / 1000.0 * interior_price;

    // One cover sheet per copy.
    let cover = match job.cover_grammage() {
        Some(grammage) => {
            let price = sheet_price(rates, grammage, format, rates.default_cover_sheet_price);
            let cover_sheets = (quantity * rates.waste_factor).ceil();
            cover_sheets / 1000.0 * price
        }
        None => 0.0,
    };

    interior + cover
}

/// Plates plus running cost.
fn press_cost(job: &JobDescription, rates: &OffsetRates, signatures: &SignatureInfo) -> f64 {
    let interior_plates =
        signatures.total_signatures * rates.plates_per_side.get(job.interior_colors) * 2;
    let cover_plates = job
        .cover_color_mode()
        .map_or(0, |mode| rates.plates_per_side.get(mode) * 2);
    let plate_cost = f64::from(interior_plates + cover_plates) * rates.plate_price;

    let impressions = u64::from(signatures.total_signatures)
        * u64::from(job.quantity)
        * u64::from(rates.colors_per_side.get(job.interior_colors))
        * 2;
    let running_cost = impressions as f64 * rates.impression_price;

    plate_cost + running_cost
}

fn make_ready_cost(job: &JobDescription, rates: &OffsetRates) -> f64 {
    let make_ready = &rates.make_ready;
    let interior = if job.interior_colors == ColorMode::FourColorVarnish {
        make_ready.interior_base * make_ready.varnish_factor
    } else {
        make_ready.interior_base
    };

    let cover = match job.cover_pages {
        CoverPages::None => 0.0,
        CoverPages::Two => make_ready.cover_two_pages,
        CoverPages::Four => make_ready.cover_four_pages,
    };

    interior + cover
}

fn binding_cost(job: &JobDescription, card: &RateCard, signatures: &SignatureInfo) -> f64 {
    if job.binding_type == BindingType::None {
        return 0.0;
    }

    let rates = &card.offset;
    let sections = signatures.total_signatures + u32::from(job.has_cover());
    let capped = sections.min(rates.max_binding_sections);

    if let Some(rate) = rates.binding.get(&capped) {
        return rate.setup + f64::from(job.quantity) / 1000.0 * rate.running_per_thousand;
    }

    trace!(sections, "no section binding rate, using digital binding table");
    digital_binding_fallback(job, card)
}

/// Per-copy digital rate with an offset setup. Sewn binding reads the PUR
/// table but keeps its own setup.
fn digital_binding_fallback(job: &JobDescription, card: &RateCard) -> f64 {
    let table_type = match job.binding_type {
        BindingType::PerfectBoundSewn => BindingType::PerfectBoundPur,
        other => other,
    };
    if !card.digital.binding.contains_key(&table_type) {
        return 0.0;
    }

    let per_unit = card
        .digital
        .binding_per_unit(table_type, job.interior_pages, job.quantity);
    let setup = card
        .digital
        .binding_setup(job.binding_type)
        .filter(|setup| *setup > 0.0)
        .unwrap_or(card.offset.binding_fallback_setup);

    per_unit * f64::from(job.quantity) + setup
}

fn lamination_cost(job: &JobDescription, rates: &OffsetRates) -> f64 {
    let rate_per_m2 = match job.lamination_orientation {
        LaminationOrientation::None => return 0.0,
        LaminationOrientation::SingleSide => rates.lamination.single_side,
        LaminationOrientation::BothSides => rates.lamination.both_sides,
    };

    let area_m2 = job.area_cm2() / 10_000.0;
    area_m2 * f64::from(job.quantity) * rate_per_m2 + rates.lamination.setup
}

/// Sum of the percentage supplements that apply to the interior paper.
fn supplement_rate(job: &JobDescription, rates: &OffsetRates) -> Rate {
    let supplements = &rates.supplements;
    let mut rate = Rate::zero();

    if job.interior_grammage > supplements.heavy_coated_above {
        match PaperKind::from_label(&job.interior_paper_type) {
            PaperKind::CoucheSatin => rate = rate + supplements.satin_heavy,
            PaperKind::CoucheMat => rate = rate + supplements.matte_heavy,
            _ => {}
        }
    }

    if job.interior_grammage < supplements.light_paper_below {
        rate = rate + supplements.light_paper;
    }

    rate
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::brochure;

    fn card() -> RateCard {
        RateCard::standard()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_paper_cost_with_waste() {
        let rates = card().offset;
        let mut job = brochure();
        job.quantity = 1000;
        job.interior_pages = 64;
        job.interior_grammage = 90;
        job.cover_pages = CoverPages::None;

        // 4 sheets × 1000 copies × 1.10 waste, 64x90 column
        let signatures = calculate_signatures(64);
        let sheets = (4.0 * 1000.0 * 1.10_f64).ceil();
        let cost = paper_cost(&job, &rates, &signatures, SheetFormat::F64x90);
        assert!(close(cost, sheets / 1000.0 * 51.84));
    }

    #[test]
    fn test_unlisted_grammage_uses_default_sheet_price() {
        let rates = card().offset;
        let mut job = brochure();
        job.quantity = 100;
        job.interior_pages = 16;
        job.interior_grammage = 135;
        job.cover_grammage = Some(300);

        let signatures = calculate_signatures(16);
        let interior = (1.0 * 100.0 * 1.10_f64).ceil() / 1000.0 * 50.0;
        let cover = (100.0 * 1.10_f64).ceil() / 1000.0 * 60.0;
        let cost = paper_cost(&job, &rates, &signatures, SheetFormat::F64x90);
        assert!(close(cost, interior + cover));
    }

    #[test]
    fn test_press_cost_counts_plates_and_impressions() {
        let rates = card().offset;
        let mut job = brochure();
        job.quantity = 500;
        job.interior_pages = 32;
        job.interior_colors = ColorMode::FourColorVarnish;
        job.cover_colors = Some(ColorMode::Black);

        let signatures = calculate_signatures(32);
        // 2 signatures × 5 plates × 2 sides + 1 × 2 cover plates
        let plates = 2.0 * 5.0 * 2.0 + 2.0;
        // varnish still prints 4 colors per side
        let impressions = 2.0 * 500.0 * 4.0 * 2.0;
        assert!(close(
            press_cost(&job, &rates, &signatures),
            plates * 25.0 + impressions * 0.01
        ));
    }

    #[test]
    fn test_make_ready() {
        let rates = card().offset;
        let mut job = brochure();
        assert!(close(make_ready_cost(&job, &rates), 800.0));

        job.cover_pages = CoverPages::Two;
        job.interior_colors = ColorMode::FourColorVarnish;
        assert!(close(make_ready_cost(&job, &rates), 500.0 * 0.65 + 200.0));

        job.cover_pages = CoverPages::None;
        job.interior_colors = ColorMode::Black;
        assert!(close(make_ready_cost(&job, &rates), 500.0));
    }

    #[test]
    fn test_binding_by_sections_is_capped() {
        let card = card();
        let mut job = brochure();
        job.quantity = 2000;
        job.binding_type = BindingType::PerfectBound;

        // 32 pages = 2 signatures + cover = 3 sections
        let signatures = calculate_signatures(32);
        assert!(close(binding_cost(&job, &card, &signatures), 218.40 + 2.0 * 97.0));

        // 160 pages = 10 signatures + cover, capped to 6
        job.interior_pages = 160;
        let signatures = calculate_signatures(160);
        assert!(close(binding_cost(&job, &card, &signatures), 227.85 + 2.0 * 121.0));
    }

    #[test]
    fn test_single_section_falls_back_to_digital_table() {
        let card = card();
        let mut job = brochure();
        job.quantity = 100;
        job.interior_pages = 16;
        job.cover_pages = CoverPages::None;
        let signatures = calculate_signatures(16);

        job.binding_type = BindingType::SaddleStitched;
        assert!(close(binding_cost(&job, &card, &signatures), 0.23 * 100.0 + 35.0));

        // PUR per-copy rate, sewn setup
        job.binding_type = BindingType::PerfectBoundSewn;
        assert!(close(binding_cost(&job, &card, &signatures), 1.50 * 100.0 + 100.0));
    }

    #[test]
    fn test_fallback_setup_when_digital_setup_missing() {
        let mut card = card();
        card.digital.binding_setup.remove(&BindingType::PerfectBound);
        let mut job = brochure();
        job.quantity = 100;
        job.interior_pages = 16;
        job.cover_pages = CoverPages::None;
        job.binding_type = BindingType::PerfectBound;

        let signatures = calculate_signatures(16);
        assert!(close(binding_cost(&job, &card, &signatures), 1.30 * 100.0 + 70.0));
    }

    #[test]
    fn test_lamination_per_square_meter() {
        let rates = card().offset;
        let mut job = brochure();
        job.quantity = 1000;
        job.lamination_orientation = LaminationOrientation::BothSides;

        let area_m2 = 21.0 * 29.7 / 10_000.0;
        assert!(close(lamination_cost(&job, &rates), area_m2 * 1000.0 * 0.30 + 55.0));

        job.lamination_orientation = LaminationOrientation::None;
        assert_eq!(lamination_cost(&job, &rates), 0.0);
    }

    #[test]
    fn test_supplements() {
        let rates = card().offset;
        let mut job = brochure();

        job.interior_paper_type = "Couché Satin".to_string();
        job.interior_grammage = 135;
        assert_eq!(supplement_rate(&job, &rates).bps(), 500);

        job.interior_paper_type = "Couché Mat".to_string();
        assert_eq!(supplement_rate(&job, &rates).bps(), 1500);

        job.interior_grammage = 115;
        assert_eq!(supplement_rate(&job, &rates).bps(), 0);

        job.interior_paper_type = "Offset".to_string();
        job.interior_grammage = 60;
        assert_eq!(supplement_rate(&job, &rates).bps(), 2000);
    }

    #[test]
    fn test_supplements_fold_into_subtotal() {
        let card = card();
        let mut job = brochure();
        job.interior_paper_type = "Couché Mat".to_string();
        job.interior_grammage = 135;
        let with_supplement = calculate_offset_quote(&job, &card);

        let components = [
            with_supplement.paper_cost,
            with_supplement.printing_cost,
            with_supplement.binding_cost,
            with_supplement.lamination_cost,
            with_supplement.delivery_cost,
        ]
        .iter()
        .map(|m| m.amount())
        .sum::<f64>();

        let expected = components * 1.15;
        assert!((with_supplement.subtotal.amount() - expected).abs() < 0.05);
    }

    #[test]
    fn test_offset_never_prices_folding_or_packaging() {
        let mut job = brochure();
        job.packaging_type = crate::types::PackagingType::Bundled;
        let breakdown = calculate_offset_quote(&job, &card());
        assert!(breakdown.folding_cost.is_zero());
        assert!(breakdown.packaging_cost.is_zero());
        assert_eq!(breakdown.margin_rate, 0.07);
        assert_eq!(breakdown.mode, PrintMode::Offset);
    }
}
