//! Invariants that hold for every job, checked with proptest.

use proptest::prelude::*;
use std::collections::BTreeMap;

use pressquote_core::rate_card::brackets::{PageRange, QuantityBracket, WeightBracket};
use pressquote_core::rate_card::lookup::{at_or_above, nearest};
use pressquote_core::rate_card::RateCard;
use pressquote_core::{
    calculate_digital_quote, calculate_offset_quote, BindingType, ColorMode, CostBreakdown,
    CoverPages, Delivery, JobDescription, LaminationFinish, LaminationOrientation, PackagingType,
    ProductType,
};

// =============================================================================
// Strategies
// =============================================================================

fn color_mode() -> impl Strategy<Value = ColorMode> {
    prop_oneof![
        Just(ColorMode::FourColor),
        Just(ColorMode::FourColorVarnish),
        Just(ColorMode::TwoColor),
        Just(ColorMode::Black),
    ]
}

fn binding_type() -> impl Strategy<Value = BindingType> {
    prop_oneof![
        Just(BindingType::None),
        Just(BindingType::PerfectBound),
        Just(BindingType::PerfectBoundPur),
        Just(BindingType::PerfectBoundSewn),
        Just(BindingType::SaddleStitched),
    ]
}

fn lamination() -> impl Strategy<Value = LaminationOrientation> {
    prop_oneof![
        Just(LaminationOrientation::None),
        Just(LaminationOrientation::SingleSide),
        Just(LaminationOrientation::BothSides),
    ]
}

fn product_type() -> impl Strategy<Value = ProductType> {
    prop_oneof![
        Just(ProductType::Brochure),
        Just(ProductType::FlyerPoster),
        Just(ProductType::BusinessCard),
        Just(ProductType::Leaflet),
    ]
}

fn paper_label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Couché Mat".to_string()),
        Just("Couché Satin".to_string()),
        Just("Recyclé".to_string()),
        Just("Offset".to_string()),
        Just("Bouffant Munken Crème".to_string()),
        Just("Kraft".to_string()),
    ]
}

prop_compose! {
    fn arb_job()(
        quantity in 1u32..20_000,
        width in 5.0f64..45.0,
        height in 5.0f64..65.0,
        quarter_pages in 1u32..70,
        cover_pages in prop_oneof![Just(CoverPages::None), Just(CoverPages::Two), Just(CoverPages::Four)],
        interior_paper in paper_label(),
        interior_grammage in 60u32..400,
        cover_grammage in 150u32..400,
        interior_colors in color_mode(),
        cover_colors in color_mode(),
        binding_type in binding_type(),
        lamination_orientation in lamination(),
        product_type in product_type(),
        fold_count in proptest::option::of(1u32..=6),
        department in "[0-9]{2}",
        tail_lift in any::<bool>(),
    ) -> JobDescription {
        JobDescription {
            quantity,
            format_width: width,
            format_height: height,
            flap_width: None,
            interior_pages: quarter_pages * 4,
            cover_pages,
            interior_paper_type: interior_paper,
            interior_grammage,
            cover_paper_type: Some("Couché Mat".to_string()),
            cover_grammage: Some(cover_grammage),
            interior_colors,
            cover_colors: Some(cover_colors),
            binding_type,
            lamination_orientation,
            lamination_finish: Some(LaminationFinish::SoftTouch),
            product_type,
            fold_type: None,
            fold_count,
            packaging_type: PackagingType::Bundled,
            deliveries: vec![Delivery { quantity, department, tail_lift }],
        }
    }
}

fn assert_margin_identity(b: &CostBreakdown, quantity: u32) {
    let subtotal = b.subtotal.cents();
    let margin = b.margin_amount.cents();
    let total = b.total_price.cents();

    assert!((subtotal + margin - total).abs() <= 1, "{b:?}");

    let expected_margin = (b.subtotal.amount() * b.margin_rate * 100.0).round() as i64;
    assert!((margin - expected_margin).abs() <= 1, "{b:?}");

    let expected_unit = (b.total_price.amount() / f64::from(quantity) * 100.0).round() as i64;
    assert!((b.price_per_unit.cents() - expected_unit).abs() <= 1, "{b:?}");
}

// =============================================================================
// Breakdown Invariants
// =============================================================================

proptest! {
    #[test]
    fn test_margin_identity_holds_for_both_modes(job in arb_job()) {
        let card = RateCard::standard();

        let digital = calculate_digital_quote(&job, &card);
        prop_assert_eq!(digital.margin_rate, 0.05);
        assert_margin_identity(&digital, job.quantity);

        let offset = calculate_offset_quote(&job, &card);
        prop_assert_eq!(offset.margin_rate, 0.07);
        assert_margin_identity(&offset, job.quantity);
    }

    #[test]
    fn test_costs_are_never_negative(job in arb_job()) {
        let card = RateCard::standard();
        for b in [calculate_digital_quote(&job, &card), calculate_offset_quote(&job, &card)] {
            for cost in [
                b.paper_cost, b.printing_cost, b.binding_cost, b.lamination_cost,
                b.folding_cost, b.packaging_cost, b.delivery_cost, b.subtotal,
            ] {
                prop_assert!(cost.cents() >= 0);
            }
        }
    }

    #[test]
    fn test_no_cover_means_no_cover_terms(mut job in arb_job()) {
        let card = RateCard::standard();
        job.cover_pages = CoverPages::None;
        let with_cover_fields = job.clone();

        job.cover_paper_type = None;
        job.cover_grammage = None;
        job.cover_colors = None;

        for calculate in [calculate_digital_quote, calculate_offset_quote] {
            let a = calculate(&with_cover_fields, &card);
            let b = calculate(&job, &card);
            prop_assert_eq!(a.paper_cost, b.paper_cost);
            prop_assert_eq!(a.printing_cost, b.printing_cost);
            prop_assert_eq!(a.lamination_cost, b.lamination_cost);
            prop_assert_eq!(a.weight_per_copy, b.weight_per_copy);
        }
    }

    #[test]
    fn test_total_weight_grows_with_quantity(job in arb_job(), extra in 100u32..5_000) {
        // The lightest generated copy weighs over 0.3 g, so 100 extra copies
        // add more than the 0.01 kg that total_weight resolves.
        let card = RateCard::standard();
        let mut bigger = job.clone();
        bigger.quantity += extra;

        for calculate in [calculate_digital_quote, calculate_offset_quote] {
            let small = calculate(&job, &card);
            let large = calculate(&bigger, &card);

            prop_assert_eq!(small.weight_per_copy, large.weight_per_copy);
            prop_assert!(large.total_weight > small.total_weight);
        }
    }

    #[test]
    fn test_paper_cost_scales_with_quantity(job in arb_job()) {
        let card = RateCard::standard();
        let mut doubled = job.clone();
        doubled.quantity *= 2;

        let single = calculate_digital_quote(&job, &card).paper_cost.cents();
        let double = calculate_digital_quote(&doubled, &card).paper_cost.cents();
        prop_assert!((double - 2 * single).abs() <= 1);

        // Offset counts whole sheets: doubling can save at most one interior
        // and one cover sheet to rounding.
        let offset = &card.offset;
        let dearest_sheet = offset
            .sheet_prices
            .values()
            .flat_map(|row| row.values())
            .chain([&offset.default_interior_sheet_price, &offset.default_cover_sheet_price])
            .fold(0.0_f64, |max, price| max.max(*price));
        let tolerance = (2.0 * dearest_sheet / 1000.0 * 100.0).ceil() as i64 + 1;

        let single = calculate_offset_quote(&job, &card).paper_cost.cents();
        let double = calculate_offset_quote(&doubled, &card).paper_cost.cents();
        prop_assert!((double - 2 * single).abs() <= tolerance, "{double} vs 2 × {single}");
    }

    #[test]
    fn test_digital_printing_scales_linearly(job in arb_job()) {
        let card = RateCard::standard();
        let mut doubled = job.clone();
        doubled.quantity *= 2;

        let single = calculate_digital_quote(&job, &card).printing_cost.cents();
        let double = calculate_digital_quote(&doubled, &card).printing_cost.cents();
        prop_assert!((double - 2 * single).abs() <= 1);
    }
}

// =============================================================================
// Selector Invariants
// =============================================================================

proptest! {
    #[test]
    fn test_bracket_selectors_are_monotonic(a in 0u32..100_000, b in 0u32..100_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(PageRange::for_pages(lo) <= PageRange::for_pages(hi));
        prop_assert!(QuantityBracket::for_quantity(lo) <= QuantityBracket::for_quantity(hi));

        let (lo_kg, hi_kg) = (f64::from(lo) / 100.0, f64::from(hi) / 100.0);
        prop_assert!(WeightBracket::for_weight(lo_kg) <= WeightBracket::for_weight(hi_kg));
    }

    #[test]
    fn test_at_or_above_picks_smallest_qualifying_threshold(
        keys in proptest::collection::btree_set(1u32..10_000, 1..10),
        value in 0u32..12_000,
    ) {
        let table: BTreeMap<u32, u32> = keys.iter().map(|k| (*k, *k)).collect();
        let (picked, _) = at_or_above(&table, value).unwrap();

        match keys.iter().find(|k| **k >= value) {
            Some(expected) => prop_assert_eq!(picked, *expected),
            None => prop_assert_eq!(Some(&picked), keys.iter().next_back()),
        }
    }

    #[test]
    fn test_nearest_minimizes_distance(
        keys in proptest::collection::btree_set(0u32..1_000, 1..15),
        value in 0u32..1_200,
    ) {
        let table: BTreeMap<u32, ()> = keys.iter().map(|k| (*k, ())).collect();
        let (picked, _) = nearest(&table, value).unwrap();

        let best = keys.iter().map(|k| k.abs_diff(value)).min().unwrap();
        prop_assert_eq!(picked.abs_diff(value), best);
    }
}
