//! Reference rates of the standard card.

use std::collections::BTreeMap;

use super::brackets::{PageRange, QuantityBracket, SheetFormat, WeightBracket, Zone};
use super::paper::PaperKind;
use super::{
    ColorTable, DigitalRates, MakeReadyRates, OffsetLaminationRates, OffsetRates,
    OffsetSupplements, PackagingRate, PaperRates, RateCard, SectionBindingRate, TransportRates,
    ValidationLimits,
};
use crate::types::{BindingType, LaminationFinish, LaminationOrientation, Rate};

pub(super) fn rate_card() -> RateCard {
    RateCard {
        weight_divisor: 9769.0,
        digital_margin: Rate::from_bps(500),
        offset_margin: Rate::from_bps(700),
        paper: paper(),
        digital: digital(),
        offset: offset(),
        transport: transport(),
        validation: ValidationLimits {
            page_multiple: 4,
            min_interior_pages: 4,
            perfect_binding_min_pages: 40,
            saddle_stitch_max_pages: 96,
            digital_max_pages: 280,
            flap_max_total_cm: 76.0,
            max_fold_count: 6,
        },
    }
}

fn grammage_table(entries: &[(u32, f64)]) -> BTreeMap<u32, f64> {
    entries.iter().copied().collect()
}

// =============================================================================
// Paper (€/kg)
// =============================================================================

fn paper() -> PaperRates {
    let coated = grammage_table(&[
        (80, 1.15),
        (90, 1.00),
        (100, 1.00),
        (115, 1.00),
        (130, 1.00),
        (135, 1.00),
        (150, 1.00),
        (170, 1.00),
        (200, 1.00),
        (250, 1.00),
        (300, 1.00),
        (350, 1.00),
        (400, 1.63),
    ]);

    let bulky_munken = grammage_table(&[(80, 2.40), (90, 2.40)]);

    let prices = BTreeMap::from([
        (PaperKind::CoucheMat, coated.clone()),
        (PaperKind::CoucheSatin, coated.clone()),
        (PaperKind::Brillant, coated),
        (
            PaperKind::Recycle,
            grammage_table(&[
                (70, 1.40),
                (80, 1.40),
                (90, 1.40),
                (100, 1.50),
                (115, 1.50),
                (130, 1.405),
                (135, 1.50),
            ]),
        ),
        (
            PaperKind::Offset,
            grammage_table(&[
                (70, 1.16),
                (80, 1.15),
                (90, 1.15),
                (100, 1.25),
                (115, 1.25),
                (250, 1.50),
            ]),
        ),
        (PaperKind::BouffantBlanc, grammage_table(&[(80, 1.60), (90, 1.60)])),
        (PaperKind::BouffantMunkenBlanc, bulky_munken.clone()),
        (PaperKind::BouffantMunkenCreme, bulky_munken),
        (
            PaperKind::Other,
            [80, 90, 100, 115, 130, 135, 150, 170, 200, 250, 300]
                .into_iter()
                .map(|g| (g, 1.20))
                .collect(),
        ),
    ]);

    PaperRates {
        prices,
        default_price: 1.00,
    }
}

// =============================================================================
// Digital
// =============================================================================

fn quantity_brackets(rates: [f64; 6]) -> BTreeMap<QuantityBracket, f64> {
    [
        QuantityBracket::UpTo50,
        QuantityBracket::UpTo200,
        QuantityBracket::UpTo300,
        QuantityBracket::UpTo400,
        QuantityBracket::UpTo500,
        QuantityBracket::Over500,
    ]
    .into_iter()
    .zip(rates)
    .collect()
}

fn page_ranges(
    up_to_72: [f64; 6],
    up_to_152: [f64; 6],
    over_152: [f64; 6],
) -> BTreeMap<PageRange, BTreeMap<QuantityBracket, f64>> {
    BTreeMap::from([
        (PageRange::UpTo72, quantity_brackets(up_to_72)),
        (PageRange::UpTo152, quantity_brackets(up_to_152)),
        (PageRange::Over152, quantity_brackets(over_152)),
    ])
}

fn thresholds<V: Copy>(entries: &[(u32, V)]) -> BTreeMap<u32, V> {
    entries.iter().copied().collect()
}

fn packaging(entries: &[(u32, f64)]) -> BTreeMap<u32, PackagingRate> {
    entries
        .iter()
        .map(|&(threshold, per_unit)| (threshold, PackagingRate { per_unit, fixed: 10.0 }))
        .collect()
}

fn digital() -> DigitalRates {
    let binding = BTreeMap::from([
        (
            BindingType::PerfectBound,
            page_ranges(
                [1.65, 1.30, 1.15, 1.05, 1.00, 0.90],
                [1.80, 1.35, 1.25, 1.15, 1.10, 1.00],
                [1.95, 1.40, 1.30, 1.20, 1.15, 1.05],
            ),
        ),
        (
            BindingType::PerfectBoundPur,
            page_ranges(
                [1.75, 1.50, 1.35, 1.25, 1.15, 1.05],
                [1.90, 1.55, 1.45, 1.35, 1.25, 1.15],
                [2.05, 1.60, 1.50, 1.40, 1.30, 1.20],
            ),
        ),
        (
            BindingType::SaddleStitched,
            page_ranges(
                [0.25, 0.23, 0.22, 0.20, 0.18, 0.15],
                [0.25, 0.23, 0.22, 0.20, 0.18, 0.15],
                [0.0; 6],
            ),
        ),
    ]);

    let folding_thresholds = [100, 250, 500, 1000, 2000];
    let fold_rates: [[f64; 5]; 4] = [
        [0.050, 0.050, 0.040, 0.009, 0.007],
        [0.060, 0.060, 0.048, 0.0108, 0.0084],
        [0.072, 0.072, 0.0576, 0.01296, 0.01008],
        [0.0864, 0.0864, 0.06912, 0.015552, 0.012096],
    ];
    let folding: BTreeMap<u32, BTreeMap<u32, f64>> = (1u32..)
        .zip(fold_rates)
        .map(|(folds, rates)| (folds, folding_thresholds.into_iter().zip(rates).collect()))
        .collect();

    DigitalRates {
        per_side: ColorTable {
            four_color: 0.045,
            four_color_varnish: 0.055,
            two_color: 0.035,
            black: 0.025,
        },
        binding,
        binding_setup: BTreeMap::from([
            (BindingType::None, 0.0),
            (BindingType::PerfectBound, 70.0),
            (BindingType::PerfectBoundPur, 80.0),
            (BindingType::PerfectBoundSewn, 100.0),
            (BindingType::SaddleStitched, 35.0),
        ]),
        saddle_stitch_bulk_setup: 25.0,
        saddle_stitch_bulk_above: 200,
        lamination: BTreeMap::from([
            (
                LaminationOrientation::SingleSide,
                thresholds(&[(100, 0.35), (300, 0.30), (500, 0.25), (1000, 0.20), (2500, 0.15)]),
            ),
            (
                LaminationOrientation::BothSides,
                thresholds(&[(100, 0.55), (300, 0.45), (500, 0.40), (1000, 0.35), (2500, 0.25)]),
            ),
        ]),
        finish_multipliers: BTreeMap::from([
            (LaminationFinish::Matte, 1.0),
            (LaminationFinish::Gloss, 1.0),
            (LaminationFinish::SoftTouch, 1.25),
        ]),
        folding,
        folding_setup: BTreeMap::from([(1, 18.0), (2, 26.0), (3, 33.0), (4, 37.0)]),
        max_folds: 4,
        packaging_brochure: packaging(&[
            (100, 0.07),
            (200, 0.06),
            (300, 0.05),
            (400, 0.04),
            (500, 0.03),
        ]),
        packaging_card: packaging(&[
            (500, 0.0015),
            (1000, 0.0010),
            (2000, 0.0090),
            (4000, 0.0070),
            (6000, 0.0050),
        ]),
        packaging_minimum_fee: 10.0,
    }
}

// =============================================================================
// Offset
// =============================================================================

fn offset() -> OffsetRates {
    let formats = [
        SheetFormat::F64x90,
        SheetFormat::F65x92,
        SheetFormat::F70x102,
        SheetFormat::F72x102,
    ];
    let sheet_rows: [(u32, [f64; 4]); 6] = [
        (70, [40.32, 41.86, 49.98, 51.41]),
        (80, [46.08, 47.80, 57.10, 58.75]),
        (90, [51.84, 53.80, 64.30, 66.10]),
        (100, [57.60, 59.80, 71.40, 73.44]),
        (110, [63.36, 65.78, 78.54, 80.78]),
        (115, [66.24, 68.80, 82.10, 84.45]),
    ];
    let sheet_prices: BTreeMap<u32, BTreeMap<SheetFormat, f64>> = sheet_rows
        .into_iter()
        .map(|(grammage, prices)| (grammage, formats.into_iter().zip(prices).collect()))
        .collect();

    let binding: BTreeMap<u32, SectionBindingRate> = [
        (2, 215.25, 91.0),
        (3, 218.40, 97.0),
        (4, 221.55, 109.0),
        (5, 224.70, 115.0),
        (6, 227.85, 121.0),
    ]
    .into_iter()
    .map(|(sections, setup, running_per_thousand)| {
        (
            sections,
            SectionBindingRate {
                setup,
                running_per_thousand,
            },
        )
    })
    .collect();

    OffsetRates {
        sheet_prices,
        default_interior_sheet_price: 50.0,
        default_cover_sheet_price: 60.0,
        waste_factor: 1.10,
        make_ready: MakeReadyRates {
            interior_base: 500.0,
            varnish_factor: 0.65,
            cover_two_pages: 200.0,
            cover_four_pages: 300.0,
        },
        plates_per_side: ColorTable {
            four_color: 4,
            four_color_varnish: 5,
            two_color: 2,
            black: 1,
        },
        colors_per_side: ColorTable {
            four_color: 4,
            four_color_varnish: 4,
            two_color: 2,
            black: 1,
        },
        plate_price: 25.0,
        impression_price: 0.01,
        binding,
        max_binding_sections: 6,
        binding_fallback_setup: 70.0,
        lamination: OffsetLaminationRates {
            single_side: 0.25,
            both_sides: 0.30,
            setup: 55.0,
        },
        supplements: OffsetSupplements {
            heavy_coated_above: 115,
            satin_heavy: Rate::from_bps(500),
            matte_heavy: Rate::from_bps(1500),
            light_paper_below: 70,
            light_paper: Rate::from_bps(2000),
        },
    }
}

// =============================================================================
// Transport
// =============================================================================

const ZONE_A: &[&str] = &["75", "77", "78", "91", "92", "93", "94", "95"];
const ZONE_B: &[&str] = &[
    "27", "28", "45", "60", "76", "80", "02", "10", "51", "89", "14", "50", "61",
];
const ZONE_C: &[&str] = &[
    "21", "25", "39", "58", "70", "71", "90", "08", "52", "54", "55", "57", "67", "68", "88", "18",
    "36", "37", "41", "44", "49", "53", "72", "85", "22", "29", "35", "56",
];

fn transport() -> TransportRates {
    let zones: BTreeMap<String, Zone> = [(Zone::A, ZONE_A), (Zone::B, ZONE_B), (Zone::C, ZONE_C)]
        .into_iter()
        .flat_map(|(zone, codes)| codes.iter().map(move |code| (code.to_string(), zone)))
        .collect();

    let brackets = [
        WeightBracket::UpTo5,
        WeightBracket::UpTo10,
        WeightBracket::UpTo20,
        WeightBracket::UpTo30,
        WeightBracket::UpTo50,
        WeightBracket::UpTo100,
        WeightBracket::UpTo200,
        WeightBracket::UpTo500,
        WeightBracket::Over500,
    ];
    let rows: [(Zone, [f64; 9]); 4] = [
        (Zone::A, [15.0, 20.0, 28.0, 35.0, 45.0, 65.0, 95.0, 145.0, 220.0]),
        (Zone::B, [18.0, 25.0, 35.0, 45.0, 58.0, 85.0, 125.0, 185.0, 280.0]),
        (Zone::C, [22.0, 32.0, 45.0, 58.0, 75.0, 110.0, 165.0, 245.0, 380.0]),
        (Zone::D, [28.0, 42.0, 58.0, 75.0, 98.0, 145.0, 220.0, 340.0, 520.0]),
    ];
    let costs: BTreeMap<Zone, BTreeMap<WeightBracket, f64>> = rows
        .into_iter()
        .map(|(zone, prices)| (zone, brackets.into_iter().zip(prices).collect()))
        .collect();

    TransportRates {
        zones,
        costs,
        tail_lift_surcharge: 60.0,
    }
}
