//! # Rate Card Store
//!
//! Immutable lookup tables and scalar constants consumed by both calculators.
//!
//! ## Table Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            RateCard                                     │
//! │                                                                         │
//! │  paper       PaperKind × grammage           → €/kg (nearest grammage)  │
//! │  digital     ColorMode                      → € per printed side       │
//! │              BindingType × PageRange × Qty  → € per copy (+ setup)     │
//! │              orientation × threshold        → € per copy (lamination)  │
//! │              folds × threshold              → € per copy (+ setup)     │
//! │              brochure/card × threshold      → packaging {unit, fixed}  │
//! │  offset      grammage × SheetFormat         → € per 1000 sheets        │
//! │              make-ready, plates, impressions, sections → binding       │
//! │              lamination €/m², % supplements                            │
//! │  transport   department → Zone, Zone × WeightBracket → € per parcel    │
//! │  validation  page / binding / flap limits enforced by the caller       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifetime
//! A `RateCard` is built once ([`RateCard::standard`] or
//! [`RateCard::from_json`]) and then only read. Calculators take it by shared
//! reference, so concurrent quotes need no coordination.
//!
//! ## Fallbacks
//! Lookups never fail: unknown paper labels price as `autre`, unknown
//! grammages use the nearest listed one, thresholds clamp to the largest,
//! unmapped destinations go to the farthest zone.

pub mod brackets;
pub mod lookup;
pub mod paper;
mod standard;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::trace;

use crate::error::{CoreError, CoreResult};
use crate::types::{BindingType, ColorMode, LaminationFinish, LaminationOrientation, Rate};
use brackets::{PageRange, QuantityBracket, SheetFormat, WeightBracket, Zone};
use lookup::{nearest, ThresholdTable};
use paper::PaperKind;

// =============================================================================
// Rate Card
// =============================================================================

/// The complete set of rates used to price a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCard {
    /// Converts cm² × sheets × g/m² into grams.
    pub weight_divisor: f64,
    pub digital_margin: Rate,
    pub offset_margin: Rate,
    pub paper: PaperRates,
    pub digital: DigitalRates,
    pub offset: OffsetRates,
    pub transport: TransportRates,
    pub validation: ValidationLimits,
}

impl RateCard {
    /// The reference rate card.
    pub fn standard() -> Self {
        standard::rate_card()
    }

    /// Process-wide shared copy of [`RateCard::standard`].
    pub fn global() -> &'static RateCard {
        static STANDARD: OnceLock<RateCard> = OnceLock::new();
        STANDARD.get_or_init(RateCard::standard)
    }

    /// Parses a rate card document and checks it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let card: RateCard = serde_json::from_str(json)?;
        card.validate()?;
        Ok(card)
    }

    /// Checks the card invariants: no negative or non-finite rate, no empty
    /// threshold table, positive weight divisor, a lamination table for every
    /// orientation and a folding rate and setup for every fold count up to
    /// `maxFolds`.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.weight_divisor.is_finite() && self.weight_divisor > 0.0) {
            return Err(invalid("weightDivisor must be positive"));
        }

        let mut rates: Vec<(&str, f64)> = Vec::new();
        rates.push(("paper.defaultPrice", self.paper.default_price));
        rates.extend(self.paper.prices.values().flat_map(|t| t.values()).map(|v| ("paper.prices", *v)));
        self.digital.collect_rates(&mut rates);
        self.offset.collect_rates(&mut rates);
        self.transport.collect_rates(&mut rates);

        if let Some((table, value)) = rates.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            return Err(invalid(&format!("{table} contains an invalid rate ({value})")));
        }

        let empty_threshold_table = self.digital.lamination.values().any(|t| t.is_empty())
            || self.digital.folding.values().any(|t| t.is_empty())
            || self.digital.packaging_brochure.is_empty()
            || self.digital.packaging_card.is_empty();
        if empty_threshold_table {
            return Err(invalid("threshold tables must not be empty"));
        }

        for orientation in [LaminationOrientation::SingleSide, LaminationOrientation::BothSides] {
            if !self.digital.lamination.contains_key(&orientation) {
                return Err(invalid(&format!("digital.lamination has no {orientation:?} table")));
            }
        }

        for folds in 1..=self.digital.max_folds {
            if !self.digital.folding.contains_key(&folds)
                || !self.digital.folding_setup.contains_key(&folds)
            {
                return Err(invalid(&format!("digital.folding has no rate for {folds} folds")));
            }
        }

        Ok(())
    }

    /// Paper price in €/kg for a label and grammage.
    pub fn paper_rate(&self, label: &str, grammage: u32) -> f64 {
        self.paper.rate(PaperKind::from_label(label), grammage)
    }
}

impl Default for RateCard {
    fn default() -> Self {
        RateCard::standard()
    }
}

fn invalid(reason: &str) -> CoreError {
    CoreError::InvalidRateCard {
        reason: reason.to_string(),
    }
}

// =============================================================================
// Shared Value Types
// =============================================================================

/// One value per color mode. Exhaustive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorTable<T> {
    #[serde(rename = "quadrichromie")]
    pub four_color: T,
    #[serde(rename = "quadrichromie_vernis")]
    pub four_color_varnish: T,
    #[serde(rename = "bichromie")]
    pub two_color: T,
    #[serde(rename = "noir")]
    pub black: T,
}

impl<T: Copy> ColorTable<T> {
    pub fn get(&self, mode: ColorMode) -> T {
        match mode {
            ColorMode::FourColor => self.four_color,
            ColorMode::FourColorVarnish => self.four_color_varnish,
            ColorMode::TwoColor => self.two_color,
            ColorMode::Black => self.black,
        }
    }
}

/// A per-copy rate with a fixed fee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingRate {
    pub per_unit: f64,
    pub fixed: f64,
}

/// Setup plus running cost per 1000 copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBindingRate {
    pub setup: f64,
    pub running_per_thousand: f64,
}

// =============================================================================
// Paper
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRates {
    /// €/kg by paper type and grammage. Grammages not sold for a type are
    /// simply absent.
    pub prices: BTreeMap<PaperKind, BTreeMap<u32, f64>>,
    /// Used when a type has no usable entry at all.
    pub default_price: f64,
}

impl PaperRates {
    /// Exact grammage, else nearest listed grammage, else the default price.
    pub fn rate(&self, kind: PaperKind, grammage: u32) -> f64 {
        let Some(table) = self.prices.get(&kind) else {
            trace!(?kind, "paper type missing from rate card, using default price");
            return self.default_price;
        };

        if let Some(price) = table.get(&grammage) {
            return *price;
        }

        match nearest(table, grammage) {
            Some((closest, price)) => {
                trace!(?kind, grammage, closest, "using nearest paper grammage");
                *price
            }
            None => self.default_price,
        }
    }
}

// =============================================================================
// Digital
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalRates {
    /// € per printed side.
    pub per_side: ColorTable<f64>,
    /// € per copy. Sewn binding has no entry.
    pub binding: BTreeMap<BindingType, BTreeMap<PageRange, BTreeMap<QuantityBracket, f64>>>,
    pub binding_setup: BTreeMap<BindingType, f64>,
    /// Saddle-stitch setup once the run exceeds `saddle_stitch_bulk_above`.
    pub saddle_stitch_bulk_setup: f64,
    pub saddle_stitch_bulk_above: u32,
    /// € per copy by orientation and quantity threshold.
    pub lamination: BTreeMap<LaminationOrientation, ThresholdTable<f64>>,
    pub finish_multipliers: BTreeMap<LaminationFinish, f64>,
    /// € per copy by fold count and quantity threshold.
    pub folding: BTreeMap<u32, ThresholdTable<f64>>,
    pub folding_setup: BTreeMap<u32, f64>,
    pub max_folds: u32,
    /// Brochures and leaflets.
    pub packaging_brochure: ThresholdTable<PackagingRate>,
    /// Business cards.
    pub packaging_card: ThresholdTable<PackagingRate>,
    pub packaging_minimum_fee: f64,
}

impl DigitalRates {
    /// Per-copy binding rate; 0 when the table has no entry.
    pub fn binding_per_unit(&self, binding: BindingType, pages: u32, quantity: u32) -> f64 {
        self.binding
            .get(&binding)
            .and_then(|ranges| ranges.get(&PageRange::for_pages(pages)))
            .and_then(|brackets| brackets.get(&QuantityBracket::for_quantity(quantity)))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn binding_setup(&self, binding: BindingType) -> Option<f64> {
        self.binding_setup.get(&binding).copied()
    }

    pub fn finish_multiplier(&self, finish: Option<LaminationFinish>) -> f64 {
        finish
            .and_then(|f| self.finish_multipliers.get(&f).copied())
            .unwrap_or(1.0)
    }

    fn collect_rates<'a>(&'a self, out: &mut Vec<(&'a str, f64)>) {
        for (name, v) in [
            ("digital.perSide", self.per_side.four_color),
            ("digital.perSide", self.per_side.four_color_varnish),
            ("digital.perSide", self.per_side.two_color),
            ("digital.perSide", self.per_side.black),
            ("digital.saddleStitchBulkSetup", self.saddle_stitch_bulk_setup),
            ("digital.packagingMinimumFee", self.packaging_minimum_fee),
        ] {
            out.push((name, v));
        }
        out.extend(
            self.binding
                .values()
                .flat_map(|r| r.values())
                .flat_map(|b| b.values())
                .map(|v| ("digital.binding", *v)),
        );
        out.extend(self.binding_setup.values().map(|v| ("digital.bindingSetup", *v)));
        out.extend(self.lamination.values().flat_map(|t| t.values()).map(|v| ("digital.lamination", *v)));
        out.extend(self.finish_multipliers.values().map(|v| ("digital.finishMultipliers", *v)));
        out.extend(self.folding.values().flat_map(|t| t.values()).map(|v| ("digital.folding", *v)));
        out.extend(self.folding_setup.values().map(|v| ("digital.foldingSetup", *v)));
        for rate in self.packaging_brochure.values().chain(self.packaging_card.values()) {
            out.push(("digital.packaging", rate.per_unit));
            out.push(("digital.packaging", rate.fixed));
        }
    }
}

// =============================================================================
// Offset
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeReadyRates {
    pub interior_base: f64,
    /// Multiplies the interior base when the interior is varnished.
    pub varnish_factor: f64,
    pub cover_two_pages: f64,
    pub cover_four_pages: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetLaminationRates {
    /// €/m².
    pub single_side: f64,
    /// €/m².
    pub both_sides: f64,
    pub setup: f64,
}

/// Percentage add-ons applied to the offset subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetSupplements {
    /// Satin/matte coated surcharges apply strictly above this grammage.
    pub heavy_coated_above: u32,
    pub satin_heavy: Rate,
    pub matte_heavy: Rate,
    /// Light paper surcharge applies strictly below this grammage.
    pub light_paper_below: u32,
    pub light_paper: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetRates {
    /// € per 1000 sheets by grammage and press sheet format.
    pub sheet_prices: BTreeMap<u32, BTreeMap<SheetFormat, f64>>,
    pub default_interior_sheet_price: f64,
    pub default_cover_sheet_price: f64,
    /// Sheets bought per sheet printed (1.10 = 10% waste).
    pub waste_factor: f64,
    pub make_ready: MakeReadyRates,
    pub plates_per_side: ColorTable<u32>,
    pub colors_per_side: ColorTable<u32>,
    pub plate_price: f64,
    pub impression_price: f64,
    /// Keyed by section count (signatures + cover).
    pub binding: BTreeMap<u32, SectionBindingRate>,
    pub max_binding_sections: u32,
    /// Setup used when the section table has no entry and no digital setup
    /// exists for the binding type.
    pub binding_fallback_setup: f64,
    pub lamination: OffsetLaminationRates,
    pub supplements: OffsetSupplements,
}

impl OffsetRates {
    /// Price per 1000 sheets for an exact grammage, if listed.
    pub fn sheet_price(&self, grammage: u32, format: SheetFormat) -> Option<f64> {
        self.sheet_prices
            .get(&grammage)
            .and_then(|formats| formats.get(&format))
            .copied()
    }

    fn collect_rates<'a>(&'a self, out: &mut Vec<(&'a str, f64)>) {
        out.extend(self.sheet_prices.values().flat_map(|t| t.values()).map(|v| ("offset.sheetPrices", *v)));
        for (name, v) in [
            ("offset.defaultInteriorSheetPrice", self.default_interior_sheet_price),
            ("offset.defaultCoverSheetPrice", self.default_cover_sheet_price),
            ("offset.wasteFactor", self.waste_factor),
            ("offset.makeReady", self.make_ready.interior_base),
            ("offset.makeReady", self.make_ready.varnish_factor),
            ("offset.makeReady", self.make_ready.cover_two_pages),
            ("offset.makeReady", self.make_ready.cover_four_pages),
            ("offset.platePrice", self.plate_price),
            ("offset.impressionPrice", self.impression_price),
            ("offset.bindingFallbackSetup", self.binding_fallback_setup),
            ("offset.lamination", self.lamination.single_side),
            ("offset.lamination", self.lamination.both_sides),
            ("offset.lamination", self.lamination.setup),
        ] {
            out.push((name, v));
        }
        for rate in self.binding.values() {
            out.push(("offset.binding", rate.setup));
            out.push(("offset.binding", rate.running_per_thousand));
        }
    }
}

// =============================================================================
// Transport
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRates {
    /// Department prefix → zone. Unlisted prefixes are zone D.
    pub zones: BTreeMap<String, Zone>,
    /// € per parcel by zone and weight bracket.
    pub costs: BTreeMap<Zone, BTreeMap<WeightBracket, f64>>,
    /// Added per destination requiring a tail lift.
    pub tail_lift_surcharge: f64,
}

impl TransportRates {
    /// Parcel price, falling back to the zone's heaviest bracket.
    pub fn parcel_cost(&self, zone: Zone, bracket: WeightBracket) -> f64 {
        let Some(table) = self.costs.get(&zone) else {
            trace!(?zone, "zone missing from transport table");
            return 0.0;
        };
        table
            .get(&bracket)
            .or_else(|| table.get(&WeightBracket::HEAVIEST))
            .copied()
            .unwrap_or(0.0)
    }

    fn collect_rates<'a>(&'a self, out: &mut Vec<(&'a str, f64)>) {
        out.extend(self.costs.values().flat_map(|t| t.values()).map(|v| ("transport.costs", *v)));
        out.push(("transport.tailLiftSurcharge", self.tail_lift_surcharge));
    }
}

// =============================================================================
// Validation Limits
// =============================================================================

/// Thresholds the caller enforces before invoking a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationLimits {
    pub page_multiple: u32,
    pub min_interior_pages: u32,
    pub perfect_binding_min_pages: u32,
    pub saddle_stitch_max_pages: u32,
    pub digital_max_pages: u32,
    /// Maximum of 2 × width + flap, in cm.
    pub flap_max_total_cm: f64,
    pub max_fold_count: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_card_is_valid() {
        assert!(RateCard::standard().validate().is_ok());
        assert_eq!(RateCard::global(), &RateCard::standard());
    }

    #[test]
    fn test_paper_rate_exact_and_nearest() {
        let card = RateCard::standard();
        assert_eq!(card.paper_rate("Couché Mat", 135), 1.00);
        assert_eq!(card.paper_rate("Couché Mat", 400), 1.63);
        // 70g is not sold in coated matte: nearest listed is 80g
        assert_eq!(card.paper_rate("Couché Mat", 70), 1.15);
        assert_eq!(card.paper_rate("Recyclé", 130), 1.405);
        // 300g offset is not listed: nearest is 250g
        assert_eq!(card.paper_rate("Offset", 300), 1.50);
        assert_eq!(card.paper_rate("Bouffant Munken Crème", 90), 2.40);
    }

    #[test]
    fn test_unknown_paper_uses_other_rates() {
        let card = RateCard::standard();
        assert_eq!(card.paper_rate("Kraft", 90), 1.20);
        assert_eq!(card.paper_rate("Carte 1 face", 350), 1.20);
    }

    #[test]
    fn test_paper_default_when_type_missing() {
        let mut card = RateCard::standard();
        card.paper.prices.remove(&PaperKind::Other);
        assert_eq!(card.paper_rate("Kraft", 90), card.paper.default_price);
    }

    #[test]
    fn test_parcel_cost_falls_back_to_heaviest_bracket() {
        let mut card = RateCard::standard();
        card.transport
            .costs
            .get_mut(&Zone::B)
            .unwrap()
            .remove(&WeightBracket::UpTo10);

        assert_eq!(card.transport.parcel_cost(Zone::B, WeightBracket::UpTo10), 280.0);
        assert_eq!(card.transport.parcel_cost(Zone::A, WeightBracket::UpTo5), 15.0);
    }

    #[test]
    fn test_from_json_round_trips_standard_card() {
        let json = serde_json::to_string(&RateCard::standard()).unwrap();
        let card = RateCard::from_json(&json).unwrap();
        assert_eq!(card, RateCard::standard());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut card = RateCard::standard();
        card.transport.tail_lift_surcharge = -1.0;
        let err = card.validate().unwrap_err();
        assert!(err.to_string().contains("transport.tailLiftSurcharge"));
    }

    #[test]
    fn test_empty_threshold_table_rejected() {
        let mut card = RateCard::standard();
        card.digital.packaging_card.clear();
        assert!(matches!(card.validate(), Err(CoreError::InvalidRateCard { .. })));
    }

    #[test]
    fn test_card_missing_fold_count_rejected() {
        let mut card = RateCard::standard();
        card.digital.folding.remove(&3);
        let json = serde_json::to_string(&card).unwrap();

        let err = RateCard::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("3 folds"));

        let mut card = RateCard::standard();
        card.digital.folding_setup.remove(&1);
        assert!(matches!(card.validate(), Err(CoreError::InvalidRateCard { .. })));
    }

    #[test]
    fn test_card_missing_lamination_orientation_rejected() {
        let mut card = RateCard::standard();
        card.digital.lamination.remove(&LaminationOrientation::BothSides);
        let json = serde_json::to_string(&card).unwrap();

        let err = RateCard::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("BothSides"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(RateCard::from_json("{"), Err(CoreError::RateCardParse(_))));
    }
}
