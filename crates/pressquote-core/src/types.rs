//! # Domain Types
//!
//! Core domain types shared by both calculators.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ JobDescription  │   │    Delivery     │   │  CostBreakdown  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  quantity       │   │  quantity       │   │  paper .. total │       │
//! │  │  format, pages  │   │  department     │   │  margin         │       │
//! │  │  papers, colors │   │  tail_lift      │   │  weights        │       │
//! │  │  finishing      │   └─────────────────┘   └─────────────────┘       │
//! │  │  deliveries     │                                                    │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ColorMode     │   │  BindingType    │   │      Rate       │       │
//! │  │  quadrichromie  │   │  rien, piqure   │   │  bps (u32)      │       │
//! │  │  bichromie ...  │   │  dos carré ...  │   │  500 = 5%       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Enum tags serialize to the labels the quote wizard sends
//! (`quadrichromie`, `dos_carre_colle`, `recto_verso`, ...).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{round_decimals, Money};

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 500 bps = 5% (the digital margin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (500 bps → 0.05).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl std::ops::Add for Rate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Rate(self.0 + other.0)
    }
}

// =============================================================================
// Print Mode
// =============================================================================

/// Manufacturing process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PrintMode {
    /// Short-run digital printing.
    Digital,
    /// Plate-based volume printing.
    Offset,
}

impl Default for PrintMode {
    fn default() -> Self {
        PrintMode::Digital
    }
}

// =============================================================================
// Job Options
// =============================================================================

/// Color mode of a printed part (interior or cover).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ColorMode {
    /// CMYK.
    #[serde(rename = "quadrichromie")]
    FourColor,
    /// CMYK plus machine varnish.
    #[serde(rename = "quadrichromie_vernis")]
    FourColorVarnish,
    /// Two spot colors.
    #[serde(rename = "bichromie")]
    TwoColor,
    /// Black only.
    #[serde(rename = "noir")]
    Black,
}

/// Binding process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BindingType {
    #[serde(rename = "rien")]
    None,
    /// Perfect binding (hot-melt glue).
    #[serde(rename = "dos_carre_colle")]
    PerfectBound,
    /// Perfect binding with PUR glue.
    #[serde(rename = "dos_carre_colle_pur")]
    PerfectBoundPur,
    /// Sewn perfect binding.
    #[serde(rename = "dos_carre_colle_couture")]
    PerfectBoundSewn,
    /// Saddle stitching (staples).
    #[serde(rename = "piqure")]
    SaddleStitched,
}

impl BindingType {
    /// Whether this is one of the perfect-binding variants.
    pub fn is_perfect_bound(&self) -> bool {
        matches!(
            self,
            BindingType::PerfectBound | BindingType::PerfectBoundPur | BindingType::PerfectBoundSewn
        )
    }
}

/// Which faces get laminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LaminationOrientation {
    #[serde(rename = "non")]
    None,
    #[serde(rename = "recto")]
    SingleSide,
    #[serde(rename = "recto_verso")]
    BothSides,
}

/// Lamination film finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LaminationFinish {
    #[serde(rename = "mat")]
    Matte,
    #[serde(rename = "brillant")]
    Gloss,
    #[serde(rename = "soft_touch")]
    SoftTouch,
}

/// Product family, which drives folding and packaging rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProductType {
    #[serde(rename = "brochure")]
    Brochure,
    #[serde(rename = "flyer_poster")]
    FlyerPoster,
    #[serde(rename = "carte_visite")]
    BusinessCard,
    /// Folded leaflet (dépliant).
    #[serde(rename = "depliant")]
    Leaflet,
}

/// Fold pattern of a leaflet. Informational: cost depends on the fold count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FoldType {
    #[serde(rename = "roule")]
    Rolled,
    #[serde(rename = "accordeon")]
    Accordion,
    #[serde(rename = "croise")]
    Cross,
    #[serde(rename = "rien")]
    None,
}

/// Packaging option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PackagingType {
    #[serde(rename = "non")]
    None,
    #[serde(rename = "a_lunite")]
    Individually,
    #[serde(rename = "par_paquet")]
    Bundled,
    #[serde(rename = "par_2")]
    By2,
    #[serde(rename = "par_3")]
    By3,
    #[serde(rename = "par_4")]
    By4,
    #[serde(rename = "par_5_10")]
    By5To10,
}

impl Default for PackagingType {
    fn default() -> Self {
        PackagingType::None
    }
}

/// Number of cover pages: none, 2 (recto) or 4 (recto-verso).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CoverPages {
    None,
    Two,
    Four,
}

impl CoverPages {
    /// Page count as a number.
    pub const fn count(&self) -> u32 {
        match self {
            CoverPages::None => 0,
            CoverPages::Two => 2,
            CoverPages::Four => 4,
        }
    }
}

impl Default for CoverPages {
    fn default() -> Self {
        CoverPages::None
    }
}

impl TryFrom<u32> for CoverPages {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CoverPages::None),
            2 => Ok(CoverPages::Two),
            4 => Ok(CoverPages::Four),
            other => Err(format!("cover pages must be 0, 2 or 4, got {other}")),
        }
    }
}

impl From<CoverPages> for u32 {
    fn from(cover: CoverPages) -> u32 {
        cover.count()
    }
}

// =============================================================================
// Delivery
// =============================================================================

/// One delivery destination of a split shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Copies shipped to this destination.
    pub quantity: u32,
    /// Destination department code ("75", "2A", "971").
    pub department: String,
    /// Truck with tail lift required (no loading dock).
    #[serde(default)]
    pub tail_lift: bool,
}

// =============================================================================
// Job Description
// =============================================================================

/// A normalized print job, the input of both calculators.
///
/// ## Preconditions
/// The caller has validated the job (see [`crate::validation`]). In
/// particular `quantity >= 1`; the calculators divide by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    /// Number of copies.
    pub quantity: u32,
    /// Finished width in cm.
    pub format_width: f64,
    /// Finished height in cm.
    pub format_height: f64,
    /// Cover flap (rabat) width in cm. Offset only.
    #[serde(default)]
    pub flap_width: Option<f64>,
    /// Interior pages, a positive multiple of 4 by convention.
    pub interior_pages: u32,
    #[serde(default)]
    #[ts(as = "u32")]
    pub cover_pages: CoverPages,
    /// Free-form paper label ("Couché Mat", "Recyclé", ...).
    pub interior_paper_type: String,
    /// Interior grammage in g/m².
    pub interior_grammage: u32,
    #[serde(default)]
    pub cover_paper_type: Option<String>,
    #[serde(default)]
    pub cover_grammage: Option<u32>,
    pub interior_colors: ColorMode,
    #[serde(default)]
    pub cover_colors: Option<ColorMode>,
    pub binding_type: BindingType,
    pub lamination_orientation: LaminationOrientation,
    #[serde(default)]
    pub lamination_finish: Option<LaminationFinish>,
    pub product_type: ProductType,
    #[serde(default)]
    pub fold_type: Option<FoldType>,
    #[serde(default)]
    pub fold_count: Option<u32>,
    #[serde(default)]
    pub packaging_type: PackagingType,
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
}

impl JobDescription {
    /// Whether the job has a cover at all.
    #[inline]
    pub fn has_cover(&self) -> bool {
        self.cover_pages != CoverPages::None
    }

    /// Finished area in cm².
    #[inline]
    pub fn area_cm2(&self) -> f64 {
        self.format_width * self.format_height
    }

    /// Cover grammage when a cover exists and a usable grammage is set.
    pub fn cover_grammage(&self) -> Option<u32> {
        if !self.has_cover() {
            return None;
        }
        self.cover_grammage.filter(|g| *g > 0)
    }

    /// Cover paper label and grammage when both are usable.
    pub fn cover_paper(&self) -> Option<(&str, u32)> {
        let grammage = self.cover_grammage()?;
        let label = self.cover_paper_type.as_deref().filter(|l| !l.is_empty())?;
        Some((label, grammage))
    }

    /// Cover color mode when a cover exists.
    pub fn cover_color_mode(&self) -> Option<ColorMode> {
        if self.has_cover() {
            self.cover_colors
        } else {
            None
        }
    }

    /// Flap width when strictly positive.
    pub fn flap_width(&self) -> Option<f64> {
        self.flap_width.filter(|w| *w > 0.0)
    }
}

// =============================================================================
// Cost Breakdown
// =============================================================================

/// Itemized result of one calculator run.
///
/// Created fresh per invocation and immutable once returned. Monetary fields
/// are rounded to cents; the unrounded values never leave the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub mode: PrintMode,
    #[ts(as = "f64")]
    pub paper_cost: Money,
    /// Includes plates and make-ready for offset.
    #[ts(as = "f64")]
    pub printing_cost: Money,
    #[ts(as = "f64")]
    pub binding_cost: Money,
    #[ts(as = "f64")]
    pub lamination_cost: Money,
    #[ts(as = "f64")]
    pub folding_cost: Money,
    #[ts(as = "f64")]
    pub packaging_cost: Money,
    #[ts(as = "f64")]
    pub delivery_cost: Money,
    /// Sum of components, plus supplements for offset.
    #[ts(as = "f64")]
    pub subtotal: Money,
    /// Margin as a fraction (0.05 digital, 0.07 offset).
    pub margin_rate: f64,
    #[ts(as = "f64")]
    pub margin_amount: Money,
    #[ts(as = "f64")]
    pub total_price: Money,
    #[ts(as = "f64")]
    pub price_per_unit: Money,
    /// kg, 3 decimals.
    pub weight_per_copy: f64,
    /// kg, 2 decimals.
    pub total_weight: f64,
}

/// Unrounded cost components gathered by a calculator.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RawCosts {
    pub paper: f64,
    pub printing: f64,
    pub binding: f64,
    pub lamination: f64,
    pub folding: f64,
    pub packaging: f64,
    pub delivery: f64,
}

impl RawCosts {
    /// Sum of every component.
    pub fn sum(&self) -> f64 {
        self.paper
            + self.printing
            + self.binding
            + self.lamination
            + self.folding
            + self.packaging
            + self.delivery
    }
}

/// Per-copy and total weight in kg, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Weights {
    pub per_copy_kg: f64,
    pub total_kg: f64,
}

impl CostBreakdown {
    /// Applies margin and rounding to a set of unrounded components.
    ///
    /// `subtotal` is passed separately because offset folds its percentage
    /// supplements in before the margin is taken.
    pub(crate) fn assemble(
        mode: PrintMode,
        costs: RawCosts,
        subtotal: f64,
        margin: Rate,
        quantity: u32,
        weights: Weights,
    ) -> Self {
        let margin_rate = margin.fraction();
        let margin_amount = subtotal * margin_rate;
        let total_price = subtotal + margin_amount;
        let price_per_unit = total_price / quantity as f64;

        CostBreakdown {
            mode,
            paper_cost: Money::from_amount(costs.paper),
            printing_cost: Money::from_amount(costs.printing),
            binding_cost: Money::from_amount(costs.binding),
            lamination_cost: Money::from_amount(costs.lamination),
            folding_cost: Money::from_amount(costs.folding),
            packaging_cost: Money::from_amount(costs.packaging),
            delivery_cost: Money::from_amount(costs.delivery),
            subtotal: Money::from_amount(subtotal),
            margin_rate,
            margin_amount: Money::from_amount(margin_amount),
            total_price: Money::from_amount(total_price),
            price_per_unit: Money::from_amount(price_per_unit),
            weight_per_copy: round_decimals(weights.per_copy_kg, 3),
            total_weight: round_decimals(weights.total_kg, 2),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_fraction() {
        assert_eq!(Rate::from_bps(500).fraction(), 0.05);
        assert_eq!(Rate::from_bps(700).fraction(), 0.07);
        assert_eq!((Rate::from_bps(500) + Rate::from_bps(1500)).bps(), 2000);
    }

    #[test]
    fn test_cover_pages_conversion() {
        assert_eq!(CoverPages::try_from(4).unwrap(), CoverPages::Four);
        assert!(CoverPages::try_from(3).is_err());
        assert_eq!(u32::from(CoverPages::Two), 2);
    }

    #[test]
    fn test_enum_labels_match_wizard_payload() {
        let json = serde_json::to_string(&BindingType::PerfectBoundSewn).unwrap();
        assert_eq!(json, "\"dos_carre_colle_couture\"");

        let mode: ColorMode = serde_json::from_str("\"quadrichromie_vernis\"").unwrap();
        assert_eq!(mode, ColorMode::FourColorVarnish);

        let product: ProductType = serde_json::from_str("\"depliant\"").unwrap();
        assert_eq!(product, ProductType::Leaflet);
    }

    #[test]
    fn test_job_deserializes_with_defaults() {
        let job: JobDescription = serde_json::from_str(
            r#"{
                "quantity": 100,
                "formatWidth": 21,
                "formatHeight": 29.7,
                "interiorPages": 32,
                "coverPages": 4,
                "interiorPaperType": "Couché Mat",
                "interiorGrammage": 135,
                "interiorColors": "quadrichromie",
                "bindingType": "piqure",
                "laminationOrientation": "non",
                "productType": "brochure"
            }"#,
        )
        .unwrap();

        assert_eq!(job.cover_pages, CoverPages::Four);
        assert_eq!(job.packaging_type, PackagingType::None);
        assert!(job.deliveries.is_empty());
        assert!(job.has_cover());
        assert_eq!(job.cover_grammage(), None);
    }

    #[test]
    fn test_cover_accessors_require_a_cover() {
        let job: JobDescription = serde_json::from_str(
            r#"{
                "quantity": 10,
                "formatWidth": 10,
                "formatHeight": 10,
                "interiorPages": 8,
                "coverPages": 0,
                "interiorPaperType": "Offset",
                "interiorGrammage": 90,
                "coverPaperType": "Couché Mat",
                "coverGrammage": 300,
                "interiorColors": "noir",
                "coverColors": "quadrichromie",
                "bindingType": "rien",
                "laminationOrientation": "non",
                "productType": "flyer_poster"
            }"#,
        )
        .unwrap();

        assert!(!job.has_cover());
        assert_eq!(job.cover_paper(), None);
        assert_eq!(job.cover_color_mode(), None);
    }
}
