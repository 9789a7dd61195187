//! # Bracket Selectors
//!
//! Pure functions from a continuous value (pages, copies, kilograms, cm) to a
//! discrete table key. Upper bounds are inclusive, so every selector covers
//! its whole domain without gap or overlap:
//!
//! ```text
//! pages     ≤72 → 32-72   ≤152 → 76-152   else → >152
//! copies    ≤50 → 25-50   ≤200 → 100-200  ≤300 → 200-300
//!           ≤400 → 300-400  ≤500 → 400-500  else → >500
//! kilograms ≤5 → 0-5  ≤10 → 5-10  ≤20 → 10-20  ≤30 → 20-30  ≤50 → 30-50
//!           ≤100 → 50-100  ≤200 → 100-200  ≤500 → 200-500  else → 500+
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Page Range
// =============================================================================

/// Interior page-count bucket of the digital binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PageRange {
    #[serde(rename = "32-72")]
    UpTo72,
    #[serde(rename = "76-152")]
    UpTo152,
    #[serde(rename = ">152")]
    Over152,
}

impl PageRange {
    pub fn for_pages(pages: u32) -> Self {
        match pages {
            0..=72 => PageRange::UpTo72,
            73..=152 => PageRange::UpTo152,
            _ => PageRange::Over152,
        }
    }
}

// =============================================================================
// Quantity Bracket
// =============================================================================

/// Quantity bucket of the digital binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuantityBracket {
    #[serde(rename = "25-50")]
    UpTo50,
    #[serde(rename = "100-200")]
    UpTo200,
    #[serde(rename = "200-300")]
    UpTo300,
    #[serde(rename = "300-400")]
    UpTo400,
    #[serde(rename = "400-500")]
    UpTo500,
    #[serde(rename = ">500")]
    Over500,
}

impl QuantityBracket {
    pub fn for_quantity(quantity: u32) -> Self {
        match quantity {
            0..=50 => QuantityBracket::UpTo50,
            51..=200 => QuantityBracket::UpTo200,
            201..=300 => QuantityBracket::UpTo300,
            301..=400 => QuantityBracket::UpTo400,
            401..=500 => QuantityBracket::UpTo500,
            _ => QuantityBracket::Over500,
        }
    }
}

// =============================================================================
// Weight Bracket
// =============================================================================

/// Parcel weight bucket of the transport table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeightBracket {
    #[serde(rename = "0-5")]
    UpTo5,
    #[serde(rename = "5-10")]
    UpTo10,
    #[serde(rename = "10-20")]
    UpTo20,
    #[serde(rename = "20-30")]
    UpTo30,
    #[serde(rename = "30-50")]
    UpTo50,
    #[serde(rename = "50-100")]
    UpTo100,
    #[serde(rename = "100-200")]
    UpTo200,
    #[serde(rename = "200-500")]
    UpTo500,
    #[serde(rename = "500+")]
    Over500,
}

impl WeightBracket {
    /// Heaviest bracket, used when a zone has no entry for the computed one.
    pub const HEAVIEST: WeightBracket = WeightBracket::Over500;

    pub fn for_weight(kg: f64) -> Self {
        if kg <= 5.0 {
            WeightBracket::UpTo5
        } else if kg <= 10.0 {
            WeightBracket::UpTo10
        } else if kg <= 20.0 {
            WeightBracket::UpTo20
        } else if kg <= 30.0 {
            WeightBracket::UpTo30
        } else if kg <= 50.0 {
            WeightBracket::UpTo50
        } else if kg <= 100.0 {
            WeightBracket::UpTo100
        } else if kg <= 200.0 {
            WeightBracket::UpTo200
        } else if kg <= 500.0 {
            WeightBracket::UpTo500
        } else {
            WeightBracket::Over500
        }
    }
}

// =============================================================================
// Transport Zone
// =============================================================================

/// Geographic transport zone, A (Paris region) to D (farthest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    A,
    B,
    C,
    D,
}

impl Zone {
    /// Zone used for any unmapped destination.
    pub const FARTHEST: Zone = Zone::D;
}

/// Resolves a destination code to its zone.
///
/// Overseas codes use a 3-digit prefix ("971"); the 3-digit prefix is tried
/// first, then the 2-digit department prefix. Anything that does not start
/// with two digits ("2A", "") or is not mapped lands in [`Zone::FARTHEST`].
pub fn zone_for_destination(code: &str, zones: &BTreeMap<String, Zone>) -> Zone {
    let code = code.trim();
    let digits = code.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits < 2 {
        return Zone::FARTHEST;
    }

    if digits >= 3 {
        if let Some(zone) = zones.get(&code[..3]) {
            return *zone;
        }
    }

    zones.get(&code[..2]).copied().unwrap_or(Zone::FARTHEST)
}

// =============================================================================
// Offset Sheet Format
// =============================================================================

/// Standard offset press sheet formats, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SheetFormat {
    #[serde(rename = "64x90")]
    F64x90,
    #[serde(rename = "65x92")]
    F65x92,
    #[serde(rename = "70x102")]
    F70x102,
    #[serde(rename = "72x102")]
    F72x102,
}

impl SheetFormat {
    /// Smallest sheet accommodating a finished width/height in cm.
    pub fn for_finished_size(width_cm: f64, height_cm: f64) -> Self {
        if width_cm <= 32.0 && height_cm <= 45.0 {
            SheetFormat::F64x90
        } else if width_cm <= 32.5 && height_cm <= 46.0 {
            SheetFormat::F65x92
        } else if width_cm <= 35.0 && height_cm <= 51.0 {
            SheetFormat::F70x102
        } else {
            SheetFormat::F72x102
        }
    }
}
