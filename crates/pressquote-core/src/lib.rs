//! # pressquote-core: Print Job Pricing Engine
//!
//! Turns a print job description (quantity, format, pages, papers, colors,
//! finishing, deliveries) into an itemized cost breakdown for the digital and
//! the offset process.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pressquote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 quote-cli (request → response)                  │   │
//! │  │     config ──► parse request ──► validate ──► compare_modes     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ pressquote-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ rate_card │  │  digital  │  │  offset   │  │arbitration│  │   │
//! │  │   │  tables   │─►│ per side  │  │ signatures│─►│  cheaper  │  │   │
//! │  │   │ fallbacks │─►│ per copy  │  │  plates   │  │   mode    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED MUTABLE STATE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Job description, enums, cost breakdown
//! - [`money`] - Money type in integer cents
//! - [`rate_card`] - Immutable rate tables with lookup fallbacks
//! - [`digital`] - Digital press calculator
//! - [`offset`] - Offset press calculator
//! - [`delivery`] - Parcel pricing shared by both calculators
//! - [`arbitration`] - Digital/offset comparison
//! - [`validation`] - Job checks the calculators rely on
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Total Functions**: The calculators never fail; every lookup has a fallback
//! 2. **Injected Rates**: Callers pass the rate card in; `RateCard::global()` and
//!    the `_standard` wrappers are only a shortcut to the built-in standard card
//! 3. **Round Once**: Costs stay unrounded until the breakdown is assembled
//!
//! ## Example Usage
//!
//! ```rust
//! use pressquote_core::rate_card::RateCard;
//! use pressquote_core::{calculate_digital_quote, JobDescription};
//!
//! let job: JobDescription = serde_json::from_str(r#"{
//!     "quantity": 1,
//!     "formatWidth": 21,
//!     "formatHeight": 29.7,
//!     "interiorPages": 32,
//!     "coverPages": 0,
//!     "interiorPaperType": "Couché Mat",
//!     "interiorGrammage": 135,
//!     "interiorColors": "noir",
//!     "bindingType": "rien",
//!     "laminationOrientation": "non",
//!     "productType": "brochure"
//! }"#).unwrap();
//!
//! let breakdown = calculate_digital_quote(&job, &RateCard::standard());
//!
//! // 32 black pages at 0.025 per side
//! assert_eq!(breakdown.printing_cost.cents(), 80);
//! assert_eq!(breakdown.weight_per_copy, 0.138);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod arbitration;
pub mod delivery;
pub mod digital;
pub mod error;
pub mod money;
pub mod offset;
pub mod rate_card;
pub mod types;
pub mod validation;

mod weight;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use arbitration::{compare_modes, ModeComparison};
pub use digital::{calculate_digital_quote, calculate_digital_quote_standard};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use offset::{calculate_offset_quote, calculate_offset_quote_standard};
pub use rate_card::RateCard;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity above which offset is priced alongside digital.
///
/// ## Business Reason
/// Below a few hundred copies the offset make-ready and plates cannot be
/// recovered, so offset is only quoted when asked for. Above it, both modes
/// are priced and the cheaper one is recommended.
pub const OFFSET_COMPARISON_THRESHOLD: u32 = 300;
