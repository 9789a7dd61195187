//! # Validation Module
//!
//! Checks a job before it reaches a calculator.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Quote wizard                                                 │
//! │  └── Per-step checks, immediate feedback                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Request handling (Rust)                                      │
//! │  ├── Type validation (deserialization, enum labels)                    │
//! │  └── THIS MODULE: page, binding, fold and delivery rules               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculators                                                  │
//! │  └── No checks. Assume quantity >= 1 and a well-formed job             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Limits come from [`ValidationLimits`] so a custom rate card can move them.
//!
//! ## Usage
//! ```rust
//! use pressquote_core::rate_card::RateCard;
//! use pressquote_core::validation::{parse_format, validate_interior_pages};
//!
//! let limits = RateCard::standard().validation;
//! assert_eq!(parse_format("21x29,7").unwrap(), (21.0, 29.7));
//! assert!(validate_interior_pages(32, &limits).is_ok());
//! assert!(validate_interior_pages(30, &limits).is_err());
//! ```

use crate::error::ValidationError;
use crate::rate_card::ValidationLimits;
use crate::types::{BindingType, Delivery, JobDescription, PrintMode};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Format
// =============================================================================

/// Parses a finished format written `WIDTHxHEIGHT` in cm.
///
/// Either `.` or `,` is accepted as decimal separator.
///
/// ## Example
/// ```rust
/// use pressquote_core::validation::parse_format;
///
/// assert_eq!(parse_format("21x29.7").unwrap(), (21.0, 29.7));
/// assert_eq!(parse_format("10,5x15").unwrap(), (10.5, 15.0));
/// assert!(parse_format("A4").is_err());
/// assert!(parse_format("21x").is_err());
/// ```
pub fn parse_format(format: &str) -> ValidationResult<(f64, f64)> {
    let invalid = || ValidationError::InvalidFormat {
        field: "format".to_string(),
        reason: "expected WIDTHxHEIGHT, e.g. 21x29,7".to_string(),
    };

    let (width, height) = format.trim().split_once('x').ok_or_else(invalid)?;
    let width = parse_dimension(width).ok_or_else(invalid)?;
    let height = parse_dimension(height).ok_or_else(invalid)?;

    if width <= 0.0 || height <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "format".to_string(),
        });
    }

    Ok((width, height))
}

/// `digits[(.|,)digits]`
fn parse_dimension(text: &str) -> Option<f64> {
    let (int_part, frac_part) = match text.split_once(['.', ',']) {
        Some((i, f)) => (i, Some(f)),
        None => (text, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
        return None;
    }

    let normalized = match frac_part {
        Some(frac) => format!("{int_part}.{frac}"),
        None => int_part.to_string(),
    };
    normalized.parse().ok()
}

// =============================================================================
// Quantities and Pages
// =============================================================================

/// Validates the number of copies (at least one).
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates the interior page count.
///
/// ## Rules
/// - At least `min_interior_pages` (4)
/// - A multiple of `page_multiple` (4)
pub fn validate_interior_pages(pages: u32, limits: &ValidationLimits) -> ValidationResult<()> {
    if pages < limits.min_interior_pages {
        return Err(ValidationError::TooSmall {
            field: "interiorPages".to_string(),
            min: i64::from(limits.min_interior_pages),
        });
    }

    if limits.page_multiple > 0 && pages % limits.page_multiple != 0 {
        return Err(ValidationError::NotMultipleOf {
            field: "interiorPages".to_string(),
            multiple: limits.page_multiple,
        });
    }

    Ok(())
}

/// Digital presses take at most `digital_max_pages` interior pages.
pub fn validate_digital_pages(pages: u32, limits: &ValidationLimits) -> ValidationResult<()> {
    if pages > limits.digital_max_pages {
        return Err(ValidationError::TooLarge {
            field: "interiorPages".to_string(),
            max: i64::from(limits.digital_max_pages),
        });
    }
    Ok(())
}

/// Validates the page count against the binding.
///
/// ## Rules
/// - Perfect binding (any variant) needs at least 40 interior pages
/// - Saddle stitching holds at most 96 interior pages
///
/// ## Example
/// ```rust
/// use pressquote_core::rate_card::RateCard;
/// use pressquote_core::types::BindingType;
/// use pressquote_core::validation::validate_binding_pages;
///
/// let limits = RateCard::standard().validation;
/// assert!(validate_binding_pages(BindingType::PerfectBound, 48, &limits).is_ok());
/// assert!(validate_binding_pages(BindingType::PerfectBound, 32, &limits).is_err());
/// assert!(validate_binding_pages(BindingType::SaddleStitched, 100, &limits).is_err());
/// ```
pub fn validate_binding_pages(
    binding: BindingType,
    pages: u32,
    limits: &ValidationLimits,
) -> ValidationResult<()> {
    if binding.is_perfect_bound() && pages < limits.perfect_binding_min_pages {
        return Err(ValidationError::NotAllowed {
            field: "bindingType".to_string(),
            reason: format!(
                "perfect binding needs at least {} interior pages",
                limits.perfect_binding_min_pages
            ),
        });
    }

    if binding == BindingType::SaddleStitched && pages > limits.saddle_stitch_max_pages {
        return Err(ValidationError::NotAllowed {
            field: "bindingType".to_string(),
            reason: format!(
                "saddle stitching holds at most {} interior pages",
                limits.saddle_stitch_max_pages
            ),
        });
    }

    Ok(())
}

// =============================================================================
// Finishing
// =============================================================================

/// Validates an optional fold count (1 to `max_fold_count`).
pub fn validate_fold_count(count: Option<u32>, limits: &ValidationLimits) -> ValidationResult<()> {
    match count {
        Some(n) if n < 1 || n > limits.max_fold_count => Err(ValidationError::OutOfRange {
            field: "foldCount".to_string(),
            min: 1,
            max: i64::from(limits.max_fold_count),
        }),
        _ => Ok(()),
    }
}

/// Validates a cover flap against the finished width.
///
/// The unfolded cover is `2 × width + flap` and must fit within
/// `flap_max_total_cm` (76 cm).
pub fn validate_flap(width: f64, flap: Option<f64>, limits: &ValidationLimits) -> ValidationResult<()> {
    let Some(flap) = flap else {
        return Ok(());
    };

    if flap < 0.0 {
        return Err(ValidationError::TooSmall {
            field: "rabatWidth".to_string(),
            min: 0,
        });
    }

    if 2.0 * width + flap > limits.flap_max_total_cm {
        return Err(ValidationError::NotAllowed {
            field: "rabatWidth".to_string(),
            reason: format!(
                "2 × width + flap must not exceed {} cm",
                limits.flap_max_total_cm
            ),
        });
    }

    Ok(())
}

// =============================================================================
// Deliveries
// =============================================================================

/// Validates the delivery split.
///
/// ## Rules
/// - At least one destination
/// - Each destination receives at least one copy
/// - Each destination has a department code
pub fn validate_deliveries(deliveries: &[Delivery]) -> ValidationResult<()> {
    if deliveries.is_empty() {
        return Err(ValidationError::Required {
            field: "deliveries".to_string(),
        });
    }

    for (i, delivery) in deliveries.iter().enumerate() {
        if delivery.quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("deliveries[{i}].quantity"),
            });
        }
        if delivery.department.trim().is_empty() {
            return Err(ValidationError::Required {
                field: format!("deliveries[{i}].department"),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Whole Job
// =============================================================================

/// Runs every check that applies to a job printed in `mode`.
///
/// Stops at the first failure.
pub fn validate_job(
    job: &JobDescription,
    mode: PrintMode,
    limits: &ValidationLimits,
) -> ValidationResult<()> {
    validate_quantity(job.quantity)?;

    if !(job.format_width > 0.0 && job.format_height > 0.0) {
        return Err(ValidationError::MustBePositive {
            field: "format".to_string(),
        });
    }

    validate_interior_pages(job.interior_pages, limits)?;

    if job.interior_paper_type.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "interiorPaperType".to_string(),
        });
    }
    if job.interior_grammage == 0 {
        return Err(ValidationError::MustBePositive {
            field: "interiorGrammage".to_string(),
        });
    }

    validate_binding_pages(job.binding_type, job.interior_pages, limits)?;
    validate_fold_count(job.fold_count, limits)?;
    validate_deliveries(&job.deliveries)?;

    match mode {
        PrintMode::Digital => validate_digital_pages(job.interior_pages, limits)?,
        PrintMode::Offset if job.has_cover() => {
            validate_flap(job.format_width, job.flap_width, limits)?
        }
        PrintMode::Offset => {}
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
