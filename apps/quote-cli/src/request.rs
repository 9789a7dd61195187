//! # Quote Request
//!
//! The form payload posted by the quote wizard, and its conversion to a
//! [`JobDescription`].
//!
//! The wizard sends the format as a `"21x29,7"` string, the cover page count
//! as a string (`"0"`, `"2"`, `"4"`) and the flap as `rabatWidth`. Everything
//! else maps one to one.

use serde::Deserialize;

use pressquote_core::rate_card::ValidationLimits;
use pressquote_core::validation::{parse_format, validate_job, ValidationResult};
use pressquote_core::{
    BindingType, ColorMode, CoverPages, Delivery, FoldType, JobDescription, LaminationFinish,
    LaminationOrientation, PackagingType, PrintMode, ProductType, ValidationError,
};

/// Cover page count, as a number or as the wizard's string label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoverPagesField {
    Count(u32),
    Label(String),
}

impl Default for CoverPagesField {
    fn default() -> Self {
        CoverPagesField::Count(0)
    }
}

impl CoverPagesField {
    fn parse(&self) -> ValidationResult<CoverPages> {
        let count = match self {
            CoverPagesField::Count(n) => Some(*n),
            CoverPagesField::Label(label) => label.trim().parse().ok(),
        };

        count
            .and_then(|n| CoverPages::try_from(n).ok())
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "coverPages".to_string(),
                reason: "expected 0, 2 or 4".to_string(),
            })
    }
}

/// A complete quote request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub print_mode: PrintMode,
    pub quantity: u32,
    /// `WIDTHxHEIGHT` in cm.
    pub format: String,
    pub interior_pages: u32,
    #[serde(default)]
    pub cover_pages: CoverPagesField,
    #[serde(default)]
    pub rabat_width: Option<f64>,
    pub interior_paper_type: String,
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

impl QuoteRequest {
    /// Converts the request to a validated job.
    pub fn to_job(&self, limits: &ValidationLimits) -> ValidationResult<JobDescription> {
        let (format_width, format_height) = parse_format(&self.format)?;

        let job = JobDescription {
            quantity: self.quantity,
            format_width,
            format_height,
            flap_width: self.rabat_width,
            interior_pages: self.interior_pages,
            cover_pages: self.cover_pages.parse()?,
            interior_paper_type: self.interior_paper_type.clone(),
            interior_grammage: self.interior_grammage,
            cover_paper_type: self.cover_paper_type.clone(),
            cover_grammage: self.cover_grammage,
            interior_colors: self.interior_colors,
            cover_colors: self.cover_colors,
            binding_type: self.binding_type,
            lamination_orientation: self.lamination_orientation,
            lamination_finish: self.lamination_finish,
            product_type: self.product_type,
            fold_type: self.fold_type,
            fold_count: self.fold_count,
            packaging_type: self.packaging_type,
            deliveries: self.deliveries.clone(),
        };

        validate_job(&job, self.print_mode, limits)?;
        Ok(job)
    }
}
