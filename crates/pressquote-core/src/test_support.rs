//! Job fixtures for unit tests.

use crate::types::{
    BindingType, ColorMode, CoverPages, Delivery, JobDescription, LaminationOrientation,
    PackagingType, ProductType,
};

/// A4 saddle-stitched brochure: 32 pages of 135g coated matte, 4-page 300g
/// cover, 100 copies shipped to Paris.
pub(crate) fn brochure() -> JobDescription {
    JobDescription {
        quantity: 100,
        format_width: 21.0,
        format_height: 29.7,
        flap_width: None,
        interior_pages: 32,
        cover_pages: CoverPages::Four,
        interior_paper_type: "Couché Mat".to_string(),
        interior_grammage: 135,
        cover_paper_type: Some("Couché Mat".to_string()),
        cover_grammage: Some(300),
        interior_colors: ColorMode::FourColor,
        cover_colors: Some(ColorMode::FourColor),
        binding_type: BindingType::SaddleStitched,
        lamination_orientation: LaminationOrientation::None,
        lamination_finish: None,
        product_type: ProductType::Brochure,
        fold_type: None,
        fold_count: None,
        packaging_type: PackagingType::None,
        deliveries: vec![Delivery {
            quantity: 100,
            department: "75".to_string(),
            tail_lift: false,
        }],
    }
}

/// A4 leaflet, 4 pages of 170g, no cover, no binding.
pub(crate) fn leaflet() -> JobDescription {
    JobDescription {
        interior_pages: 4,
        interior_grammage: 170,
        cover_pages: CoverPages::None,
        cover_paper_type: None,
        cover_grammage: None,
        cover_colors: None,
        binding_type: BindingType::None,
        product_type: ProductType::Leaflet,
        fold_count: Some(1),
        ..brochure()
    }
}
