//! # Quote Response
//!
//! The JSON document printed for a priced request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use pressquote_core::arbitration::ComparisonSummary;
use pressquote_core::{CostBreakdown, ModeComparison, Money, PrintMode};

use crate::request::QuoteRequest;

/// A priced quote.
///
/// Headline figures come from the breakdown of the requested mode, the same
/// breakdown that is embedded in full.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,

    pub selected_mode: PrintMode,
    pub recommended_mode: PrintMode,
    pub effective_mode: PrintMode,

    pub total_price: Money,
    pub price_per_unit: Money,
    pub weight_per_copy: f64,
    pub total_weight: f64,

    pub breakdown: CostBreakdown,
    /// Present above the comparison threshold only.
    pub comparison: Option<ComparisonSummary>,
    pub savings: Money,

    pub quantity: u32,
    pub format: String,
    pub interior_pages: u32,
}

impl QuoteResponse {
    pub fn new(request: &QuoteRequest, comparison: ModeComparison) -> Self {
        let primary = comparison.primary().clone();

        QuoteResponse {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            selected_mode: comparison.requested,
            recommended_mode: comparison.recommended,
            effective_mode: comparison.effective,
            total_price: primary.total_price,
            price_per_unit: primary.price_per_unit,
            weight_per_copy: primary.weight_per_copy,
            total_weight: primary.total_weight,
            breakdown: primary,
            comparison: comparison.comparison,
            savings: comparison.savings,
            quantity: request.quantity,
            format: request.format.clone(),
            interior_pages: request.interior_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressquote_core::{compare_modes, RateCard};

    fn request(print_mode: &str, quantity: u32) -> QuoteRequest {
        serde_json::from_str(&format!(
            r#"{{
                "printMode": "{print_mode}",
                "quantity": {quantity},
                "format": "21x29,7",
                "interiorPages": 48,
                "coverPages": "4",
                "interiorPaperType": "Couché Mat",
                "interiorGrammage": 135,
                "coverPaperType": "Couché Mat",
                "coverGrammage": 300,
                "interiorColors": "quadrichromie",
                "coverColors": "quadrichromie",
                "bindingType": "piqure",
                "laminationOrientation": "non",
                "productType": "brochure",
                "packagingType": "non",
                "deliveries": [{{ "quantity": {quantity}, "department": "75", "tailLift": false }}]
            }}"#
        ))
        .unwrap()
    }

    fn respond(req: &QuoteRequest) -> QuoteResponse {
        let card = RateCard::standard();
        let job = req.to_job(&card.validation).unwrap();
        QuoteResponse::new(req, compare_modes(&job, req.print_mode, &card, 300))
    }

    #[test]
    fn test_small_digital_quote() {
        let req = request("digital", 100);
        let response = respond(&req);

        assert_eq!(response.selected_mode, PrintMode::Digital);
        assert_eq!(response.breakdown.mode, PrintMode::Digital);
        assert_eq!(response.total_price, response.breakdown.total_price);
        assert!(response.comparison.is_none());
        assert!(response.savings.is_zero());
    }

    #[test]
    fn test_offset_request_uses_offset_breakdown() {
        let req = request("offset", 1000);
        let response = respond(&req);

        assert_eq!(response.selected_mode, PrintMode::Offset);
        assert_eq!(response.effective_mode, PrintMode::Offset);
        assert_eq!(response.breakdown.mode, PrintMode::Offset);
        assert!(response.comparison.is_some());
    }

    #[test]
    fn test_response_json_shape() {
        let req = request("digital", 500);
        let response = respond(&req);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["selectedMode"], "digital");
        assert_eq!(value["format"], "21x29,7");
        assert!(value["id"].is_string());
        assert!(value["createdAt"].is_string());
        assert!(value["totalPrice"].is_f64());
        assert!(value["comparison"]["mostEconomical"].is_string());
        assert_eq!(value["breakdown"]["marginRate"], 0.05);
    }

    #[test]
    fn test_ids_are_unique() {
        let req = request("digital", 100);
        assert_ne!(respond(&req).id, respond(&req).id);
    }
}
