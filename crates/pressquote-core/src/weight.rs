//! Paper weight of a job.
//!
//! A page is one side of a sheet, so `pages / 2` sheets go into each copy.
//! The weight in grams of a part is `area_cm2 × sheets × grammage / divisor`.

use crate::rate_card::RateCard;
use crate::types::{JobDescription, Weights};

/// Surface used for the cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CoverSurface {
    /// Same area as the interior.
    Finished,
    /// Widened by the flap, when the job has one.
    WithFlap,
}

/// Per-copy weight of the interior and cover, in grams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PartWeights {
    pub interior_g: f64,
    pub cover_g: f64,
}

impl PartWeights {
    pub fn compute(job: &JobDescription, card: &RateCard, surface: CoverSurface) -> Self {
        let area = job.area_cm2();
        let interior_sheets = f64::from(job.interior_pages) / 2.0;
        let interior_g =
            area * interior_sheets * f64::from(job.interior_grammage) / card.weight_divisor;

        let cover_g = match job.cover_grammage() {
            Some(grammage) => {
                let cover_area = match (surface, job.flap_width()) {
                    (CoverSurface::WithFlap, Some(flap)) => {
                        (job.format_width + flap) * job.format_height
                    }
                    _ => area,
                };
                let cover_sheets = f64::from(job.cover_pages.count()) / 2.0;
                cover_area * cover_sheets * f64::from(grammage) / card.weight_divisor
            }
            None => 0.0,
        };

        PartWeights {
            interior_g,
            cover_g,
        }
    }

    /// Interior weight of one copy in kg.
    pub fn interior_kg(&self) -> f64 {
        self.interior_g / 1000.0
    }

    pub fn per_copy_kg(&self) -> f64 {
        (self.interior_g + self.cover_g) / 1000.0
    }

    pub fn totals(&self, quantity: u32) -> Weights {
        let per_copy_kg = self.per_copy_kg();
        Weights {
            per_copy_kg,
            total_kg: per_copy_kg * f64::from(quantity),
        }
    }
}
