//! Signature imposition.
//!
//! The interior is split greedily into folded signatures: as many 16-page
//! signatures as fit, then at most one each of 12, 8 and 6 pages, then 4-page
//! signatures for whatever is left (rounded up). The order is fixed and is
//! not an optimal packing.

/// Signature mix of an interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct SignatureInfo {
    pub pages16: u32,
    pub pages12: u32,
    pub pages8: u32,
    pub pages6: u32,
    pub pages4: u32,
    pub total_signatures: u32,
}

impl SignatureInfo {
    /// Press sheets per copy; a 16-page signature fills one sheet.
    pub fn sheets_per_copy(&self) -> f64 {
        f64::from(self.pages16)
            + f64::from(self.pages12) * 0.75
            + f64::from(self.pages8) * 0.5
            + f64::from(self.pages6) * 0.375
            + f64::from(self.pages4) * 0.25
    }
}

/// Splits `pages` into signatures.
///
/// A leftover smaller than 4 pages (only possible when `pages` is not a
/// multiple of 4) still occupies a full 4-page signature, so 18 pages gives
/// 16 + 4 and every page is printed. Validated jobs never hit this case.
pub(crate) fn calculate_signatures(pages: u32) -> SignatureInfo {
    let pages16 = pages / 16;
    let mut remaining = pages % 16;

    let mut take_one = |size: u32| {
        if remaining >= size {
            remaining -= size;
            1
        } else {
            0
        }
    };
    let pages12 = take_one(12);
    let pages8 = take_one(8);
    let pages6 = take_one(6);

    let pages4 = remaining.div_ceil(4);

    SignatureInfo {
        pages16,
        pages12,
        pages8,
        pages6,
        pages4,
        total_signatures: pages16 + pages12 + pages8 + pages6 + pages4,
    }
}
