//! Paper types and label normalization.
//!
//! Paper types reach the engine as the labels shown in the wizard
//! ("Couché Mat", "Bouffant Munken Crème"). They are folded to a canonical
//! key before lookup; anything unrecognized is priced as [`PaperKind::Other`].

use serde::{Deserialize, Serialize};

/// Canonical paper type of the paper price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperKind {
    CoucheMat,
    CoucheSatin,
    Brillant,
    Recycle,
    Offset,
    BouffantBlanc,
    BouffantMunkenBlanc,
    BouffantMunkenCreme,
    #[serde(rename = "autre")]
    Other,
}

impl PaperKind {
    /// Resolves a user-facing label to its canonical paper type.
    ///
    /// ```rust
    /// use pressquote_core::rate_card::paper::PaperKind;
    ///
    /// assert_eq!(PaperKind::from_label("Couché Mat"), PaperKind::CoucheMat);
    /// assert_eq!(PaperKind::from_label("Bouffant Munken Crème"), PaperKind::BouffantMunkenCreme);
    /// assert_eq!(PaperKind::from_label("Carte 1 face"), PaperKind::Other);
    /// ```
    pub fn from_label(label: &str) -> Self {
        match canonical_key(label).as_str() {
            "couche_mat" => PaperKind::CoucheMat,
            "couche_satin" => PaperKind::CoucheSatin,
            "brillant" => PaperKind::Brillant,
            "recycle" => PaperKind::Recycle,
            "offset" => PaperKind::Offset,
            "bouffant_blanc" => PaperKind::BouffantBlanc,
            "bouffant_munken_blanc" => PaperKind::BouffantMunkenBlanc,
            "bouffant_munken_creme" => PaperKind::BouffantMunkenCreme,
            _ => PaperKind::Other,
        }
    }
}

/// Lowercases, strips French diacritics and collapses every run of
/// non-alphanumeric characters into a single `_`.
pub fn canonical_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut pending_separator = false;

    for c in label.chars().flat_map(char::to_lowercase) {
        let folded = match fold_diacritic(c) {
            Some(ascii) => ascii,
            None if c.is_ascii_alphanumeric() => {
                push_word_char(&mut key, &mut pending_separator);
                key.push(c);
                continue;
            }
            None => {
                pending_separator = true;
                continue;
            }
        };
        push_word_char(&mut key, &mut pending_separator);
        key.push_str(folded);
    }

    key
}

fn push_word_char(key: &mut String, pending_separator: &mut bool) {
    if *pending_separator && !key.is_empty() {
        key.push('_');
    }
    *pending_separator = false;
}

fn fold_diacritic(c: char) -> Option<&'static str> {
    let ascii = match c {
        'à' | 'â' | 'ä' | 'á' => "a",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'î' | 'ï' | 'í' => "i",
        'ô' | 'ö' | 'ó' => "o",
        'ù' | 'û' | 'ü' | 'ú' => "u",
        'ÿ' => "y",
        'ç' => "c",
        'œ' => "oe",
        'æ' => "ae",
        _ => return None,
    };
    Some(ascii)
}
