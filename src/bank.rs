//! Static catalogue of matchable items.
//!
//! Two flavours exist: text cognates (Hebrew / Arabic word pairs with an
//! English concept) and numbered image assets whose files are located by
//! convention under `words/{id}/`.

use std::collections::HashSet;

use crate::error::{ConfigError, Result};

/// Distinct items needed to fill the four quadrants.
pub const CHOICES_PER_ROUND: usize = 4;

/// Number of numbered asset folders shipped with the game (`words/1` .. `words/74`).
pub const IMAGE_ASSET_COUNT: u32 = 74;

// -----------------------------------------------------------------------------
// Built-in cognate dataset: (hebrew, arabic, concept, shared root)
// -----------------------------------------------------------------------------

pub const COGNATES: &[(&str, &str, &str, &str)] = &[
    ("שלום", "سلام", "peace", "root Š-L-M"),
    ("בית", "بيت", "house", "root B-Y-T"),
    ("יום", "يوم", "day", "root Y-W-M"),
    ("לילה", "ليلة", "night", "root L-Y-L"),
    ("עין", "عين", "eye", "root ʕ-Y-N"),
    ("ראש", "رأس", "head", "root R-ʔ-Š"),
    ("יד", "يد", "hand", "root Y-D"),
    ("אוזן", "أذن", "ear", "root ʔ-Ḏ-N"),
    ("לשון", "لسان", "tongue", "root L-Š-N"),
    ("אב", "أب", "father", "root ʔ-B"),
    ("אם", "أم", "mother", "root ʔ-M"),
    ("בן", "ابن", "son", "root B-N"),
    ("מים", "ماء", "water", "root M-Y"),
    ("שמש", "شمس", "sun", "root Š-M-Š"),
    ("כלב", "كلب", "dog", "root K-L-B"),
    ("שם", "اسم", "name", "root Š-M"),
    ("שנה", "سنة", "year", "root Š-N-Y"),
    ("מלך", "ملك", "king", "root M-L-K"),
    ("ארץ", "أرض", "land", "root ʔ-R-Ṣ"),
    ("שלוש", "ثلاث", "three", "root Š-L-Š"),
    ("חמש", "خمس", "five", "root Ḥ-M-Š"),
    ("עשר", "عشر", "ten", "root ʕ-Š-R"),
    ("כתב", "كتب", "write", "root K-T-B"),
    ("מוות", "موت", "death", "root M-W-T"),
    ("ענב", "عنب", "grape", "root ʕ-N-B"),
    ("בצל", "بصل", "onion", "root B-Ṣ-L"),
    ("כמון", "كمون", "cumin", "root K-M-N"),
    ("זית", "زيتون", "olive", "root Z-Y-T"),
];

/// One matchable unit. Source script is Hebrew, target script is Arabic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CognateItem {
    pub id: u32,
    pub source_text: String,
    pub target_text: String,
    pub concept: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hint: Option<String>,
}

impl CognateItem {
    /// Image-only item; the concept doubles as a stable unique label.
    pub fn image(id: u32) -> Self {
        Self {
            id,
            source_text: String::new(),
            target_text: String::new(),
            concept: format!("#{id}"),
            hint: None,
        }
    }

    pub fn photo_path(&self) -> String {
        format!("words/{}/photo.jpeg", self.id)
    }

    /// Morph animation for the item, `tag` is `ArHb` or `HbAr`.
    pub fn morph_path(&self, tag: &str) -> String {
        format!("words/{}/{}.gif", self.id, tag)
    }
}

/// Validated, read-only catalogue.
#[derive(Clone, Debug)]
pub struct WordBank {
    items: Vec<CognateItem>,
}

impl WordBank {
    /// Validates uniqueness of ids / concepts and that at least one full round
    /// of distinct choices can be built.
    pub fn new(items: Vec<CognateItem>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut concepts = HashSet::new();
        for item in &items {
            if !ids.insert(item.id) {
                return Err(ConfigError::DuplicateId(item.id));
            }
            if !concepts.insert(item.concept.as_str()) {
                return Err(ConfigError::DuplicateConcept(item.concept.clone()));
            }
        }
        if items.len() < CHOICES_PER_ROUND {
            return Err(ConfigError::ExhaustedBank {
                available: items.len(),
                needed: CHOICES_PER_ROUND,
            });
        }
        Ok(Self { items })
    }

    /// Built-in text cognates, ids starting at 1.
    pub fn cognates() -> Result<Self> {
        let items = COGNATES
            .iter()
            .zip(1u32..)
            .map(|(&(he, ar, concept, hint), id)| CognateItem {
                id,
                source_text: he.to_string(),
                target_text: ar.to_string(),
                concept: concept.to_string(),
                hint: Some(hint.to_string()),
            })
            .collect();
        Self::new(items)
    }

    /// Numbered image assets `1..=count`.
    pub fn numbered_assets(count: u32) -> Result<Self> {
        Self::new((1..=count).map(CognateItem::image).collect())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<CognateItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn items(&self) -> &[CognateItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&CognateItem> {
        self.items.iter().find(|i| i.id == id)
    }
}
