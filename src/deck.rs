//! Deck files: the JSON input format of the command line tool.
//!
//! A deck carries the sheet entries together with everything the
//! deterministic measurer needs to stand in for a rendering surface:
//!
//! ```json
//! {
//!   "pageSize": "letter",
//!   "options": { "sideBySide": true },
//!   "card": { "width": 63.5, "height": 88.9 },
//!   "blockHeights": { "fireball/0": 42.0 },
//!   "entries": [
//!     { "type": "card", "id": "fireball", "front": [{ "id": "fireball/0", "markup": "..." }] }
//!   ]
//! }
//! ```

use crate::error::PipelineError;
use cardsheet_idf::SheetEntry;
use cardsheet_layout::{FaceCapacity, LayoutContext, LayoutOptions};
use cardsheet_traits::{FixedMeasurer, CSS_PX_PER_MM};
use cardsheet_types::{CardId, PageSize, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

fn default_card() -> Size {
    // poker size
    Size::new(63.5, 88.9)
}

fn default_block_height() -> f32 {
    10.0
}

fn default_px_per_mm() -> f32 {
    CSS_PX_PER_MM
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub options: LayoutOptions,
    /// Face size the measurer reports for every card, in millimetres.
    #[serde(default = "default_card")]
    pub card: Size,
    #[serde(default)]
    pub body_capacity: FaceCapacity,
    /// Card used to measure the grid. Defaults to the first card.
    #[serde(default)]
    pub reference: Option<CardId>,
    #[serde(default = "default_px_per_mm")]
    pub px_per_mm: f32,
    #[serde(default = "default_block_height")]
    pub default_block_height: f32,
    /// Natural block heights in millimetres at the normal font level, by block id.
    #[serde(default)]
    pub block_heights: BTreeMap<String, f32>,
    pub entries: Vec<SheetEntry>,
}

impl Deck {
    pub fn new(entries: Vec<SheetEntry>) -> Self {
        Self {
            page_size: PageSize::default(),
            options: LayoutOptions::default(),
            card: default_card(),
            body_capacity: FaceCapacity::default(),
            reference: None,
            px_per_mm: default_px_per_mm(),
            default_block_height: default_block_height(),
            block_heights: BTreeMap::new(),
            entries,
        }
    }

    pub fn from_json(source: &str) -> Result<Self, PipelineError> {
        let deck: Deck = serde_json::from_str(source)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read deck from '{}': {}", path.display(), e),
            ))
        })?;
        log::debug!("Loaded {} bytes of deck from {}", source.len(), path.display());
        Self::from_json(&source)
    }

    /// Checks the numbers the measurer will report back.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(self.px_per_mm.is_finite() && self.px_per_mm > 0.0) {
            return Err(PipelineError::Config(format!(
                "pxPerMm must be positive, got {}",
                self.px_per_mm
            )));
        }
        let capacity = self.body_capacity;
        if !(capacity.front_mm > 0.0 && capacity.back_mm > 0.0) {
            return Err(PipelineError::Config(format!(
                "body capacity must be positive, got {}mm front / {}mm back",
                capacity.front_mm, capacity.back_mm
            )));
        }
        if let Some((id, height)) = self
            .block_heights
            .iter()
            .find(|(_, h)| !(h.is_finite() && **h >= 0.0))
        {
            return Err(PipelineError::Config(format!(
                "block '{id}' has an invalid height of {height}mm"
            )));
        }
        Ok(())
    }

    pub fn context(&self) -> LayoutContext {
        LayoutContext {
            page_size: self.page_size,
            options: self.options,
            capacity: self.body_capacity,
            reference: self.reference.clone(),
        }
    }

    /// A deterministic measurer answering with this deck's sizes.
    pub fn measurer(&self) -> FixedMeasurer {
        self.block_heights.iter().fold(
            FixedMeasurer::new(self.card)
                .with_px_per_mm(self.px_per_mm)
                .with_default_block_height(self.default_block_height),
            |m, (id, height)| m.with_block_height(id.as_str(), *height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsheet_layout::TrailingFill;

    const DECK: &str = r#"{
        "pageSize": "a4",
        "options": { "sideBySide": true, "trailingFill": { "minimumRows": 1 } },
        "card": { "width": 80.0, "height": 120.0 },
        "bodyCapacity": { "frontMm": 55.0, "backMm": 70.0 },
        "blockHeights": { "a/0": 30.0 },
        "entries": [
            { "type": "card", "id": "a", "front": [{ "id": "a/0", "markup": "x" }] },
            { "type": "reference", "id": "glossary", "title": "Glossary" }
        ]
    }"#;

    #[test]
    fn test_parse_full_deck() {
        let deck = Deck::from_json(DECK).unwrap();
        assert_eq!(deck.page_size, PageSize::A4);
        assert!(deck.options.side_by_side);
        assert_eq!(deck.options.trailing_fill, TrailingFill::MinimumRows(1));
        assert_eq!(deck.body_capacity.back_mm, 70.0);
        assert_eq!(deck.entries.len(), 2);
        assert_eq!(deck.block_heights["a/0"], 30.0);
    }

    #[test]
    fn test_defaults_for_minimal_deck() {
        let deck = Deck::from_json(r#"{ "entries": [] }"#).unwrap();
        assert_eq!(deck, Deck::new(Vec::new()));
        assert_eq!(deck.context(), LayoutContext::default());
    }

    #[test]
    fn test_measurer_carries_deck_sizes() {
        let deck = Deck::from_json(DECK).unwrap();
        let measurer = deck.measurer();
        assert_eq!(measurer.card_size(), Size::new(80.0, 120.0));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let err = Deck::from_json(r#"{ "pxPerMm": 0, "entries": [] }"#).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));

        let err = Deck::from_json(r#"{ "blockHeights": { "x": -1 }, "entries": [] }"#).unwrap_err();
        assert!(err.to_string().contains("'x'"));

        let err = Deck::from_json(r#"{ "pageSize": "tabloid", "entries": [] }"#).unwrap_err();
        assert!(matches!(err, PipelineError::Json(_)));
    }

    #[test]
    fn test_non_ascii_accent_is_a_json_error() {
        let source = r##"{ "entries": [
            { "type": "card", "id": "a", "front": [], "accent": "#é1" }
        ] }"##;
        let err = Deck::from_json(source).unwrap_err();
        assert!(matches!(err, PipelineError::Json(_)));
    }
}
