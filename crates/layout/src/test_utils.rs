use crate::overflow::ExtentSource;
use crate::LayoutError;
use cardsheet_idf::{Card, ContentBlock, FontLevel, ReferencePair, SheetEntry};
use cardsheet_traits::FixedMeasurer;
use cardsheet_types::Size;

/// Card size every test measurer reports.
pub const TEST_CARD: Size = Size {
    width: 63.0,
    height: 88.0,
};

pub fn blocks(card: &str, count: usize) -> Vec<ContentBlock> {
    (0..count)
        .map(|i| ContentBlock::paragraph(format!("{card}/{i}"), format!("paragraph {i}")))
        .collect()
}

pub fn card_with_blocks(id: &str, count: usize) -> Card {
    Card::new(id, blocks(id, count))
}

/// A fixed measurer for `TEST_CARD` with explicit block heights in mm.
pub fn measurer_for(heights: &[(&str, f32)]) -> FixedMeasurer {
    heights
        .iter()
        .fold(FixedMeasurer::new(TEST_CARD), |m, (id, h)| {
            m.with_block_height(*id, *h)
        })
}

pub fn single(id: &str) -> SheetEntry {
    card_with_blocks(id, 1).into()
}

/// A card that already carries a back face.
pub fn double(id: &str) -> SheetEntry {
    let mut card = card_with_blocks(id, 2);
    let moved = card.front.split_off(1);
    card.back = Some(moved);
    card.into()
}

pub fn reference(id: &str) -> SheetEntry {
    ReferencePair {
        id: id.into(),
        title: "Glossary".to_string(),
    }
    .into()
}

/// Extents from a lookup table, scaled by line pitch like real text.
pub struct TableExtents {
    block_mm: f32,
    components_mm: f32,
}

impl TableExtents {
    pub fn uniform(block_mm: f32) -> Self {
        Self {
            block_mm,
            components_mm: 0.0,
        }
    }

    pub fn with_components(mut self, components_mm: f32) -> Self {
        self.components_mm = components_mm;
        self
    }
}

impl ExtentSource for TableExtents {
    fn block(&mut self, _block: &ContentBlock, level: FontLevel) -> Result<f32, LayoutError> {
        Ok(self.block_mm * level.line_pitch_ratio())
    }

    fn components(&mut self, level: FontLevel) -> Result<f32, LayoutError> {
        Ok(self.components_mm * level.line_pitch_ratio())
    }
}
