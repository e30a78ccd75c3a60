//! Measurement service: page grid derivation and the single px→mm conversion point.

use crate::LayoutError;
use cardsheet_idf::{Card, ContentBlock, FontLevel, Side};
use cardsheet_traits::{MeasureError, Measurer, Renderable};
use cardsheet_types::{CardId, PageSize, PxSize, Rect, Size};
use serde::Serialize;

/// Total page padding (10mm on each side), subtracted from both page dimensions.
pub const PAGE_PADDING_MM: f32 = 20.0;
/// Space reserved between neighbouring cards.
pub const CARD_GUTTER_MM: f32 = 1.0;

/// The fixed card grid of one layout run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub page_size: PageSize,
    pub card_size: Size,
    pub cards_per_row: usize,
    pub rows_per_page: usize,
    pub max_faces_per_page: usize,
    /// Exactly encloses the grid, without a trailing gutter.
    pub container: Size,
}

impl Grid {
    pub fn column_of(&self, slot_index: usize) -> usize {
        slot_index % self.cards_per_row
    }

    pub fn row_of(&self, slot_index: usize) -> usize {
        slot_index / self.cards_per_row
    }

    /// Position of a slot inside the page container.
    pub fn slot_rect(&self, slot_index: usize) -> Rect {
        let col = self.column_of(slot_index) as f32;
        let row = self.row_of(slot_index) as f32;
        Rect::new(
            col * (self.card_size.width + CARD_GUTTER_MM),
            row * (self.card_size.height + CARD_GUTTER_MM),
            self.card_size.width,
            self.card_size.height,
        )
    }
}

/// Derives the card grid for a landscape page.
///
/// Fails when either count comes out at zero: there is no partial layout for a
/// card that does not fit the printable area.
pub fn compute_grid(
    page_size: PageSize,
    card_width: f32,
    card_height: f32,
) -> Result<Grid, LayoutError> {
    let card_size = Size::new(card_width, card_height);
    if !card_size.is_positive() {
        return Err(LayoutError::InvalidCardSize(card_width, card_height));
    }

    let (page_width, page_height) = page_size.dimensions_mm();
    let columns = ((page_width - PAGE_PADDING_MM) / (card_width + CARD_GUTTER_MM)).floor() as i64;
    let rows = ((page_height - PAGE_PADDING_MM) / (card_height + CARD_GUTTER_MM)).floor() as i64;

    if columns <= 0 || rows <= 0 {
        return Err(LayoutError::GridTooSmall {
            page: page_size,
            card_width,
            card_height,
            columns,
            rows,
        });
    }

    let cards_per_row = columns as usize;
    let rows_per_page = rows as usize;
    let container = Size::new(
        cards_per_row as f32 * (card_width + CARD_GUTTER_MM) - CARD_GUTTER_MM,
        rows_per_page as f32 * (card_height + CARD_GUTTER_MM) - CARD_GUTTER_MM,
    );

    log::debug!(
        "Grid for {} with {:.1}x{:.1}mm cards: {} x {} ({} faces per page)",
        page_size,
        card_width,
        card_height,
        cards_per_row,
        rows_per_page,
        cards_per_row * rows_per_page
    );

    Ok(Grid {
        page_size,
        card_size,
        cards_per_row,
        rows_per_page,
        max_faces_per_page: cards_per_row * rows_per_page,
        container,
    })
}

/// Wraps the injected measurer for one run and converts everything it reports
/// into millimetres. The pixel density is sampled once, from a 1mm reference
/// element, on first use.
pub struct MeasurementService<'m> {
    measurer: &'m mut dyn Measurer,
    px_per_mm: Option<f32>,
}

impl<'m> MeasurementService<'m> {
    pub fn new(measurer: &'m mut dyn Measurer) -> Self {
        Self {
            measurer,
            px_per_mm: None,
        }
    }

    pub fn px_per_mm(&mut self) -> Result<f32, LayoutError> {
        if let Some(ratio) = self.px_per_mm {
            return Ok(ratio);
        }
        let px = self.measurer.measure(&Renderable::Reference)?;
        if !(px.width.is_finite() && px.width > 0.0) {
            return Err(invalid_size(&Renderable::Reference, px).into());
        }
        log::debug!("{} reports {:.4} px/mm", self.measurer.name(), px.width);
        self.px_per_mm = Some(px.width);
        Ok(px.width)
    }

    /// Realized size of a card face in millimetres. Refuses cards with content
    /// still rendering.
    pub fn measure_face(&mut self, card: &Card, side: Side) -> Result<Size, LayoutError> {
        ensure_settled(card)?;
        let size = self.measure_mm(&Renderable::Face { card, side })?;
        Ok(size)
    }

    /// Height of one body block at `level`, in millimetres.
    pub fn block_extent(
        &mut self,
        card: &CardId,
        block: &ContentBlock,
        level: FontLevel,
    ) -> Result<f32, LayoutError> {
        Ok(self
            .measure_mm(&Renderable::Block { card, block, level })?
            .height)
    }

    /// Height of the material-component region at `level`, in millimetres.
    pub fn components_extent(
        &mut self,
        card: &CardId,
        block: &ContentBlock,
        level: FontLevel,
    ) -> Result<f32, LayoutError> {
        Ok(self
            .measure_mm(&Renderable::Components { card, block, level })?
            .height)
    }

    fn measure_mm(&mut self, renderable: &Renderable<'_>) -> Result<Size, LayoutError> {
        let ratio = self.px_per_mm()?;
        let px = self.measurer.measure(renderable)?;
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !valid(px.width) || !valid(px.height) {
            return Err(invalid_size(renderable, px).into());
        }
        Ok(px.to_mm(ratio))
    }
}

/// Fails on the first block, body or components, that has not finished rendering.
pub(crate) fn ensure_settled(card: &Card) -> Result<(), LayoutError> {
    match card.unsettled_blocks().next() {
        Some(pending) => Err(LayoutError::UnsettledContent {
            card: card.id.to_string(),
            block: pending.id.to_string(),
        }),
        None => Ok(()),
    }
}

fn invalid_size(renderable: &Renderable<'_>, px: PxSize) -> MeasureError {
    MeasureError::InvalidSize {
        what: renderable.describe(),
        width: px.width,
        height: px.height,
    }
}
