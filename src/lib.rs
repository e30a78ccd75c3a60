//! Lays printable cards out on fixed sheet grids.
//!
//! Cards whose content overflows the front face are split onto a back face,
//! shrinking the font level when needed; the resulting faces are then packed
//! page by page onto a landscape A4 or letter grid.

pub mod deck;
pub mod error;
pub mod pipeline;
pub mod plan;

pub use cardsheet_idf::{
    BlockKind, Card, ContentBlock, FontLevel, ReferencePair, SheetEntry, Side,
};
pub use cardsheet_layout::{
    FaceCapacity, FaceRef, Grid, LayoutContext, LayoutEngine, LayoutError, LayoutOptions,
    LayoutOutput, LayoutReport, Page, Slot, TrailingFill,
};
pub use cardsheet_traits::{FixedMeasurer, MeasureError, Measurer, Renderable};
pub use cardsheet_types::{CardId, Color, PageSize, Size};
pub use deck::Deck;
pub use error::PipelineError;
pub use pipeline::{CardsheetPipeline, PipelineBuilder};
pub use plan::{PagePlan, PlannedPage, PlannedSlot, SlotContent};
