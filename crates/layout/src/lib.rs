use cardsheet_traits::MeasureError;
use cardsheet_types::{PageSize, UnknownPageSize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    UnknownPageSize(#[from] UnknownPageSize),
    #[error("Card size {0:.2}x{1:.2}mm is not a positive, finite size.")]
    InvalidCardSize(f32, f32),
    #[error(
        "A {card_width:.1}x{card_height:.1}mm card does not fit the printable area of a {page} page ({columns} columns x {rows} rows)."
    )]
    GridTooSmall {
        page: PageSize,
        card_width: f32,
        card_height: f32,
        columns: i64,
        rows: i64,
    },
    #[error("The default-card-back and side-by-side policies are mutually exclusive.")]
    ConflictingOptions,
    #[error("No card is available to measure the grid from.")]
    NoReferenceCard,
    #[error("Reference card '{0}' is not part of this run.")]
    ReferenceNotFound(String),
    #[error("Card '{card}' cannot be measured: block '{block}' is still rendering.")]
    UnsettledContent { card: String, block: String },
    #[error("Measurement failed: {0}")]
    Measure(#[from] MeasureError),
}

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod measure;
pub mod overflow;
pub mod paging;
pub mod report;
pub mod sequence;

pub use self::config::{FaceCapacity, LayoutOptions, TrailingFill, DEFAULT_BODY_CAPACITY_MM};
pub use self::engine::{layout, LayoutContext, LayoutEngine, LayoutOutput};
pub use self::measure::{compute_grid, Grid, MeasurementService, CARD_GUTTER_MM, PAGE_PADDING_MM};
pub use self::overflow::{split, ExtentSource, OverflowResolver, OverflowState, Resolution, Split};
pub use self::paging::{pack, Page, Slot};
pub use self::report::LayoutReport;
pub use self::sequence::{sequence, FaceRef, SequenceItem};

#[cfg(test)]
mod test_utils;
