//! Measurer trait for abstracting the rendering surface used to size card faces.
//!
//! Measuring is render-then-query: the renderable is attached to a scratch
//! surface, its realized size is read back, and it is detached again. Only one
//! renderable may occupy the surface at a time, which is why every method takes
//! `&mut self`: whoever holds the measurer holds the surface.

use cardsheet_idf::{Card, ContentBlock, FontLevel, Side};
use cardsheet_types::{CardId, PxSize, Size};
use std::collections::HashMap;
use std::fmt::Debug;
use thiserror::Error;

/// CSS reference pixel density: 96px per inch.
pub const CSS_PX_PER_MM: f32 = 96.0 / 25.4;

/// Error type for measurement operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("Content block '{0}' has not finished rendering")]
    Unsettled(String),

    #[error("Surface reported an unusable size for {what}: {width}x{height}px")]
    InvalidSize {
        what: String,
        width: f32,
        height: f32,
    },

    #[error("Rendering surface failed: {0}")]
    Surface(String),
}

/// Something that can be placed on the scratch surface and measured.
#[derive(Debug, Clone, Copy)]
pub enum Renderable<'a> {
    /// A 1mm-wide reference element, used to sample the pixel density.
    Reference,
    /// A complete card face as it would print.
    Face { card: &'a Card, side: Side },
    /// One body block rendered at the given font level.
    Block {
        card: &'a CardId,
        block: &'a ContentBlock,
        level: FontLevel,
    },
    /// The material-component text region of a card front.
    Components {
        card: &'a CardId,
        block: &'a ContentBlock,
        level: FontLevel,
    },
}

impl Renderable<'_> {
    /// Short description for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Renderable::Reference => "1mm reference".to_string(),
            Renderable::Face { card, side } => format!("{:?} face of '{}'", side, card.id),
            Renderable::Block { card, block, level } => {
                format!("block '{}' of '{}' at {:?}", block.id, card, level)
            }
            Renderable::Components { card, level, .. } => {
                format!("components of '{}' at {:?}", card, level)
            }
        }
    }
}

/// A rendering surface able to report realized pixel sizes.
///
/// # Implementations
///
/// - `FixedMeasurer`: deterministic sizes from a lookup table (always available)
///
/// Real targets back this with whatever surface exists there: a headless
/// browser, an off-screen canvas, or a text-metrics-only layout pass.
pub trait Measurer: Debug {
    /// Attach `renderable`, read its realized size in pixels, detach it.
    fn measure(&mut self, renderable: &Renderable<'_>) -> Result<PxSize, MeasureError>;

    /// Returns a human-readable name for this measurer (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<M: Measurer + ?Sized> Measurer for Box<M> {
    fn measure(&mut self, renderable: &Renderable<'_>) -> Result<PxSize, MeasureError> {
        (**self).measure(renderable)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// A measurer that answers from pre-populated block heights.
///
/// Heights are given in millimetres at `FontLevel::Normal` and scaled by the
/// level's line pitch; results are reported in pixels at a fixed density so the
/// px→mm conversion downstream is exercised exactly as with a real surface.
#[derive(Debug, Clone)]
pub struct FixedMeasurer {
    px_per_mm: f32,
    card_size: Size,
    default_block_height: f32,
    block_heights: HashMap<String, f32>,
    measurements: usize,
    reference_samples: usize,
}

impl FixedMeasurer {
    pub fn new(card_size: Size) -> Self {
        Self {
            px_per_mm: CSS_PX_PER_MM,
            card_size,
            default_block_height: 10.0,
            block_heights: HashMap::new(),
            measurements: 0,
            reference_samples: 0,
        }
    }

    pub fn with_px_per_mm(mut self, px_per_mm: f32) -> Self {
        self.px_per_mm = px_per_mm;
        self
    }

    /// Height used for blocks without an explicit entry.
    pub fn with_default_block_height(mut self, height_mm: f32) -> Self {
        self.default_block_height = height_mm;
        self
    }

    pub fn with_block_height(mut self, id: impl Into<String>, height_mm: f32) -> Self {
        self.set_block_height(id, height_mm);
        self
    }

    pub fn set_block_height(&mut self, id: impl Into<String>, height_mm: f32) {
        self.block_heights.insert(id.into(), height_mm);
    }

    pub fn card_size(&self) -> Size {
        self.card_size
    }

    /// Total number of `measure` calls answered so far.
    pub fn measurements(&self) -> usize {
        self.measurements
    }

    /// How many times the 1mm reference element was sampled.
    pub fn reference_samples(&self) -> usize {
        self.reference_samples
    }

    fn natural_height(&self, block: &ContentBlock) -> f32 {
        self.block_heights
            .get(block.id.as_str())
            .copied()
            .unwrap_or(self.default_block_height)
    }

    fn block_px(&self, block: &ContentBlock, level: FontLevel) -> Result<PxSize, MeasureError> {
        if !block.settled {
            return Err(MeasureError::Unsettled(block.id.to_string()));
        }
        let height = self.natural_height(block) * level.line_pitch_ratio();
        Ok(PxSize::new(
            self.card_size.width * self.px_per_mm,
            height * self.px_per_mm,
        ))
    }
}

impl Measurer for FixedMeasurer {
    fn measure(&mut self, renderable: &Renderable<'_>) -> Result<PxSize, MeasureError> {
        self.measurements += 1;
        match renderable {
            Renderable::Reference => {
                self.reference_samples += 1;
                Ok(PxSize::new(self.px_per_mm, self.px_per_mm))
            }
            Renderable::Face { .. } => Ok(PxSize::new(
                self.card_size.width * self.px_per_mm,
                self.card_size.height * self.px_per_mm,
            )),
            Renderable::Block { block, level, .. } | Renderable::Components { block, level, .. } => {
                self.block_px(block, *level)
            }
        }
    }

    fn name(&self) -> &'static str {
        "FixedMeasurer"
    }
}
