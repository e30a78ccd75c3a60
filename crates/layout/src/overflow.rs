//! Overflow resolution: decides whether a card needs a back face, how its body
//! blocks are shared between front and back, and which font level it prints at.
//!
//! The decision is made by [`split`], a pure function over block extents that
//! returns fresh block allocations. [`OverflowResolver`] feeds it measured
//! extents and writes the decided allocation into the card once.
//!
//! Escalation is bounded: the font level never goes past `FontLevel::MAX`, and
//! content that still overflows there is accepted as-is.

use crate::algorithms::pagination::check_extent_fit;
use crate::config::FaceCapacity;
use crate::measure::{ensure_settled, MeasurementService};
use crate::LayoutError;
use cardsheet_idf::{Card, ContentBlock, FontLevel};
use cardsheet_types::CardId;
use serde::Serialize;

/// Steps of the per-card resolution state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverflowState {
    /// Checking the untouched front at the normal font level.
    Fitting,
    /// Tentative first shrink step, without a back face.
    TrialShrink,
    /// Escalated to a smaller font after a back face overflowed.
    Shrunk(FontLevel),
    /// Moving trailing blocks onto a back face at the given level.
    Splitting(FontLevel),
    Accepted,
}

/// Supplies block extents in millimetres.
pub trait ExtentSource {
    /// Height of one body block at `level`.
    fn block(&mut self, block: &ContentBlock, level: FontLevel) -> Result<f32, LayoutError>;

    /// Height taken from the front body by the component region at `level`.
    fn components(&mut self, level: FontLevel) -> Result<f32, LayoutError>;
}

/// The decided allocation for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub front: Vec<ContentBlock>,
    /// `None` when everything fits on the front.
    pub back: Option<Vec<ContentBlock>>,
    pub font_level: FontLevel,
    pub trail: Vec<OverflowState>,
    /// Content still overflows a face at the final level.
    pub degraded: bool,
}

impl Split {
    pub fn moved(&self) -> usize {
        self.back.as_ref().map_or(0, Vec::len)
    }
}

/// Front-face extents at one font level.
#[derive(Clone)]
struct FrontMeasure {
    heights: Vec<f32>,
    available: f32,
}

impl FrontMeasure {
    fn take(
        blocks: &[ContentBlock],
        capacity: FaceCapacity,
        level: FontLevel,
        extents: &mut dyn ExtentSource,
    ) -> Result<Self, LayoutError> {
        let heights = blocks
            .iter()
            .map(|block| extents.block(block, level))
            .collect::<Result<Vec<_>, _>>()?;
        let available = capacity.front_mm - extents.components(level)?;
        Ok(Self { heights, available })
    }

    fn total(&self) -> f32 {
        self.heights.iter().sum()
    }

    fn overflows(&self) -> bool {
        check_extent_fit(self.total(), self.available).overflows
    }
}

/// Decides how `blocks` are shared between a front and an optional back face.
///
/// 1. The front is checked at the normal level; if it fits, nothing changes.
/// 2. One shrink step is tried without a back face; if it fits, the card keeps
///    that level. Otherwise the shrink is reverted.
/// 3. Trailing blocks move, last first, onto a back face until the front fits.
/// 4. If the back overflows and the level can still escalate, the move is undone
///    and step 3 repeats one level smaller. At the cap the result is accepted.
///
/// `front ++ back` of the result always equals `blocks` in order; only the last
/// front block's markup changes (the continuation marker).
pub fn split(
    blocks: &[ContentBlock],
    capacity: FaceCapacity,
    extents: &mut dyn ExtentSource,
) -> Result<Split, LayoutError> {
    let mut trail = vec![OverflowState::Fitting];

    let normal = FrontMeasure::take(blocks, capacity, FontLevel::Normal, extents)?;
    if !normal.overflows() {
        trail.push(OverflowState::Accepted);
        return Ok(unsplit(blocks, FontLevel::Normal, trail, false));
    }

    trail.push(OverflowState::TrialShrink);
    let trial_level = FontLevel::Reduced;
    let trial = FrontMeasure::take(blocks, capacity, trial_level, extents)?;
    if !trial.overflows() {
        trail.push(OverflowState::Accepted);
        return Ok(unsplit(blocks, trial_level, trail, false));
    }

    let mut level = FontLevel::Normal;
    loop {
        trail.push(OverflowState::Splitting(level));
        let front = if level == FontLevel::Normal {
            normal.clone()
        } else {
            FrontMeasure::take(blocks, capacity, level, extents)?
        };
        let available = front.available;

        let mut cut = front.heights.len();
        let mut front_total = front.total();
        while cut > 0 && check_extent_fit(front_total, available).overflows {
            cut -= 1;
            front_total -= front.heights[cut];
        }
        let back_total: f32 = front.heights[cut..].iter().sum();
        let front_overflows = check_extent_fit(front_total, available).overflows;
        let back_overflows = check_extent_fit(back_total, capacity.back_mm).overflows;

        if back_overflows {
            if let Some(next) = level.escalate() {
                log::trace!(
                    "Back face overflows by {:.2}mm at {:?}; escalating to {:?}",
                    back_total - capacity.back_mm,
                    level,
                    next
                );
                level = next;
                trail.push(OverflowState::Shrunk(level));
                continue;
            }
        }

        trail.push(OverflowState::Accepted);
        let degraded = front_overflows || back_overflows;
        if cut == blocks.len() {
            // Nothing could move (empty body, or the front fits once shrunk this far).
            return Ok(unsplit(blocks, level, trail, degraded));
        }

        let mut front_blocks = blocks[..cut].to_vec();
        if let Some(last) = front_blocks.last_mut() {
            last.mark_continued();
        }
        return Ok(Split {
            front: front_blocks,
            back: Some(blocks[cut..].to_vec()),
            font_level: level,
            trail,
            degraded,
        });
    }
}

fn unsplit(
    blocks: &[ContentBlock],
    font_level: FontLevel,
    trail: Vec<OverflowState>,
    degraded: bool,
) -> Split {
    Split {
        front: blocks.to_vec(),
        back: None,
        font_level,
        trail,
        degraded,
    }
}

/// Outcome of resolving one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub card: CardId,
    pub font_level: FontLevel,
    pub moved_blocks: usize,
    pub degraded: bool,
    pub trail: Vec<OverflowState>,
}

impl Resolution {
    pub fn created_back(&self) -> bool {
        self.moved_blocks > 0
    }
}

/// Measured extents of one card, read through the run's measurement service.
struct CardExtents<'a, 's, 'm> {
    service: &'s mut MeasurementService<'m>,
    card: &'a CardId,
    components: Option<&'a ContentBlock>,
}

impl ExtentSource for CardExtents<'_, '_, '_> {
    fn block(&mut self, block: &ContentBlock, level: FontLevel) -> Result<f32, LayoutError> {
        self.service.block_extent(self.card, block, level)
    }

    fn components(&mut self, level: FontLevel) -> Result<f32, LayoutError> {
        match self.components {
            Some(block) => self.service.components_extent(self.card, block, level),
            None => Ok(0.0),
        }
    }
}

/// Applies [`split`] to cards, one at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverflowResolver {
    capacity: FaceCapacity,
}

impl OverflowResolver {
    pub fn new(capacity: FaceCapacity) -> Self {
        Self { capacity }
    }

    /// Resolves `card` in place. A card that already carries a back face is left
    /// untouched, so resolving twice is a no-op.
    pub fn resolve(
        &self,
        card: &mut Card,
        service: &mut MeasurementService<'_>,
    ) -> Result<Resolution, LayoutError> {
        ensure_settled(card)?;

        if card.has_back() {
            // Already two-faced: nothing moves on this pass.
            return Ok(Resolution {
                card: card.id.clone(),
                font_level: card.font_level,
                moved_blocks: 0,
                degraded: false,
                trail: vec![OverflowState::Accepted],
            });
        }

        let decided = {
            let mut extents = CardExtents {
                service,
                card: &card.id,
                components: card.components.as_ref(),
            };
            split(&card.front, self.capacity, &mut extents)?
        };

        let resolution = Resolution {
            card: card.id.clone(),
            font_level: decided.font_level,
            moved_blocks: decided.moved(),
            degraded: decided.degraded,
            trail: decided.trail,
        };

        if resolution.degraded {
            log::warn!(
                "Card '{}' still overflows at {:?}; content will be clipped",
                card.id,
                resolution.font_level
            );
        } else if resolution.created_back() {
            log::debug!(
                "Card '{}' split: {} block(s) moved to the back at {:?}",
                card.id,
                resolution.moved_blocks,
                resolution.font_level
            );
        }

        card.front = decided.front;
        card.back = decided.back;
        card.font_level = decided.font_level;
        Ok(resolution)
    }
}
