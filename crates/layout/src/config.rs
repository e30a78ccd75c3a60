use crate::LayoutError;
use serde::{Deserialize, Serialize};

/// Body viewport height of a face when nothing else is configured, in millimetres.
pub const DEFAULT_BODY_CAPACITY_MM: f32 = 60.0;

/// Layout policies for one run. Both flags default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Give every card a back face, using a generated filler when overflow
    /// resolution produced none. Faces are then packed strictly as
    /// `front, back, front, back, ...`.
    pub default_card_back: bool,
    /// Keep the front and back of a two-faced card in the same row, inserting a
    /// spacer slot when the front would otherwise land in the last column.
    pub side_by_side: bool,
    /// How the final page is padded after the last face.
    pub trailing_fill: TrailingFill,
}

impl LayoutOptions {
    /// The two policies are mutually exclusive.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.default_card_back && self.side_by_side {
            return Err(LayoutError::ConflictingOptions);
        }
        Ok(())
    }
}

/// Padding policy for the last page of a run.
///
/// - **FullPage**: every remaining slot becomes a blank placeholder, so each page
///   has exactly `max_faces_per_page` slots.
/// - **MinimumRows**: the last page is padded to complete its current row and to
///   at least the given number of rows (capped at the page's row count).
/// - **None**: the last page ends at its last face or spacer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrailingFill {
    #[default]
    FullPage,
    MinimumRows(usize),
    None,
}

/// Fixed body capacities of a card's faces, in millimetres.
///
/// The front's usable height is `front_mm` minus whatever the material-component
/// region takes at the current font level; the back has no component region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceCapacity {
    pub front_mm: f32,
    pub back_mm: f32,
}

impl FaceCapacity {
    /// A back face matching the front's body region.
    pub fn uniform(body_mm: f32) -> Self {
        Self {
            front_mm: body_mm,
            back_mm: body_mm,
        }
    }
}

impl Default for FaceCapacity {
    fn default() -> Self {
        Self::uniform(DEFAULT_BODY_CAPACITY_MM)
    }
}
