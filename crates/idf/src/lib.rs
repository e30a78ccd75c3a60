//! Intermediate Card Format (ICF)
//! The in-memory representation of a card after rendering but before layout.
//! Layout treats block content as opaque: it only reorders blocks between the
//! faces of a card and reads their measured extents.

use cardsheet_types::{BlockId, CardId, Color};
use serde::{Deserialize, Serialize};

/// Suffix appended to the last front block when content continues on the back.
pub const CONTINUATION_MARKER: &str = " →";

// --- Blocks ---

/// What a block renders as. Layout never branches on this; it is carried for the
/// renderer and for debugging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Paragraph,
    Heading,
    List,
    Table,
    Rule,
}

/// An individually measurable unit of rendered content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: BlockId,
    #[serde(default)]
    pub kind: BlockKind,
    /// Rendered markup handed back to the renderer untouched.
    #[serde(default)]
    pub markup: String,
    /// False while an asynchronous sub-render (icon glyphs and the like) is still
    /// pending. Such a block has no defined height yet.
    #[serde(default = "default_true")]
    pub settled: bool,
}

fn default_true() -> bool {
    true
}

impl ContentBlock {
    pub fn new(id: impl Into<BlockId>, kind: BlockKind, markup: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            markup: markup.into(),
            settled: true,
        }
    }

    pub fn paragraph(id: impl Into<BlockId>, markup: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Paragraph, markup)
    }

    pub fn with_settled(mut self, settled: bool) -> Self {
        self.settled = settled;
        self
    }

    pub fn is_continued(&self) -> bool {
        self.markup.ends_with(CONTINUATION_MARKER)
    }

    /// Appends the continuation marker once.
    pub fn mark_continued(&mut self) {
        if !self.is_continued() {
            self.markup.push_str(CONTINUATION_MARKER);
        }
    }
}

// --- Faces ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
}

/// Discrete font-shrink escalation applied to a card's body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontLevel {
    #[default]
    Normal,
    Reduced,
    Minimal,
}

impl FontLevel {
    pub const MAX: FontLevel = FontLevel::Minimal;

    /// Number of shrink steps this level applies.
    pub fn steps(self) -> u8 {
        match self {
            FontLevel::Normal => 0,
            FontLevel::Reduced => 1,
            FontLevel::Minimal => 2,
        }
    }

    pub fn from_steps(steps: u8) -> Option<Self> {
        match steps {
            0 => Some(FontLevel::Normal),
            1 => Some(FontLevel::Reduced),
            2 => Some(FontLevel::Minimal),
            _ => None,
        }
    }

    /// Body font size in points.
    pub fn body_font_pt(self) -> f32 {
        match self {
            FontLevel::Normal => 9.0,
            FontLevel::Reduced => 8.0,
            FontLevel::Minimal => 7.0,
        }
    }

    /// Line height as a multiple of the font size.
    pub fn line_height(self) -> f32 {
        match self {
            FontLevel::Normal => 1.2,
            FontLevel::Reduced => 1.15,
            FontLevel::Minimal => 1.1,
        }
    }

    /// Line pitch relative to `Normal`; text blocks shrink vertically by roughly this factor.
    pub fn line_pitch_ratio(self) -> f32 {
        let base = FontLevel::Normal;
        (self.body_font_pt() * self.line_height()) / (base.body_font_pt() * base.line_height())
    }

    /// The next escalation step, or `None` at the cap.
    pub fn escalate(self) -> Option<Self> {
        Self::from_steps(self.steps() + 1)
    }
}

// --- Cards ---

/// One printable card: a front face, an optional back face and the metadata the
/// renderer needs to repaint either of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub title: String,
    pub front: Vec<ContentBlock>,
    /// Absent until overflow resolution creates a back face.
    #[serde(default)]
    pub back: Option<Vec<ContentBlock>>,
    /// The material-component text region shown above the body on the front.
    #[serde(default)]
    pub components: Option<ContentBlock>,
    #[serde(default)]
    pub font_level: FontLevel,
    #[serde(default)]
    pub accent: Color,
}

impl Card {
    pub fn new(id: impl Into<CardId>, front: Vec<ContentBlock>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            front,
            back: None,
            components: None,
            font_level: FontLevel::Normal,
            accent: Color::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_components(mut self, components: ContentBlock) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    pub fn has_back(&self) -> bool {
        self.back.is_some()
    }

    pub fn face_count(&self) -> usize {
        if self.has_back() { 2 } else { 1 }
    }

    pub fn blocks(&self, side: Side) -> &[ContentBlock] {
        match side {
            Side::Front => &self.front,
            Side::Back => self.back.as_deref().unwrap_or(&[]),
        }
    }

    /// Every block in reading order: front first, then back.
    pub fn all_blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.front.iter().chain(self.back.iter().flatten())
    }

    pub fn block_ids(&self) -> Vec<BlockId> {
        self.all_blocks().map(|b| b.id.clone()).collect()
    }

    /// Blocks and the component region that still await an asynchronous render.
    pub fn unsettled_blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.all_blocks()
            .chain(self.components.iter())
            .filter(|b| !b.settled)
    }
}

/// A fixed two-faced reference sheet (e.g. the glossary) placed among the cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePair {
    pub id: CardId,
    #[serde(default)]
    pub title: String,
}

/// One input entry to a layout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SheetEntry {
    Card(Card),
    Reference(ReferencePair),
}

impl SheetEntry {
    pub fn id(&self) -> &CardId {
        match self {
            SheetEntry::Card(card) => &card.id,
            SheetEntry::Reference(pair) => &pair.id,
        }
    }

    pub fn as_card(&self) -> Option<&Card> {
        match self {
            SheetEntry::Card(card) => Some(card),
            SheetEntry::Reference(_) => None,
        }
    }

    /// Faces this entry contributes before any default-back filler is added.
    pub fn face_count(&self) -> usize {
        match self {
            SheetEntry::Card(card) => card.face_count(),
            SheetEntry::Reference(_) => 2,
        }
    }
}

impl From<Card> for SheetEntry {
    fn from(card: Card) -> Self {
        SheetEntry::Card(card)
    }
}

impl From<ReferencePair> for SheetEntry {
    fn from(pair: ReferencePair) -> Self {
        SheetEntry::Reference(pair)
    }
}
