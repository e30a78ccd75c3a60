//! The page plan: a flat, serializable description of every page and slot,
//! positioned in page coordinates, for whatever paints or exports the sheets.

use cardsheet_idf::{Card, FontLevel, ReferencePair, SheetEntry};
use cardsheet_layout::{FaceRef, LayoutOutput, LayoutReport, Page, Slot};
use cardsheet_types::{BlockId, CardId, Color, PageSize, Rect, Size};
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePlan {
    pub page_size: PageSize,
    /// Landscape page dimensions.
    pub page: Size,
    pub card: Size,
    pub columns: usize,
    pub rows: usize,
    /// The grid container, centred on the page.
    pub container: Rect,
    pub pages: Vec<PlannedPage>,
    pub report: LayoutReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedPage {
    pub index: usize,
    pub slots: Vec<PlannedSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedSlot {
    pub row: usize,
    pub column: usize,
    pub rect: Rect,
    pub content: SlotContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SlotContent {
    #[serde(rename_all = "camelCase")]
    Face {
        face: FaceRef,
        title: String,
        font_level: FontLevel,
        accent: Color,
        blocks: Vec<BlockId>,
    },
    Spacer,
    Blank,
}

impl SlotContent {
    fn label(&self) -> String {
        match self {
            SlotContent::Face { face, .. } => match face {
                FaceRef::Front(id) => id.to_string(),
                FaceRef::Back(id) => format!("{id} (back)"),
                FaceRef::FillerBack(id) => format!("{id} (filler)"),
                FaceRef::ReferenceFront(id) => format!("[{id}]"),
                FaceRef::ReferenceBack(id) => format!("[{id}] (back)"),
            },
            SlotContent::Spacer => "spacer".to_string(),
            SlotContent::Blank => "-".to_string(),
        }
    }
}

struct EntryIndex<'a> {
    cards: HashMap<&'a CardId, &'a Card>,
    references: HashMap<&'a CardId, &'a ReferencePair>,
}

impl<'a> EntryIndex<'a> {
    fn new(entries: &'a [SheetEntry]) -> Self {
        let mut index = Self {
            cards: HashMap::new(),
            references: HashMap::new(),
        };
        for entry in entries {
            match entry {
                SheetEntry::Card(card) => {
                    index.cards.insert(&card.id, card);
                }
                SheetEntry::Reference(pair) => {
                    index.references.insert(&pair.id, pair);
                }
            }
        }
        index
    }

    fn content(&self, slot: &Slot) -> SlotContent {
        let face = match slot {
            Slot::Face { face } => face,
            Slot::Spacer => return SlotContent::Spacer,
            Slot::Blank => return SlotContent::Blank,
        };
        let (title, font_level, accent, blocks) = match face {
            FaceRef::Front(id) | FaceRef::Back(id) | FaceRef::FillerBack(id) => {
                match self.cards.get(id) {
                    Some(card) => {
                        let blocks = match face {
                            FaceRef::Front(_) => card.front.iter().map(|b| b.id.clone()).collect(),
                            FaceRef::Back(_) => card
                                .back
                                .iter()
                                .flatten()
                                .map(|b| b.id.clone())
                                .collect(),
                            _ => Vec::new(),
                        };
                        (card.title.clone(), card.font_level, card.accent, blocks)
                    }
                    None => (String::new(), FontLevel::Normal, Color::default(), Vec::new()),
                }
            }
            FaceRef::ReferenceFront(id) | FaceRef::ReferenceBack(id) => {
                let title = self
                    .references
                    .get(id)
                    .map(|pair| pair.title.clone())
                    .unwrap_or_default();
                (title, FontLevel::Normal, Color::default(), Vec::new())
            }
        };
        SlotContent::Face {
            face: face.clone(),
            title,
            font_level,
            accent,
            blocks,
        }
    }
}

impl PagePlan {
    pub fn from_output(output: &LayoutOutput) -> Self {
        let grid = &output.grid;
        let (page_width, page_height) = grid.page_size.dimensions_mm();
        let container = Rect::new(
            (page_width - grid.container.width) / 2.0,
            (page_height - grid.container.height) / 2.0,
            grid.container.width,
            grid.container.height,
        );

        let index = EntryIndex::new(&output.entries);
        let pages = output
            .pages
            .iter()
            .map(|page| plan_page(page, container, &index))
            .collect();

        Self {
            page_size: grid.page_size,
            page: Size::new(page_width, page_height),
            card: grid.card_size,
            columns: grid.cards_per_row,
            rows: grid.rows_per_page,
            container,
            pages,
            report: output.report.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn plan_page(page: &Page, container: Rect, index: &EntryIndex<'_>) -> PlannedPage {
    let slots = page
        .placements()
        .enumerate()
        .map(|(i, (rect, slot))| PlannedSlot {
            row: page.grid.row_of(i),
            column: page.grid.column_of(i),
            rect: Rect::new(container.x + rect.x, container.y + rect.y, rect.width, rect.height),
            content: index.content(slot),
        })
        .collect();
    PlannedPage {
        index: page.index,
        slots,
    }
}

impl fmt::Display for PagePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} pages, {} x {} grid of {:.1}x{:.1}mm cards",
            self.page_size, self.columns, self.rows, self.card.width, self.card.height
        )?;
        for page in &self.pages {
            writeln!(f, "page {}", page.index + 1)?;
            for row in &page.slots.iter().chunks(self.columns.max(1)) {
                writeln!(f, "  {}", row.map(|slot| slot.content.label()).join(" | "))?;
            }
        }
        Ok(())
    }
}
