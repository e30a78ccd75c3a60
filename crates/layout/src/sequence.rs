//! Face sequencing: turns resolved entries into the ordered run of faces and
//! spacers that the page packer consumes.

use crate::config::LayoutOptions;
use crate::measure::Grid;
use cardsheet_idf::SheetEntry;
use cardsheet_types::CardId;
use serde::Serialize;

/// One printable face, by reference to the entry it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "face", content = "card", rename_all = "camelCase")]
pub enum FaceRef {
    Front(CardId),
    Back(CardId),
    /// Generated placeholder back used in default-back mode.
    FillerBack(CardId),
    ReferenceFront(CardId),
    ReferenceBack(CardId),
}

impl FaceRef {
    pub fn card(&self) -> &CardId {
        match self {
            FaceRef::Front(id)
            | FaceRef::Back(id)
            | FaceRef::FillerBack(id)
            | FaceRef::ReferenceFront(id)
            | FaceRef::ReferenceBack(id) => id,
        }
    }

    pub fn is_front(&self) -> bool {
        matches!(self, FaceRef::Front(_) | FaceRef::ReferenceFront(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SequenceItem {
    Face(FaceRef),
    /// Deliberately empty slot keeping a front and its back in one row.
    Spacer,
}

impl SequenceItem {
    pub fn face(&self) -> Option<&FaceRef> {
        match self {
            SequenceItem::Face(face) => Some(face),
            SequenceItem::Spacer => None,
        }
    }
}

/// Lays the entries out as a face sequence, in input order.
///
/// In side-by-side mode a spacer precedes any two-faced entry whose front would
/// land in the last column, so its front and back share a row. With a single
/// column no row can hold both faces and no spacers are inserted.
pub fn sequence(entries: &[SheetEntry], grid: &Grid, options: &LayoutOptions) -> Vec<SequenceItem> {
    let columns = grid.cards_per_row;
    let keep_adjacent = options.side_by_side && !options.default_card_back;
    if keep_adjacent && columns < 2 {
        log::warn!("Side-by-side layout needs at least two columns; placing faces in order");
    }

    let mut items = Vec::with_capacity(entries.len() * 2);
    for entry in entries {
        let faces = faces_of(entry, options);
        if keep_adjacent && columns >= 2 && faces.len() == 2 && items.len() % columns == columns - 1 {
            log::trace!("Spacer before '{}' at slot {}", entry.id(), items.len());
            items.push(SequenceItem::Spacer);
        }
        items.extend(faces.into_iter().map(SequenceItem::Face));
    }
    items
}

fn faces_of(entry: &SheetEntry, options: &LayoutOptions) -> Vec<FaceRef> {
    match entry {
        SheetEntry::Reference(pair) => vec![
            FaceRef::ReferenceFront(pair.id.clone()),
            FaceRef::ReferenceBack(pair.id.clone()),
        ],
        SheetEntry::Card(card) => {
            let front = FaceRef::Front(card.id.clone());
            if card.has_back() {
                vec![front, FaceRef::Back(card.id.clone())]
            } else if options.default_card_back {
                vec![front, FaceRef::FillerBack(card.id.clone())]
            } else {
                vec![front]
            }
        }
    }
}
