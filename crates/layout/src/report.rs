use crate::overflow::Resolution;
use crate::paging::{Page, Slot};
use crate::sequence::FaceRef;
use cardsheet_idf::{FontLevel, SheetEntry};
use serde::Serialize;

/// Counters describing one layout run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub cards: usize,
    pub reference_pairs: usize,
    /// Cards that gained a back face during overflow resolution.
    pub split_cards: usize,
    /// Cards printing below the normal font level.
    pub shrunk_cards: usize,
    /// Cards whose content still overflows after full escalation.
    pub degraded_cards: usize,
    pub filler_backs: usize,
    pub pages: usize,
    pub faces: usize,
    pub spacers: usize,
    pub blanks: usize,
}

impl LayoutReport {
    pub fn collect(entries: &[SheetEntry], resolutions: &[Resolution], pages: &[Page]) -> Self {
        let mut report = LayoutReport::default();
        for entry in entries {
            match entry {
                SheetEntry::Card(card) => {
                    report.cards += 1;
                    if card.font_level > FontLevel::Normal {
                        report.shrunk_cards += 1;
                    }
                }
                SheetEntry::Reference(_) => report.reference_pairs += 1,
            }
        }
        report.split_cards = resolutions.iter().filter(|r| r.created_back()).count();
        report.degraded_cards = resolutions.iter().filter(|r| r.degraded).count();

        report.pages = pages.len();
        for slot in pages.iter().flat_map(|p| &p.slots) {
            match slot {
                Slot::Face { face } => {
                    report.faces += 1;
                    if matches!(face, FaceRef::FillerBack(_)) {
                        report.filler_backs += 1;
                    }
                }
                Slot::Spacer => report.spacers += 1,
                Slot::Blank => report.blanks += 1,
            }
        }
        report
    }

    pub fn log_summary(&self) {
        log::info!(
            "Laid out {} card(s) and {} reference pair(s) on {} page(s)",
            self.cards,
            self.reference_pairs,
            self.pages
        );
        log::info!(
            "Faces: {} ({} filler backs), spacers: {}, blanks: {}",
            self.faces,
            self.filler_backs,
            self.spacers,
            self.blanks
        );
        if self.split_cards + self.shrunk_cards > 0 {
            log::info!(
                "Overflow: {} split, {} shrunk",
                self.split_cards,
                self.shrunk_cards
            );
        }
        if self.degraded_cards > 0 {
            log::warn!(
                "{} card(s) still overflow at the smallest font level",
                self.degraded_cards
            );
        }
    }
}
