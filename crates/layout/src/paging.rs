//! Page packing: consumes a face sequence, in order, into fixed-capacity pages.

use crate::config::TrailingFill;
use crate::measure::Grid;
use crate::sequence::{FaceRef, SequenceItem};
use cardsheet_types::Rect;
use serde::Serialize;

/// One grid position on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Slot {
    Face { face: FaceRef },
    /// Inserted to keep a front and back in one row; renders blank.
    Spacer,
    /// Trailing placeholder keeping the page geometry fixed.
    Blank,
}

impl Slot {
    pub fn face(&self) -> Option<&FaceRef> {
        match self {
            Slot::Face { face } => Some(face),
            Slot::Spacer | Slot::Blank => None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.face().is_some()
    }
}

impl From<SequenceItem> for Slot {
    fn from(item: SequenceItem) -> Self {
        match item {
            SequenceItem::Face(face) => Slot::Face { face },
            SequenceItem::Spacer => Slot::Spacer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub index: usize,
    pub grid: Grid,
    pub slots: Vec<Slot>,
}

impl Page {
    fn new(index: usize, grid: Grid) -> Self {
        Self {
            index,
            grid,
            slots: Vec::with_capacity(grid.max_faces_per_page),
        }
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.grid.max_faces_per_page
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn blanks(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Blank)).count()
    }

    pub fn spacers(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Spacer)).count()
    }

    /// Slots with their position inside the page's grid container.
    pub fn placements(&self) -> impl Iterator<Item = (Rect, &Slot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (self.grid.slot_rect(i), slot))
    }

    fn pad_to(&mut self, len: usize) {
        let len = len.min(self.grid.max_faces_per_page);
        while self.slots.len() < len {
            self.slots.push(Slot::Blank);
        }
    }
}

/// Packs `items` into pages of `grid.max_faces_per_page` slots each.
///
/// Slots are filled strictly in sequence order and never reassigned. Only the
/// last page is padded, according to `fill`.
pub fn pack(items: Vec<SequenceItem>, grid: &Grid, fill: TrailingFill) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    for item in items {
        if pages.last().is_none_or(Page::is_full) {
            pages.push(Page::new(pages.len(), *grid));
        }
        if let Some(page) = pages.last_mut() {
            page.slots.push(item.into());
        }
    }

    if let Some(last) = pages.last_mut() {
        let columns = grid.cards_per_row;
        let used = last.slots.len();
        match fill {
            TrailingFill::FullPage => last.pad_to(grid.max_faces_per_page),
            TrailingFill::MinimumRows(rows) => {
                let complete_row = used.div_ceil(columns) * columns;
                last.pad_to(complete_row.max(rows * columns));
            }
            TrailingFill::None => {}
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::compute_grid;
    use cardsheet_types::PageSize;

    fn faces(n: usize) -> Vec<SequenceItem> {
        (0..n)
            .map(|i| SequenceItem::Face(FaceRef::Front(format!("card-{i}").into())))
            .collect()
    }

    fn poker_grid() -> Grid {
        // 4 x 2 on letter
        compute_grid(PageSize::Letter, 63.5, 88.9).unwrap()
    }

    #[test]
    fn test_page_count_is_ceiling_of_faces() {
        let grid = poker_grid();
        for n in [1, 7, 8, 9, 16, 17, 40] {
            let pages = pack(faces(n), &grid, TrailingFill::FullPage);
            assert_eq!(pages.len(), n.div_ceil(grid.max_faces_per_page), "n = {n}");
            let total: usize = pages.iter().map(Page::occupied).sum();
            assert_eq!(total, n);
        }
    }

    #[test]
    fn test_empty_sequence_has_no_pages() {
        assert!(pack(Vec::new(), &poker_grid(), TrailingFill::FullPage).is_empty());
    }

    #[test]
    fn test_full_page_fill_pads_last_page() {
        let grid = poker_grid();
        let pages = pack(faces(10), &grid, TrailingFill::FullPage);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].slots.len(), 8);
        assert_eq!(pages[1].occupied(), 2);
        assert_eq!(pages[1].blanks(), 6);
        assert_eq!(pages[0].blanks(), 0);
    }

    #[test]
    fn test_minimum_rows_fill() {
        let grid = poker_grid();
        let pages = pack(faces(1), &grid, TrailingFill::MinimumRows(1));
        assert_eq!(pages[0].slots.len(), 4);

        let pages = pack(faces(5), &grid, TrailingFill::MinimumRows(1));
        assert_eq!(pages[0].slots.len(), 8, "partial second row is completed");

        let pages = pack(faces(1), &grid, TrailingFill::MinimumRows(5));
        assert_eq!(pages[0].slots.len(), 8, "capped at page capacity");
    }

    #[test]
    fn test_no_fill_leaves_last_page_short() {
        let pages = pack(faces(3), &poker_grid(), TrailingFill::None);
        assert_eq!(pages[0].slots.len(), 3);
        assert_eq!(pages[0].blanks(), 0);
    }

    #[test]
    fn test_order_is_preserved_across_pages() {
        let grid = poker_grid();
        let input = faces(20);
        let expected: Vec<_> = input.iter().filter_map(|i| i.face().cloned()).collect();
        let pages = pack(input, &grid, TrailingFill::FullPage);
        let packed: Vec<_> = pages
            .iter()
            .flat_map(|p| p.slots.iter().filter_map(Slot::face).cloned())
            .collect();
        assert_eq!(packed, expected);
        assert!(pages.iter().enumerate().all(|(i, p)| p.index == i));
    }

    #[test]
    fn test_placements_stay_inside_container() {
        let grid = poker_grid();
        let pages = pack(faces(8), &grid, TrailingFill::FullPage);
        let container = Rect::new(0.0, 0.0, grid.container.width, grid.container.height);
        for (rect, _) in pages[0].placements() {
            assert!(container.contains(&rect), "{rect:?}");
        }
    }
}
