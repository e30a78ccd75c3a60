use crate::config::{FaceCapacity, LayoutOptions};
use crate::measure::{compute_grid, Grid, MeasurementService};
use crate::overflow::{OverflowResolver, Resolution};
use crate::paging::{pack, Page};
use crate::report::LayoutReport;
use crate::sequence::sequence;
use crate::LayoutError;
use cardsheet_idf::{Card, SheetEntry, Side};
use cardsheet_traits::Measurer;
use cardsheet_types::{CardId, PageSize};

/// Everything a layout run depends on besides the entries and the measurer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutContext {
    pub page_size: PageSize,
    pub options: LayoutOptions,
    pub capacity: FaceCapacity,
    /// Card whose front face sets the grid. The first card of the run when unset.
    pub reference: Option<CardId>,
}

impl LayoutContext {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_capacity(mut self, capacity: FaceCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_reference(mut self, card: impl Into<CardId>) -> Self {
        self.reference = Some(card.into());
        self
    }

    fn reference_card<'a>(&self, entries: &'a [SheetEntry]) -> Result<&'a Card, LayoutError> {
        let mut cards = entries.iter().filter_map(SheetEntry::as_card);
        match &self.reference {
            Some(id) => cards
                .find(|card| &card.id == id)
                .ok_or_else(|| LayoutError::ReferenceNotFound(id.to_string())),
            None => cards.next().ok_or(LayoutError::NoReferenceCard),
        }
    }
}

/// Result of one layout run.
#[derive(Debug, Clone)]
pub struct LayoutOutput {
    pub grid: Grid,
    /// The input entries, with overflow resolution applied to every card.
    pub entries: Vec<SheetEntry>,
    pub resolutions: Vec<Resolution>,
    pub pages: Vec<Page>,
    pub report: LayoutReport,
}

impl LayoutOutput {
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.entries
            .iter()
            .filter_map(SheetEntry::as_card)
            .find(|card| card.id.as_str() == id)
    }
}

/// Sequences and packs already-resolved entries into pages.
pub fn layout(entries: &[SheetEntry], grid: &Grid, options: &LayoutOptions) -> Vec<Page> {
    pack(sequence(entries, grid, options), grid, options.trailing_fill)
}

/// Drives a full run: grid measurement, per-card overflow resolution, then
/// sequencing and packing.
///
/// The engine owns its measurer for the duration of the run. Cards are
/// resolved one after another because the measuring surface is a single
/// shared resource.
#[derive(Debug)]
pub struct LayoutEngine<M: Measurer> {
    measurer: M,
}

impl<M: Measurer> LayoutEngine<M> {
    pub fn new(measurer: M) -> Self {
        Self { measurer }
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    pub fn into_measurer(self) -> M {
        self.measurer
    }

    pub fn run(
        &mut self,
        ctx: &LayoutContext,
        mut entries: Vec<SheetEntry>,
    ) -> Result<LayoutOutput, LayoutError> {
        ctx.options.validate()?;
        log::info!(
            "Laying out {} entries on {} pages using {}",
            entries.len(),
            ctx.page_size,
            self.measurer.name()
        );

        let mut service = MeasurementService::new(&mut self.measurer);

        let grid = {
            let reference = ctx.reference_card(&entries)?;
            let card_size = service.measure_face(reference, Side::Front)?;
            log::debug!(
                "Reference card '{}' measures {:.2}x{:.2}mm",
                reference.id,
                card_size.width,
                card_size.height
            );
            compute_grid(ctx.page_size, card_size.width, card_size.height)?
        };

        let resolver = OverflowResolver::new(ctx.capacity);
        let mut resolutions = Vec::new();
        for card in entries.iter_mut().filter_map(|entry| match entry {
            SheetEntry::Card(card) => Some(card),
            SheetEntry::Reference(_) => None,
        }) {
            resolutions.push(resolver.resolve(card, &mut service)?);

            let face = service.measure_face(card, Side::Front)?;
            if !face.fuzzy_eq(&grid.card_size) {
                log::warn!(
                    "Card '{}' measures {:.2}x{:.2}mm but the grid was sized for {:.2}x{:.2}mm",
                    card.id,
                    face.width,
                    face.height,
                    grid.card_size.width,
                    grid.card_size.height
                );
            }
        }

        let pages = layout(&entries, &grid, &ctx.options);
        let report = LayoutReport::collect(&entries, &resolutions, &pages);
        report.log_summary();

        Ok(LayoutOutput {
            grid,
            entries,
            resolutions,
            pages,
            report,
        })
    }
}
