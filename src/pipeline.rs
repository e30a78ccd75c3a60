use crate::deck::Deck;
use crate::error::PipelineError;
use crate::plan::PagePlan;
use cardsheet_idf::SheetEntry;
use cardsheet_layout::{FaceCapacity, LayoutContext, LayoutEngine, LayoutOptions, LayoutOutput};
use cardsheet_traits::Measurer;
use cardsheet_types::{CardId, PageSize};
use std::fs;
use std::path::Path;

/// A builder for creating a `CardsheetPipeline`.
#[derive(Default)]
pub struct PipelineBuilder {
    deck: Option<Deck>,
    page_size: Option<PageSize>,
    options: Option<LayoutOptions>,
    capacity: Option<FaceCapacity>,
    reference: Option<CardId>,
    measurer: Option<Box<dyn Measurer>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads entries and sheet settings from a JSON deck file.
    pub fn with_deck_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.deck = Some(Deck::from_file(path)?);
        Ok(self)
    }

    /// Loads entries and sheet settings from a JSON deck string.
    pub fn with_deck_source(mut self, source: &str) -> Result<Self, PipelineError> {
        self.deck = Some(Deck::from_json(source)?);
        Ok(self)
    }

    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Lays out `entries` with default deck settings.
    pub fn with_entries(self, entries: Vec<SheetEntry>) -> Self {
        self.with_deck(Deck::new(entries))
    }

    /// Overrides the deck's page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Overrides the deck's layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_capacity(mut self, capacity: FaceCapacity) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Measures the grid from `card` instead of the first card.
    pub fn with_reference(mut self, card: impl Into<CardId>) -> Self {
        self.reference = Some(card.into());
        self
    }

    /// Replaces the deck's deterministic measurer with a real surface.
    pub fn with_measurer<M: Measurer + 'static>(mut self, measurer: M) -> Self {
        self.measurer = Some(Box::new(measurer));
        self
    }

    pub fn build(self) -> Result<CardsheetPipeline, PipelineError> {
        let deck = self.deck.ok_or_else(|| {
            PipelineError::Config(
                "No deck has been configured. Use `with_deck_file` or `with_entries`.".to_string(),
            )
        })?;

        let mut context = deck.context();
        if let Some(page_size) = self.page_size {
            context.page_size = page_size;
        }
        if let Some(options) = self.options {
            context.options = options;
        }
        if let Some(capacity) = self.capacity {
            context.capacity = capacity;
        }
        if self.reference.is_some() {
            context.reference = self.reference;
        }
        context.options.validate()?;

        let measurer = match self.measurer {
            Some(measurer) => measurer,
            None => Box::new(deck.measurer()) as Box<dyn Measurer>,
        };
        log::info!(
            "Pipeline ready: {} entries, {} pages, measured by {}",
            deck.entries.len(),
            context.page_size,
            measurer.name()
        );

        Ok(CardsheetPipeline {
            context,
            entries: deck.entries,
            engine: LayoutEngine::new(measurer),
        })
    }
}

/// Lays a fixed set of entries out, as often as asked.
pub struct CardsheetPipeline {
    context: LayoutContext,
    entries: Vec<SheetEntry>,
    engine: LayoutEngine<Box<dyn Measurer>>,
}

impl CardsheetPipeline {
    pub fn context(&self) -> &LayoutContext {
        &self.context
    }

    pub fn entries(&self) -> &[SheetEntry] {
        &self.entries
    }

    /// Runs the layout engine over a copy of the configured entries.
    pub fn layout(&mut self) -> Result<LayoutOutput, PipelineError> {
        Ok(self.engine.run(&self.context, self.entries.clone())?)
    }

    pub fn plan(&mut self) -> Result<PagePlan, PipelineError> {
        let output = self.layout()?;
        Ok(PagePlan::from_output(&output))
    }

    /// Writes the page plan as pretty-printed JSON.
    pub fn write_plan<P: AsRef<Path>>(&mut self, path: P) -> Result<PagePlan, PipelineError> {
        let plan = self.plan()?;
        fs::write(path.as_ref(), plan.to_json()?)?;
        log::info!("Wrote page plan to {}", path.as_ref().display());
        Ok(plan)
    }
}
