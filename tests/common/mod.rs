pub mod fixtures;

use cardsheet::{
    FixedMeasurer, LayoutContext, LayoutEngine, LayoutError, LayoutOutput, PageSize, SheetEntry,
    Size, Slot,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn run_layout(
    measurer: FixedMeasurer,
    ctx: &LayoutContext,
    entries: Vec<SheetEntry>,
) -> Result<LayoutOutput, LayoutError> {
    init_logger();
    LayoutEngine::new(measurer).run(ctx, entries)
}

/// 80x120mm faces: a 3 x 1 grid on letter.
pub fn three_up() -> FixedMeasurer {
    FixedMeasurer::new(Size::new(80.0, 120.0))
}

/// 63.5x88.9mm faces: a 4 x 2 grid on letter.
pub fn poker() -> FixedMeasurer {
    FixedMeasurer::new(Size::new(63.5, 88.9))
}

pub fn letter() -> LayoutContext {
    LayoutContext::new(PageSize::Letter)
}

/// Every slot of the run, in page order.
pub fn all_slots(output: &LayoutOutput) -> Vec<&Slot> {
    output.pages.iter().flat_map(|p| p.slots.iter()).collect()
}
