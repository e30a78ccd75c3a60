pub mod measurer;

pub use measurer::{FixedMeasurer, MeasureError, Measurer, Renderable, CSS_PX_PER_MM};
