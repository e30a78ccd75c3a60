pub mod color;
pub mod geometry;
pub mod ids;
pub mod page;

pub use color::Color;
pub use geometry::{PxSize, Rect, Size, EPSILON_MM};
pub use ids::{BlockId, CardId};
pub use page::{PageSize, UnknownPageSize};
