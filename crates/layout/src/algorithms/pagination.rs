use cardsheet_types::EPSILON_MM;

pub struct FitAnalysis {
    pub overflows: bool,
    /// Capacity left over; negative when the content overflows.
    pub surplus: f32,
}

/// Centralized logic to check whether content fits a fixed-capacity face.
///
/// * `content_extent`: natural extent of the content along the scrolling axis (mm).
/// * `capacity`: the face's allotted viewport extent (mm).
///
/// Content that exactly fills the capacity does not overflow.
pub fn check_extent_fit(content_extent: f32, capacity: f32) -> FitAnalysis {
    FitAnalysis {
        overflows: content_extent > capacity + EPSILON_MM,
        surplus: capacity - content_extent,
    }
}
