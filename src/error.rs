//! Error types for canvas construction and startup.
//!
//! Runtime geometry never fails: out-of-range drags and pans are clamped.
//! Everything here is raised while building the world or launching the window.

/// Errors raised while validating configuration or starting the application.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// A node was created with a non-positive or non-finite dimension.
    #[error("node size must be strictly positive, got {width}x{height}")]
    InvalidNodeSize {
        /// Requested width in world units
        width: f32,
        /// Requested height in world units
        height: f32,
    },
    /// The world half-extents were zero or negative, or the bounds they give overflow.
    #[error("world half-extents must be strictly positive and fit the grid, got {half_width}x{half_height} squares")]
    InvalidWorldExtents {
        /// Requested half-width in grid squares
        half_width: i32,
        /// Requested half-height in grid squares
        half_height: i32,
    },
    /// The grid square size was zero or negative.
    #[error("grid square size must be strictly positive, got {0}")]
    InvalidSquareSize(i32),
    /// The major grid interval was zero or negative.
    #[error("major grid interval must be strictly positive, got {0}")]
    InvalidMajorGridEvery(i32),
    /// A zoom factor was zero, negative or not finite.
    #[error("zoom must be strictly positive, got {0}")]
    InvalidZoom(f32),
    /// The configured window size was zero, negative or not finite.
    #[error("window size must be strictly positive, got {width}x{height}")]
    InvalidWindowSize {
        /// Requested window width in points
        width: f32,
        /// Requested window height in points
        height: f32,
    },
    /// The configured frame-rate cap was zero.
    #[error("target frame rate must be at least 1")]
    InvalidFrameRate,
    /// The configuration file could not be parsed.
    #[error("invalid canvas config: {0}")]
    Config(#[from] serde_json::Error),
    /// The configuration file could not be read.
    #[error("failed to read canvas config: {0}")]
    Io(#[from] std::io::Error),
    /// The native window failed to start.
    #[error("window error: {0}")]
    Window(#[from] eframe::Error),
}
