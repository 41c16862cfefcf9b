/// Shared types for gray64: pixel grids, histograms, configuration, errors.
///
/// Every other crate of the workspace builds on these definitions.

pub mod config;
pub mod error;
pub mod grid;
pub mod histogram;
pub mod rendition;
pub mod traits;

pub use config::AppConfig;
pub use error::CoreError;
pub use grid::PixelGrid;
pub use histogram::{Histogram, LabeledHistogram};
pub use rendition::Rendition;

/// Side length of a `.64` image in pixels.
pub const GRID_SIZE: u32 = 64;

/// Number of pixels in a full `.64` frame.
pub const PIXEL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Highest gray level of the 5-bit encoding.
pub const MAX_LEVEL: u8 = 31;

/// Number of distinct gray levels (histogram bins).
pub const LEVELS: usize = MAX_LEVEL as usize + 1;
