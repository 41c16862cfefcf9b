/// TUI rendering module for gray64.
///
/// Provides the pixel canvas, the histogram chart and the screen layout.
pub mod canvas;
pub mod chart;
pub mod ui;
