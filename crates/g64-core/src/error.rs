use thiserror::Error;

/// Errors originating from the core pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The `.64` text does not hold exactly one 64×64 frame.
    #[error("Format .64 invalide : {found} caractères utiles, {expected} attendus")]
    Format {
        /// Number of characters left after filtering.
        found: usize,
        /// Number of characters a frame needs.
        expected: usize,
    },

    /// Two grids combined pixel by pixel have different dimensions.
    #[error("Dimensions incompatibles : {left_width}×{left_height} contre {right_width}×{right_height}")]
    ShapeMismatch {
        /// Width of the left operand.
        left_width: u32,
        /// Height of the left operand.
        left_height: u32,
        /// Width of the right operand.
        right_width: u32,
        /// Height of the right operand.
        right_height: u32,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Referenced file does not exist.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
