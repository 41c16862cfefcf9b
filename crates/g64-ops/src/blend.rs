use g64_core::error::CoreError;
use g64_core::grid::PixelGrid;

/// Pixel-wise mean `floor((a + b) / 2)`, clamped to [0, 31].
///
/// # Errors
/// Returns [`CoreError::ShapeMismatch`] if the grids differ in size.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_ops::blend::average;
///
/// let a = PixelGrid::from_levels(3, 1, vec![0, 3, 31]).unwrap();
/// let b = PixelGrid::from_levels(3, 1, vec![0, 4, 30]).unwrap();
/// assert_eq!(average(&a, &b).unwrap().levels(), &[0, 3, 30]);
/// ```
pub fn average(a: &PixelGrid, b: &PixelGrid) -> Result<PixelGrid, CoreError> {
    if !a.same_shape(b) {
        return Err(CoreError::ShapeMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        });
    }
    Ok(PixelGrid::from_fn(a.width(), a.height(), |x, y| {
        (i64::from(a.get(x, y)) + i64::from(b.get(x, y))).div_euclid(2)
    }))
}
