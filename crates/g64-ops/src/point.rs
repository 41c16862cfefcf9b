use g64_core::grid::PixelGrid;

/// Apply `f` to every level. The result is saturated into [0, 31].
#[inline]
fn map_levels(grid: &PixelGrid, f: impl Fn(i64) -> i64) -> PixelGrid {
    PixelGrid::from_fn(grid.width(), grid.height(), |x, y| {
        f(i64::from(grid.get(x, y)))
    })
}

/// `clamp(g + k, 0, 31)` for every pixel.
///
/// `k` may be any integer, negative values included.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_ops::point::add;
///
/// let grid = PixelGrid::from_levels(3, 1, vec![0, 20, 31]).unwrap();
/// assert_eq!(add(&grid, 15).levels(), &[15, 31, 31]);
/// ```
#[must_use]
pub fn add(grid: &PixelGrid, k: i32) -> PixelGrid {
    let k = i64::from(k);
    map_levels(grid, |v| v + k)
}

/// `clamp(g - k, 0, 31)` for every pixel. Negative results floor at 0.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_ops::point::subtract;
///
/// let grid = PixelGrid::from_levels(3, 1, vec![0, 10, 31]).unwrap();
/// assert_eq!(subtract(&grid, 7).levels(), &[0, 3, 24]);
/// ```
#[must_use]
pub fn subtract(grid: &PixelGrid, k: i32) -> PixelGrid {
    let k = i64::from(k);
    map_levels(grid, |v| v - k)
}

/// `clamp(g * k, 0, 31)` for every pixel. Overflow saturates at 31.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_ops::point::multiply;
///
/// let grid = PixelGrid::from_levels(3, 1, vec![0, 2, 4]).unwrap();
/// assert_eq!(multiply(&grid, 10).levels(), &[0, 20, 31]);
/// ```
#[must_use]
pub fn multiply(grid: &PixelGrid, k: i32) -> PixelGrid {
    let k = i64::from(k);
    map_levels(grid, |v| v * k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> PixelGrid {
        PixelGrid::from_fn(64, 64, |x, y| i64::from((x + 2 * y) % 32))
    }

    #[test]
    fn add_then_subtract_restores_unsaturated_pixels() {
        let grid = ramp();
        for k in 0..=31 {
            let back = add(&subtract(&grid, k), k);
            for (&orig, &got) in grid.levels().iter().zip(back.levels()) {
                // No saturation on the way down (orig >= k) nor up.
                if i32::from(orig) >= k {
                    assert_eq!(orig, got, "k = {k}");
                } else {
                    assert_eq!(i32::from(got), k, "clamped at 0 then shifted, k = {k}");
                }
            }
        }
    }

    #[test]
    fn multiply_by_zero_and_one() {
        let grid = ramp();
        assert!(multiply(&grid, 0).levels().iter().all(|&v| v == 0));
        assert_eq!(multiply(&grid, 1), grid);
    }

    #[test]
    fn subtract_on_black_stays_black() {
        let black = PixelGrid::blank();
        assert_eq!(subtract(&black, 10), black);
    }

    #[test]
    fn out_of_range_constants_are_clamped_not_fatal() {
        let grid = ramp();
        assert!(add(&grid, i32::MAX).levels().iter().all(|&v| v == 31));
        assert!(add(&grid, i32::MIN).levels().iter().all(|&v| v == 0));
        assert!(subtract(&grid, i32::MIN).levels().iter().all(|&v| v == 31));
        assert!(multiply(&grid, -3).levels().iter().all(|&v| v == 0));
        let big = multiply(&grid, i32::MAX);
        for (&orig, &got) in grid.levels().iter().zip(big.levels()) {
            assert_eq!(got, if orig == 0 { 0 } else { 31 });
        }
    }

    #[test]
    fn operations_keep_dimensions() {
        let grid = PixelGrid::new(5, 3);
        assert_eq!(add(&grid, 1).dimensions(), (5, 3));
    }
}
