use g64_core::grid::PixelGrid;

/// Horizontal first difference `g(x, y) - g(x - 1, y)`, clamped to [0, 31].
///
/// Column 0 has no left neighbour and is copied unchanged. Negative
/// differences clamp to 0, so only dark→bright transitions (left to right)
/// survive.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_ops::edge::edge_detect;
///
/// let grid = PixelGrid::from_levels(4, 1, vec![5, 9, 2, 2]).unwrap();
/// assert_eq!(edge_detect(&grid).levels(), &[5, 4, 0, 0]);
/// ```
#[must_use]
pub fn edge_detect(grid: &PixelGrid) -> PixelGrid {
    PixelGrid::from_fn(grid.width(), grid.height(), |x, y| {
        let here = i64::from(grid.get(x, y));
        if x == 0 {
            here
        } else {
            here - i64::from(grid.get(x - 1, y))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_column_is_copied() {
        let grid = PixelGrid::from_fn(64, 64, |x, y| i64::from((x * 3 + y * 5) % 32));
        let edges = edge_detect(&grid);
        for y in 0..64 {
            assert_eq!(edges.get(0, y), grid.get(0, y));
        }
    }

    #[test]
    fn flat_rows_vanish_except_first_column() {
        let grid = PixelGrid::from_fn(64, 64, |_, _| 5);
        let edges = edge_detect(&grid);
        for y in 0..64 {
            assert_eq!(edges.get(0, y), 5);
            for x in 1..64 {
                assert_eq!(edges.get(x, y), 0);
            }
        }
    }

    #[test]
    fn bright_to_dark_is_one_sided() {
        // Descending ramp: every difference is negative.
        let grid = PixelGrid::from_fn(32, 1, |x, _| 31 - i64::from(x));
        let edges = edge_detect(&grid);
        assert_eq!(edges.get(0, 0), 31);
        assert!(edges.row(0)[1..].iter().all(|&v| v == 0));
    }

    #[test]
    fn rising_step_keeps_its_height() {
        let grid = PixelGrid::from_fn(8, 2, |x, _| if x < 4 { 3 } else { 20 });
        let edges = edge_detect(&grid);
        assert_eq!(edges.row(0), &[3, 0, 0, 0, 17, 0, 0, 0]);
        assert_eq!(edges.row(1), edges.row(0));
    }
}
