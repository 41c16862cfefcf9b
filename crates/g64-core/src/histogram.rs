use crate::grid::PixelGrid;
use crate::{LEVELS, MAX_LEVEL};

/// Distribution des niveaux de gris : `counts[i]` = nombre de pixels de niveau `i`.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_core::histogram::Histogram;
///
/// let hist = Histogram::from_grid(&PixelGrid::blank());
/// assert_eq!(hist.count(0), 4096);
/// assert_eq!(hist.total(), 4096);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; LEVELS],
}

impl Histogram {
    /// Count every level of `grid` in one linear scan.
    ///
    /// # Panics
    /// Panics if a cell holds a level above 31. Grids built through
    /// [`PixelGrid`] constructors never do, so this marks a logic error.
    #[must_use]
    pub fn from_grid(grid: &PixelGrid) -> Self {
        let mut counts = [0u32; LEVELS];
        for &level in grid.levels() {
            assert!(
                level <= MAX_LEVEL,
                "gray level {level} outside [0, {MAX_LEVEL}]"
            );
            counts[usize::from(level)] += 1;
        }
        Self { counts }
    }

    /// Pixel count for `level`. Levels above 31 report 0.
    #[must_use]
    pub fn count(&self, level: usize) -> u32 {
        self.counts.get(level).copied().unwrap_or(0)
    }

    /// The 32 ordered bins.
    #[must_use]
    pub fn counts(&self) -> &[u32; LEVELS] {
        &self.counts
    }

    /// Sum of all bins (4096 for a full frame).
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Largest bin, used to scale bar charts.
    #[must_use]
    pub fn peak(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Un histogramme accompagné du libellé de l'image dont il provient.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_core::histogram::LabeledHistogram;
///
/// let entry = LabeledHistogram::of("JET.64", &PixelGrid::blank());
/// assert_eq!(entry.label, "JET.64");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledHistogram {
    /// Libellé lisible, ex. `JET.64 + 15`.
    pub label: String,
    /// Distribution associée.
    pub histogram: Histogram,
}

impl LabeledHistogram {
    /// Compute the histogram of `grid` and attach `label`.
    #[must_use]
    pub fn of(label: impl Into<String>, grid: &PixelGrid) -> Self {
        Self {
            label: label.into(),
            histogram: Histogram::from_grid(grid),
        }
    }
}
