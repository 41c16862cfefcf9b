use crate::grid::PixelGrid;
use crate::histogram::{Histogram, LabeledHistogram};

/// Une image produite par le pipeline, prête pour l'affichage ou l'export.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_core::rendition::Rendition;
///
/// let r = Rendition::new("JET.64", "original", "JET.64", PixelGrid::blank());
/// assert_eq!(r.histogram.count(0), 4096);
/// assert_eq!(r.file_stem(), "JET_original");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendition {
    /// Nom du fichier source, ex. `JET.64`.
    pub source: String,
    /// Short machine tag, ex. `add_15`, `edge`.
    pub tag: String,
    /// Libellé lisible, ex. `JET.64 + 15`.
    pub label: String,
    /// Pixels.
    pub grid: PixelGrid,
    /// Histogram of `grid`, computed once at construction.
    pub histogram: Histogram,
}

impl Rendition {
    /// Wrap `grid` and compute its histogram.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        tag: impl Into<String>,
        label: impl Into<String>,
        grid: PixelGrid,
    ) -> Self {
        let histogram = Histogram::from_grid(&grid);
        Self {
            source: source.into(),
            tag: tag.into(),
            label: label.into(),
            grid,
            histogram,
        }
    }

    /// `<source stem>_<tag>`, used to name dumped images.
    #[must_use]
    pub fn file_stem(&self) -> String {
        let stem = self
            .source
            .rsplit_once('.')
            .map_or(self.source.as_str(), |(stem, _)| stem);
        format!("{stem}_{}", self.tag)
    }

    /// Histogram entry for the export accumulator.
    #[must_use]
    pub fn labeled_histogram(&self) -> LabeledHistogram {
        LabeledHistogram {
            label: self.label.clone(),
            histogram: self.histogram,
        }
    }
}
