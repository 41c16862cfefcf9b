use anyhow::Result;

use crate::histogram::LabeledHistogram;
use crate::rendition::Rendition;

/// Reçoit chaque image produite par le pipeline (dump PNG, affichage).
///
/// Implémenté par : `PngDumper`, les collecteurs de test.
///
/// # Example
/// ```
/// use g64_core::traits::RenditionSink;
/// use g64_core::rendition::Rendition;
///
/// struct Counter(usize);
/// impl RenditionSink for Counter {
///     fn present(&mut self, _r: &Rendition) -> anyhow::Result<()> { self.0 += 1; Ok(()) }
/// }
/// ```
pub trait RenditionSink {
    /// Consomme une image. Une erreur est rapportée par l'appelant, qui continue.
    ///
    /// # Errors
    /// Implementation-defined (I/O typically).
    fn present(&mut self, rendition: &Rendition) -> Result<()>;
}

/// Écrit une série ordonnée d'histogrammes en une seule fois.
///
/// Implémenté par : `XlsxExporter`.
///
/// # Example
/// ```
/// use g64_core::traits::HistogramExporter;
/// use g64_core::histogram::LabeledHistogram;
///
/// struct Discard;
/// impl HistogramExporter for Discard {
///     fn export(&mut self, _h: &[LabeledHistogram]) -> anyhow::Result<()> { Ok(()) }
/// }
/// ```
pub trait HistogramExporter {
    /// Writes every histogram, one sheet/table per entry, in order.
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written.
    fn export(&mut self, histograms: &[LabeledHistogram]) -> Result<()>;
}

/// Sink that drops everything. Used when image dumps are disabled.
#[derive(Debug, Default)]
pub struct NullSink;

impl RenditionSink for NullSink {
    fn present(&mut self, _rendition: &Rendition) -> Result<()> {
        Ok(())
    }
}
