use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use g64_core::LEVELS;
use g64_core::histogram::LabeledHistogram;
use g64_core::traits::HistogramExporter;
use rust_xlsxwriter::{Chart, ChartType, Workbook};

/// Name of the worksheet holding histogram `index` (0-based).
///
/// # Example
/// ```
/// use g64_export::xlsx::sheet_name;
/// assert_eq!(sheet_name(0), "Histogram_1");
/// ```
#[must_use]
pub fn sheet_name(index: usize) -> String {
    format!("Histogram_{}", index + 1)
}

/// Construit le classeur : une feuille par histogramme, tableau
/// (niveau, effectif) en A1:B33 et graphique en barres ancré en E5.
///
/// # Errors
/// Retourne une erreur si une feuille ou un graphique ne peut être créé.
pub fn build_workbook(histograms: &[LabeledHistogram]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let last_row = LEVELS as u32;

    for (i, entry) in histograms.iter().enumerate() {
        let name = sheet_name(i);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;

        worksheet.write_string(0, 0, "Gray Level")?;
        worksheet.write_string(0, 1, "Pixel Count")?;
        worksheet.write_string(0, 3, entry.label.as_str())?;
        for (level, &count) in entry.histogram.counts().iter().enumerate() {
            let row = level as u32 + 1;
            worksheet.write_number(row, 0, level as f64)?;
            worksheet.write_number(row, 1, f64::from(count))?;
        }

        let mut chart = Chart::new(ChartType::Column);
        chart
            .add_series()
            .set_categories((name.as_str(), 1, 0, last_row, 0))
            .set_values((name.as_str(), 1, 1, last_row, 1))
            .set_name((name.as_str(), 0, 1));
        let title = format!("Gray Level Histogram {}", i + 1);
        chart.title().set_name(title.as_str());
        chart.x_axis().set_name("Gray Level");
        chart.y_axis().set_name("Pixel Count");
        chart.set_style(2);

        worksheet.insert_chart(4, 4, &chart)?;
    }

    Ok(workbook)
}

/// Exporte les histogrammes accumulés vers un fichier `.xlsx`.
pub struct XlsxExporter {
    path: PathBuf,
}

impl XlsxExporter {
    /// Exporter writing to `path` (overwritten on each export).
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistogramExporter for XlsxExporter {
    fn export(&mut self, histograms: &[LabeledHistogram]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Impossible de créer {}", parent.display()))?;
        }
        let mut workbook = build_workbook(histograms)?;
        workbook
            .save(&self.path)
            .with_context(|| format!("Impossible d'écrire {}", self.path.display()))?;
        log::info!(
            "{} histogramme(s) exporté(s) vers {}",
            histograms.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use g64_core::grid::PixelGrid;

    fn sample(n: usize) -> Vec<LabeledHistogram> {
        (0..n)
            .map(|i| {
                LabeledHistogram::of(
                    format!("IMG{i}.64"),
                    &PixelGrid::from_fn(64, 64, |x, _| i64::from(x) / 2),
                )
            })
            .collect()
    }

    #[test]
    fn sheet_names_are_one_based() {
        assert_eq!(sheet_name(3), "Histogram_4");
    }

    #[test]
    fn workbook_has_one_sheet_per_histogram() {
        let mut workbook = build_workbook(&sample(3)).unwrap();
        assert_eq!(workbook.worksheets().len(), 3);
        assert!(workbook.worksheet_from_name("Histogram_3").is_ok());
    }

    #[test]
    fn export_writes_a_zip_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("hist.xlsx");
        let mut exporter = XlsxExporter::new(&path);
        exporter.export(&sample(2)).unwrap();

        let bytes = std::fs::read(exporter.path()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn saved_sheets_hold_level_count_table() {
        use calamine::{Data, Reader, Xlsx, open_workbook};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.xlsx");
        let histograms = vec![
            LabeledHistogram::of("BLACK.64", &PixelGrid::blank()),
            LabeledHistogram::of(
                "RAMP.64",
                &PixelGrid::from_fn(64, 64, |x, y| i64::from((x + y) % 7)),
            ),
        ];
        XlsxExporter::new(&path).export(&histograms).unwrap();

        let mut book: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(book.sheet_names(), ["Histogram_1", "Histogram_2"]);
        for (i, entry) in histograms.iter().enumerate() {
            let range = book.worksheet_range(&sheet_name(i)).unwrap();
            assert_eq!(
                range.get_value((0, 0)),
                Some(&Data::String("Gray Level".into()))
            );
            assert_eq!(
                range.get_value((0, 1)),
                Some(&Data::String("Pixel Count".into()))
            );
            assert_eq!(
                range.get_value((0, 3)),
                Some(&Data::String(entry.label.clone()))
            );
            for (level, &count) in entry.histogram.counts().iter().enumerate() {
                let row = level as u32 + 1;
                assert_eq!(range.get_value((row, 0)), Some(&Data::Float(level as f64)));
                assert_eq!(
                    range.get_value((row, 1)),
                    Some(&Data::Float(f64::from(count)))
                );
            }
            assert_eq!(range.height(), LEVELS + 1);
        }

        // Un graphique par feuille.
        let archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        let charts = archive
            .file_names()
            .filter(|name| name.starts_with("xl/charts/chart"))
            .count();
        assert_eq!(charts, histograms.len());
    }
}
