use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use g64_core::config::AppConfig;
use g64_core::histogram::LabeledHistogram;
use g64_core::rendition::Rendition;
use g64_core::traits::{HistogramExporter, RenditionSink};
use g64_ops::operation::Operation;
use g64_source::EncodedSource;
use g64_source::folder::{find_by_name, scan_folder};
use rayon::prelude::*;

use crate::session::Session;

/// Bilan d'un traitement par lots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files decoded successfully.
    pub files_processed: usize,
    /// Files skipped (unreadable or malformed).
    pub files_skipped: usize,
    /// Renditions handed to the image sink.
    pub renditions: usize,
    /// Histograms passed to the exporter.
    pub histograms_exported: usize,
}

/// Rendus d'un fichier : original + 3 opérations ponctuelles, puis contours.
struct FileRenditions {
    points: Vec<Rendition>,
    edge: Rendition,
}

/// Opérations ponctuelles du lot, dans l'ordre d'export.
fn point_operations(config: &AppConfig) -> [Operation; 3] {
    [
        Operation::Add(config.add_constant),
        Operation::Subtract(config.subtract_constant),
        Operation::Multiply(config.multiply_constant),
    ]
}

/// Chaîne décodage → opérations d'un fichier, avec sa propre session.
fn render_file(path: &Path, config: &AppConfig) -> Result<FileRenditions> {
    let source = EncodedSource::read(path)?;
    let name = source.name().to_string();
    let mut session = Session::new();
    let grid = session
        .load_image(&source)
        .with_context(|| format!("Décodage de {name}"))?;

    let mut points = Vec::with_capacity(4);
    points.push(Rendition::new(&name, "original", &name, grid));
    for op in point_operations(config) {
        let Some(out) = session.apply_operation(op) else {
            anyhow::bail!("{name} : aucune image chargée");
        };
        points.push(Rendition::new(
            &name,
            op.tag(),
            format!("{name} {}", op.label()),
            out,
        ));
    }

    let op = Operation::EdgeDetect;
    let Some(out) = session.apply_operation(op) else {
        anyhow::bail!("{name} : aucune image chargée");
    };
    let edge = Rendition::new(&name, op.tag(), format!("{name} {}", op.label()), out);

    Ok(FileRenditions { points, edge })
}

/// Moyenne de la paire configurée, relue depuis le disque.
///
/// `None` when either file is absent from `decoded`.
fn render_average(
    config: &AppConfig,
    paths: &[PathBuf],
    decoded: &[&str],
) -> Result<Option<Rendition>> {
    let first = config.average_first.as_str();
    let second = config.average_second.as_str();
    let is_decoded = |wanted: &str| decoded.iter().any(|n| n.eq_ignore_ascii_case(wanted));
    if !is_decoded(first) || !is_decoded(second) {
        log::info!("Paire de moyenne absente ({first}, {second}), étape ignorée");
        return Ok(None);
    }
    let (Some(first_path), Some(second_path)) =
        (find_by_name(paths, first), find_by_name(paths, second))
    else {
        return Ok(None);
    };

    let first_source = EncodedSource::read(first_path)?;
    let second_source = EncodedSource::read(second_path)?;
    let mut session = Session::new();
    session.load_image(&first_source)?;
    session.load_secondary(&second_source)?;
    let Some(grid) = session.average()? else {
        return Ok(None);
    };

    let label = format!("{} + {} average", first_source.name(), second_source.name());
    Ok(Some(Rendition::new(
        first_source.name(),
        "average",
        label,
        grid,
    )))
}

/// Point d'entrée du traitement par lots.
///
/// Ordre des histogrammes : pour chaque fichier ses 4 rendus ponctuels, puis
/// la moyenne de la paire configurée, puis les contours de chaque fichier.
/// Chaque rendu passe par `sink` dans le même ordre ; `exporter` est appelé
/// une seule fois, à la fin.
///
/// # Errors
/// Retourne une erreur si le dossier ne peut être lu ou si l'export échoue.
/// Un fichier illisible est ignoré avec un avertissement.
pub fn run_batch(
    config: &AppConfig,
    sink: &mut dyn RenditionSink,
    exporter: &mut dyn HistogramExporter,
) -> Result<BatchSummary> {
    let paths = scan_folder(&config.input_folder)?;
    let mut summary = BatchSummary::default();
    if paths.is_empty() {
        log::warn!(
            "Aucun fichier .64 dans {}, rien à exporter",
            config.input_folder.display()
        );
        return Ok(summary);
    }
    log::info!("Traitement de {} fichier(s)...", paths.len());

    let results: Vec<Result<FileRenditions>> = paths
        .par_iter()
        .map(|path| render_file(path, config))
        .collect();

    let mut files = Vec::with_capacity(results.len());
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(renditions) => files.push(renditions),
            Err(e) => {
                log::warn!("Fichier ignoré {} : {e:#}", path.display());
                summary.files_skipped += 1;
            }
        }
    }
    summary.files_processed = files.len();

    let decoded: Vec<&str> = files.iter().map(|f| f.edge.source.as_str()).collect();
    let average = match render_average(config, &paths, &decoded) {
        Ok(avg) => avg,
        Err(e) => {
            log::warn!("Moyenne ignorée : {e:#}");
            None
        }
    };

    let ordered = files
        .iter()
        .flat_map(|f| f.points.iter())
        .chain(average.iter())
        .chain(files.iter().map(|f| &f.edge));

    let mut histograms: Vec<LabeledHistogram> = Vec::new();
    for rendition in ordered {
        if let Err(e) = sink.present(rendition) {
            log::warn!("Rendu {} non écrit : {e:#}", rendition.label);
        }
        summary.renditions += 1;
        histograms.push(rendition.labeled_histogram());
    }

    if !histograms.is_empty() {
        exporter.export(&histograms)?;
        summary.histograms_exported = histograms.len();
    }

    log::info!(
        "Lot terminé : {} fichier(s), {} ignoré(s), {} histogramme(s)",
        summary.files_processed,
        summary.files_skipped,
        summary.histograms_exported
    );
    Ok(summary)
}
