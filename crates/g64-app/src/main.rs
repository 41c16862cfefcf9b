use anyhow::{Context, Result};
use clap::Parser;
use g64_core::config::{AppConfig, load_config, parse_config};
use g64_core::traits::{NullSink, RenditionSink};
use g64_export::{PngDumper, XlsxExporter};

pub mod app;
pub mod batch;
pub mod cli;
pub mod session;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging (hors du terminal en mode interactif, sauf niveau relevé)
    let level = if cli.batch || cli.log_level > log::LevelFilter::Warn {
        cli.log_level
    } else {
        log::LevelFilter::Off
    };
    env_logger::Builder::new().filter_level(level).init();

    // 3. Traitement par lots : toute erreur de config est fatale
    if cli.batch {
        log::info!("Lancement du traitement par lots...");
        let config = resolve_config(&cli)?;
        return run_batch(&config);
    }

    // 4. Mode interactif : une erreur de config devient un message de statut
    let config = resolve_config(&cli);
    let mut app_instance = app::App::new(config);

    let terminal = ratatui::init();
    let result = app_instance.run(terminal);

    // 5. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    result
}

/// Load the config file, apply CLI overrides, then validate.
///
/// Without a config file, the CLI overrides alone may still describe a run.
fn resolve_config(cli: &cli::Cli) -> Result<AppConfig> {
    let mut config = if cli.config.exists() {
        parse_config(&cli.config)?
    } else if cli.input.is_some() {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        AppConfig::default()
    } else {
        // Même message d'erreur que le chargement normal.
        return load_config(&cli.config);
    };
    cli.apply_overrides(&mut config);
    config.clamp_all();
    config.validate()?;
    Ok(config)
}

fn run_batch(config: &AppConfig) -> Result<()> {
    let mut dumper;
    let mut null_sink = NullSink;
    let sink: &mut dyn RenditionSink = match config.image_output_folder {
        Some(ref dir) => {
            dumper = PngDumper::new(dir, config.image_scale)?;
            &mut dumper
        }
        None => &mut null_sink,
    };
    let mut exporter = XlsxExporter::new(&config.output_file);

    let summary = batch::run_batch(config, sink, &mut exporter)
        .with_context(|| format!("Lot sur {}", config.input_folder.display()))?;

    println!(
        "{} fichier(s) traité(s), {} ignoré(s), {} histogramme(s) → {}",
        summary.files_processed,
        summary.files_skipped,
        summary.histograms_exported,
        config.output_file.display()
    );
    Ok(())
}
