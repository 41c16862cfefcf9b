use std::path::PathBuf;

use clap::Parser;

/// gray64 : décodeur, opérations et histogrammes d'images `.64`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration (`clé=valeur`, ou TOML si extension `.toml`).
    #[arg(short, long, default_value = "config.txt")]
    pub config: PathBuf,

    /// Traitement par lots : rendus + classeur d'histogrammes, sans interface.
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// Dossier des sources `.64` (remplace `input_folder`).
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Classeur `.xlsx` de sortie (remplace `output_file`).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Dossier des rendus PNG (remplace `image_output_folder`).
    #[arg(long)]
    pub dump_dir: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn", value_parser = parse_level)]
    pub log_level: log::LevelFilter,
}

/// `--log-level` : refuse toute valeur hors de `log::LevelFilter`.
fn parse_level(value: &str) -> Result<log::LevelFilter, String> {
    value
        .parse()
        .map_err(|_| format!("niveau inconnu '{value}' (off, error, warn, info, debug, trace)"))
}

impl Cli {
    /// Apply the path overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut g64_core::AppConfig) {
        if let Some(ref input) = self.input {
            config.input_folder.clone_from(input);
        }
        if let Some(ref output) = self.output {
            config.output_file.clone_from(output);
        }
        if let Some(ref dir) = self.dump_dir {
            config.image_output_folder = Some(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["gray64"]);
        assert_eq!(cli.config, PathBuf::from("config.txt"));
        assert!(!cli.batch);
        assert_eq!(cli.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn log_level_is_parsed_or_rejected() {
        let cli = Cli::parse_from(["gray64", "--log-level", "debug"]);
        assert_eq!(cli.log_level, log::LevelFilter::Debug);
        assert!(Cli::try_parse_from(["gray64", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn overrides_replace_config_paths() {
        let cli = Cli::parse_from([
            "gray64", "--batch", "-c", "my.toml", "--input", "imgs", "--dump-dir", "png",
        ]);
        let mut config = g64_core::AppConfig::default();
        cli.apply_overrides(&mut config);

        assert!(cli.batch);
        assert_eq!(cli.config, PathBuf::from("my.toml"));
        assert_eq!(config.input_folder, PathBuf::from("imgs"));
        assert_eq!(config.output_file, PathBuf::from("histograms.xlsx"));
        assert_eq!(config.image_output_folder, Some(PathBuf::from("png")));
    }
}
