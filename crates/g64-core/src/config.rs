use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration du pipeline (dossiers, constantes du lot, export).
///
/// Chargée depuis `config.txt` (lignes `clé=valeur`) ou depuis un fichier
/// TOML plat portant les mêmes clés. Chaque champ a une valeur par défaut
/// saine sauf `input_folder`, obligatoire.
///
/// # Example
/// ```
/// use g64_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.add_constant, 15);
/// assert!(config.validate().is_err());
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    // === Chemins ===
    /// Dossier contenant les sources `.64`.
    pub input_folder: PathBuf,
    /// Classeur de destination des histogrammes.
    pub output_file: PathBuf,
    /// Dossier où déposer les rendus PNG du lot. `None` = pas d'images.
    pub image_output_folder: Option<PathBuf>,

    // === Constantes du lot ===
    /// Constante de l'addition (défaut 15).
    pub add_constant: i32,
    /// Constante de la soustraction (défaut 7).
    pub subtract_constant: i32,
    /// Constante de la multiplication (défaut 10).
    pub multiply_constant: i32,
    /// Première image moyennée, par nom de fichier.
    pub average_first: String,
    /// Seconde image moyennée, par nom de fichier.
    pub average_second: String,

    // === Rendu ===
    /// Facteur d'agrandissement des PNG [1, 32]. 8 → 512×512.
    pub image_scale: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::new(),
            output_file: PathBuf::from("histograms.xlsx"),
            image_output_folder: None,
            add_constant: 15,
            subtract_constant: 7,
            multiply_constant: 10,
            average_first: "JET.64".into(),
            average_second: "LIBERTY.64".into(),
            image_scale: 8,
        }
    }
}

impl AppConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after parsing to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.image_scale = self.image_scale.clamp(1, 32);
    }

    /// Check the keys every run needs.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if `input_folder` is missing or
    /// `output_file` is empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.input_folder.as_os_str().is_empty() {
            return Err(CoreError::Config("clé input_folder absente".into()));
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(CoreError::Config("clé output_file vide".into()));
        }
        Ok(())
    }
}

/// Structure intermédiaire, toutes les clés optionnelles pour un override partiel.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    input_folder: Option<PathBuf>,
    output_file: Option<PathBuf>,
    image_output_folder: Option<PathBuf>,
    add_constant: Option<i32>,
    subtract_constant: Option<i32>,
    multiply_constant: Option<i32>,
    average_first: Option<String>,
    average_second: Option<String>,
    image_scale: Option<u32>,
}

impl ConfigFile {
    fn merge_into(self, config: &mut AppConfig) {
        if let Some(v) = self.input_folder {
            config.input_folder = v;
        }
        if let Some(v) = self.output_file {
            config.output_file = v;
        }
        if let Some(v) = self.image_output_folder {
            config.image_output_folder = Some(v);
        }
        if let Some(v) = self.add_constant {
            config.add_constant = v;
        }
        if let Some(v) = self.subtract_constant {
            config.subtract_constant = v;
        }
        if let Some(v) = self.multiply_constant {
            config.multiply_constant = v;
        }
        if let Some(v) = self.average_first {
            config.average_first = v;
        }
        if let Some(v) = self.average_second {
            config.average_second = v;
        }
        if let Some(v) = self.image_scale {
            config.image_scale = v;
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, CoreError> {
    value
        .parse()
        .map_err(|_| CoreError::Config(format!("{key} : entier attendu, reçu '{value}'")))
}

/// Parse `key=value` lines. Blank lines and `#` comments are skipped, the
/// value is everything after the first `=`, both sides trimmed.
///
/// # Errors
/// Returns [`CoreError::Config`] for a line without `=` or a non-numeric
/// value on a numeric key.
fn parse_key_values(content: &str) -> Result<ConfigFile, CoreError> {
    let mut file = ConfigFile::default();
    for (n, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(CoreError::Config(format!(
                "ligne {} sans '=' : {line}",
                n + 1
            )));
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "input_folder" => file.input_folder = Some(PathBuf::from(value)),
            "output_file" => file.output_file = Some(PathBuf::from(value)),
            "image_output_folder" => file.image_output_folder = Some(PathBuf::from(value)),
            "add_constant" => file.add_constant = Some(parse_number(key, value)?),
            "subtract_constant" => file.subtract_constant = Some(parse_number(key, value)?),
            "multiply_constant" => file.multiply_constant = Some(parse_number(key, value)?),
            "average_first" => file.average_first = Some(value.to_string()),
            "average_second" => file.average_second = Some(value.to_string()),
            "image_scale" => file.image_scale = Some(parse_number(key, value)?),
            _ => log::warn!("Clé de configuration inconnue ignorée : {key}"),
        }
    }
    Ok(file)
}

/// Lit un fichier de configuration et fusionne avec les valeurs par défaut,
/// sans exiger `input_folder`.
///
/// `.toml` → TOML plat, tout autre fichier → lignes `clé=valeur`.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn parse_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let file: ConfigFile = if is_toml {
        toml::from_str(&content)
            .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?
    } else {
        parse_key_values(&content)
            .with_context(|| format!("Erreur de parsing dans {}", path.display()))?
    };

    let mut config = AppConfig::default();
    file.merge_into(&mut config);
    config.clamp_all();
    log::debug!("Config lue depuis {} : {config:?}", path.display());
    Ok(config)
}

/// Charge et valide un fichier de configuration.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if
/// `input_folder` is missing.
///
/// # Example
/// ```no_run
/// use g64_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config.txt")).unwrap();
/// println!("{}", config.input_folder.display());
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let config = parse_config(path)?;
    config
        .validate()
        .with_context(|| format!("Configuration incomplète : {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn key_value_file_overrides_defaults() {
        let file = write_temp(
            ".txt",
            "input_folder=C:\\images\\hw1\noutput_file = out.xlsx\n\n# commentaire\nadd_constant=3\n",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.input_folder, PathBuf::from("C:\\images\\hw1"));
        assert_eq!(config.output_file, PathBuf::from("out.xlsx"));
        assert_eq!(config.add_constant, 3);
        assert_eq!(config.subtract_constant, 7);
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let file = write_temp(".txt", "input_folder=/data/a=b\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.input_folder, PathBuf::from("/data/a=b"));
    }

    #[test]
    fn missing_input_folder_is_an_error() {
        let file = write_temp(".txt", "output_file=out.xlsx\n");
        assert!(load_config(file.path()).is_err());
        // parse_config alone stays lenient.
        let config = parse_config(file.path()).unwrap();
        assert!(config.input_folder.as_os_str().is_empty());
    }

    #[test]
    fn line_without_equals_is_rejected() {
        let file = write_temp(".txt", "input_folder\n");
        assert!(parse_config(file.path()).is_err());
    }

    #[test]
    fn numeric_key_with_text_is_rejected() {
        let file = write_temp(".txt", "input_folder=x\nadd_constant=beaucoup\n");
        assert!(parse_config(file.path()).is_err());
    }

    #[test]
    fn toml_file_is_supported() {
        let file = write_temp(
            ".toml",
            "input_folder = \"imgs\"\nimage_output_folder = \"png\"\nimage_scale = 500\n",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.input_folder, PathBuf::from("imgs"));
        assert_eq!(config.image_output_folder, Some(PathBuf::from("png")));
        assert_eq!(config.image_scale, 32);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/gray64/config.txt")).is_err());
    }
}
