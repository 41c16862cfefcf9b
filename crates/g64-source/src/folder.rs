use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use g64_core::error::CoreError;

/// Extension des sources reconnues (comparaison insensible à la casse).
pub const SOURCE_EXT: &str = "64";

fn has_source_ext(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SOURCE_EXT))
}

/// Liste les fichiers `.64` d'un dossier (non récursif), triés par chemin.
///
/// # Errors
/// Retourne une erreur si le dossier n'existe pas ou ne peut être lu.
///
/// # Example
/// ```no_run
/// use g64_source::folder::scan_folder;
/// use std::path::Path;
/// for path in scan_folder(Path::new("images")).unwrap() {
///     println!("{}", path.display());
/// }
/// ```
pub fn scan_folder(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Impossible de lire le dossier {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_source_ext(&path) {
            files.push(path);
        }
    }
    files.sort();
    log::debug!("{} source(s) .64 dans {}", files.len(), dir.display());
    Ok(files)
}

/// File names of [`scan_folder`], for selection lists.
///
/// # Errors
/// Same as [`scan_folder`].
pub fn list_names(dir: &Path) -> Result<Vec<String>> {
    Ok(scan_folder(dir)?
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
        .collect())
}

/// Join `name` onto `dir` and check that the file exists.
///
/// # Errors
/// Returns [`CoreError::FileNotFound`] if the resolved path is not a file.
///
/// # Example
/// ```
/// use g64_source::folder::resolve;
/// use std::path::Path;
/// assert!(resolve(Path::new("/nonexistent"), "JET.64").is_err());
/// ```
pub fn resolve(dir: &Path, name: &str) -> Result<PathBuf, CoreError> {
    let path = dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        })
    }
}

/// Find the entry of `paths` whose file name equals `name`, ignoring case.
#[must_use]
pub fn find_by_name<'a>(paths: &'a [PathBuf], name: &str) -> Option<&'a PathBuf> {
    paths.iter().find(|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
    })
}
