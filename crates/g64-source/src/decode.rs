use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use g64_core::error::CoreError;
use g64_core::grid::PixelGrid;
use g64_core::{GRID_SIZE, PIXEL_COUNT};

/// Map one encoded symbol to its gray level: `0-9` → 0..9, `A-V` → 10..31.
///
/// Lowercase letters and anything past `V` have no value.
///
/// # Example
/// ```
/// use g64_source::decode::level_of;
/// assert_eq!(level_of(b'7'), Some(7));
/// assert_eq!(level_of(b'A'), Some(10));
/// assert_eq!(level_of(b'V'), Some(31));
/// assert_eq!(level_of(b'W'), None);
/// assert_eq!(level_of(b'a'), None);
/// ```
#[inline]
#[must_use]
pub fn level_of(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'V' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// True for bytes of the `.64` alphabet. Everything else is noise.
#[inline]
#[must_use]
pub fn is_encoded(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'A'..=b'V')
}

/// Décode le texte d'un fichier `.64` en grille 64×64.
///
/// # Errors
/// Returns [`CoreError::Format`] unless exactly 4096 characters of the
/// alphabet remain after filtering.
///
/// # Example
/// ```
/// use g64_source::decode::decode;
/// let text = "V".repeat(4096);
/// let grid = decode(&text).unwrap();
/// assert_eq!(grid.get(63, 63), 31);
/// assert!(decode("0123").is_err());
/// ```
pub fn decode(raw: &str) -> Result<PixelGrid, CoreError> {
    decode_bytes(raw.as_bytes())
}

/// Byte-level variant of [`decode`]. Non-ASCII bytes are filtered like any
/// other character outside the alphabet.
///
/// # Errors
/// Returns [`CoreError::Format`] on a wrong character count.
pub fn decode_bytes(raw: &[u8]) -> Result<PixelGrid, CoreError> {
    let retained: Vec<u8> = raw.iter().copied().filter(|&b| is_encoded(b)).collect();
    if retained.len() != PIXEL_COUNT {
        return Err(CoreError::Format {
            found: retained.len(),
            expected: PIXEL_COUNT,
        });
    }
    Ok(fill_grid(&retained))
}

/// Row-major fill: `retained[row * 64 + col]`.
///
/// A symbol without a level leaves its cell at 0 instead of failing. The
/// filter in [`decode_bytes`] makes that branch unreachable today; the
/// behaviour is kept so files decode exactly as they always have.
/// `from_fn` saturates every cell as the last step.
fn fill_grid(retained: &[u8]) -> PixelGrid {
    PixelGrid::from_fn(GRID_SIZE, GRID_SIZE, |col, row| {
        let idx = (row * GRID_SIZE + col) as usize;
        let level = retained.get(idx).copied().and_then(level_of).unwrap_or(0);
        i64::from(level)
    })
}

/// Contenu brut d'un fichier `.64`, avec son nom d'affichage.
///
/// # Example
/// ```
/// use g64_source::decode::EncodedSource;
/// let source = EncodedSource::from_text("FLAT.64", "0".repeat(4096));
/// assert_eq!(source.name(), "FLAT.64");
/// assert!(source.decode().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct EncodedSource {
    name: String,
    path: Option<PathBuf>,
    bytes: Vec<u8>,
}

impl EncodedSource {
    /// In-memory source, mostly for tests and pasted data.
    #[must_use]
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            bytes: text.into().into_bytes(),
        }
    }

    /// Lit un fichier `.64`. Le handle est fermé avant le retour, même en cas
    /// d'erreur.
    ///
    /// # Errors
    /// Returns [`CoreError::FileNotFound`] (wrapped) if the file does not
    /// exist, or an I/O error with context.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CoreError::FileNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Impossible de lire {}", path.display()));
            }
        };
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or_else(|| path.display().to_string(), String::from);
        Ok(Self {
            name,
            path: Some(path.to_path_buf()),
            bytes,
        })
    }

    /// Display name (file name for sources read from disk).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Origin on disk, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw bytes as read.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the contents. See [`decode_bytes`].
    ///
    /// # Errors
    /// Returns [`CoreError::Format`] on a malformed source.
    pub fn decode(&self) -> Result<PixelGrid, CoreError> {
        decode_bytes(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SYMBOLS: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";

    /// 64 lines of 64 symbols, level = (x + y) % 32.
    fn diagonal_text() -> String {
        let mut text = String::with_capacity(PIXEL_COUNT + 64);
        for y in 0..64usize {
            for x in 0..64usize {
                text.push(char::from(SYMBOLS[(x + y) % 32]));
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn every_symbol_maps_to_its_index() {
        for (i, &sym) in SYMBOLS.iter().enumerate() {
            assert_eq!(level_of(sym), Some(i as u8));
        }
    }

    #[test]
    fn decode_is_row_major_and_ignores_newlines() {
        let grid = decode(&diagonal_text()).unwrap();
        assert_eq!(grid.dimensions(), (64, 64));
        for y in 0..64u32 {
            for x in 0..64u32 {
                assert_eq!(u32::from(grid.get(x, y)), (x + y) % 32);
            }
        }
    }

    #[test]
    fn all_zero_symbols_give_black_frame() {
        let grid = decode(&"0".repeat(4096)).unwrap();
        assert!(grid.levels().iter().all(|&v| v == 0));
    }

    #[test]
    fn short_input_is_a_format_error() {
        let err = decode(&"0".repeat(4095)).unwrap_err();
        assert_eq!(
            err,
            CoreError::Format {
                found: 4095,
                expected: 4096
            }
        );
    }

    #[test]
    fn long_input_is_a_format_error() {
        assert!(matches!(
            decode(&"1".repeat(4097)),
            Err(CoreError::Format { found: 4097, .. })
        ));
    }

    #[test]
    fn foreign_characters_do_not_count() {
        // Lowercase, W-Z, punctuation, non-ASCII: all filtered out.
        let mut text = "abcWXYZ!? é\r\n\t".to_string();
        text.push_str(&"5".repeat(4096));
        let grid = decode(&text).unwrap();
        assert!(grid.levels().iter().all(|&v| v == 5));
    }

    #[test]
    fn non_utf8_bytes_are_filtered() {
        let mut raw = vec![0xFF, 0xFE, 0x80];
        raw.extend(std::iter::repeat_n(b'K', 4096));
        let grid = decode_bytes(&raw).unwrap();
        assert_eq!(grid.get(0, 0), 20);
    }

    #[test]
    fn unmapped_symbol_silently_becomes_zero() {
        // Documented quirk: a retained symbol without a level is not an
        // error, its cell just keeps the default 0.
        let mut retained = vec![b'9'; PIXEL_COUNT];
        retained[0] = b'?';
        retained[65] = b'z';
        let grid = fill_grid(&retained);
        assert_eq!(grid.get(0, 0), 0);
        assert_eq!(grid.get(1, 1), 0);
        assert_eq!(grid.get(2, 0), 9);
    }

    #[test]
    fn read_reports_missing_file() {
        let err = EncodedSource::read(Path::new("/nonexistent/gray64/JET.64")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::FileNotFound { .. })
        ));
    }

    #[test]
    fn read_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("LISA.64");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(diagonal_text().as_bytes()).unwrap();
        drop(file);

        let source = EncodedSource::read(&path).unwrap();
        assert_eq!(source.name(), "LISA.64");
        assert_eq!(source.path(), Some(path.as_path()));
        assert!(source.decode().is_ok());
    }
}
