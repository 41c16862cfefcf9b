use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use g64_core::grid::PixelGrid;
use g64_core::rendition::Rendition;
use g64_core::traits::RenditionSink;
use image::{GrayImage, Luma};

/// Convertit une grille en image 8 bits agrandie `scale` fois (plus proche voisin).
///
/// Chaque niveau devient `niveau * 8`, comme pour l'affichage.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_export::png::to_gray_image;
///
/// let grid = PixelGrid::from_levels(2, 1, vec![1, 31]).unwrap();
/// let img = to_gray_image(&grid, 8);
/// assert_eq!(img.dimensions(), (16, 8));
/// assert_eq!(img.get_pixel(15, 7).0, [248]);
/// ```
#[must_use]
pub fn to_gray_image(grid: &PixelGrid, scale: u32) -> GrayImage {
    let scale = scale.max(1);
    let gray = grid.to_gray8();
    let width = grid.width();
    GrayImage::from_fn(width * scale, grid.height() * scale, |x, y| {
        Luma([gray[((y / scale) * width + x / scale) as usize]])
    })
}

/// Écrit une grille en PNG.
///
/// # Errors
/// Retourne une erreur si l'encodage ou l'écriture échoue.
pub fn save_png(grid: &PixelGrid, scale: u32, path: &Path) -> Result<()> {
    to_gray_image(grid, scale)
        .save(path)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}

/// Dépose chaque rendu du lot dans un dossier, `<stem>_<tag>.png`.
pub struct PngDumper {
    dir: PathBuf,
    scale: u32,
    written: Vec<PathBuf>,
}

impl PngDumper {
    /// Crée le dossier de sortie si besoin.
    ///
    /// # Errors
    /// Retourne une erreur si le dossier ne peut être créé.
    pub fn new(dir: &Path, scale: u32) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Impossible de créer {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            scale,
            written: Vec::new(),
        })
    }

    /// Files written so far, in order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RenditionSink for PngDumper {
    fn present(&mut self, rendition: &Rendition) -> Result<()> {
        let path = self.dir.join(format!("{}.png", rendition.file_stem()));
        save_png(&rendition.grid, self.scale, &path)?;
        log::debug!("Image écrite : {}", path.display());
        self.written.push(path);
        Ok(())
    }
}
