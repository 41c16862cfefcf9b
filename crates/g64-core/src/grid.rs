use crate::error::CoreError;
use crate::{GRID_SIZE, MAX_LEVEL};

/// Saturate an intermediate value into the 5-bit gray range [0, 31].
///
/// # Example
/// ```
/// use g64_core::grid::clamp_level;
/// assert_eq!(clamp_level(-4), 0);
/// assert_eq!(clamp_level(12), 12);
/// assert_eq!(clamp_level(400), 31);
/// ```
#[inline]
#[must_use]
pub fn clamp_level(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_LEVEL)) as u8
}

/// Niveau 5 bits → octet affichable (`niveau * 8`, 31 → 248).
///
/// # Example
/// ```
/// use g64_core::grid::gray8;
/// assert_eq!(gray8(0), 0);
/// assert_eq!(gray8(31), 248);
/// ```
#[inline]
#[must_use]
pub fn gray8(level: u8) -> u8 {
    level.min(MAX_LEVEL) * 8
}

/// Matrice de niveaux de gris 5 bits, row-major.
///
/// Immutable once built: every constructor saturates its input into [0, 31],
/// and transforms always produce a new grid.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// let grid = PixelGrid::blank();
/// assert_eq!(grid.dimensions(), (64, 64));
/// assert_eq!(grid.get(10, 20), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelGrid {
    /// Crée une grille noire aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use g64_core::grid::PixelGrid;
    /// let grid = PixelGrid::new(8, 4);
    /// assert_eq!(grid.levels().len(), 32);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Full-size 64×64 black frame.
    #[must_use]
    pub fn blank() -> Self {
        Self::new(GRID_SIZE, GRID_SIZE)
    }

    /// Build a grid from row-major levels, saturating each value.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `levels` does not hold
    /// exactly `width * height` values.
    ///
    /// # Example
    /// ```
    /// use g64_core::grid::PixelGrid;
    /// let grid = PixelGrid::from_levels(2, 1, vec![3, 200]).unwrap();
    /// assert_eq!(grid.levels(), &[3, 31]);
    /// ```
    pub fn from_levels(width: u32, height: u32, mut levels: Vec<u8>) -> Result<Self, CoreError> {
        if levels.len() != width as usize * height as usize {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        for level in &mut levels {
            *level = (*level).min(MAX_LEVEL);
        }
        Ok(Self {
            data: levels,
            width,
            height,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel, row by row.
    ///
    /// Results are saturated with [`clamp_level`], so `f` may return any
    /// intermediate value.
    ///
    /// # Example
    /// ```
    /// use g64_core::grid::PixelGrid;
    /// let grid = PixelGrid::from_fn(4, 4, |x, y| i64::from(x) - i64::from(y));
    /// assert_eq!(grid.get(3, 0), 3);
    /// assert_eq!(grid.get(0, 3), 0);
    /// ```
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> i64) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(clamp_level(f(x, y)));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when `other` has the same width and height.
    #[must_use]
    pub fn same_shape(&self, other: &PixelGrid) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Niveau du pixel (x, y).
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[(y * self.width + x) as usize]
    }

    /// All levels, row-major.
    #[must_use]
    pub fn levels(&self) -> &[u8] {
        &self.data
    }

    /// One row of levels.
    ///
    /// # Example
    /// ```
    /// use g64_core::grid::PixelGrid;
    /// let grid = PixelGrid::from_fn(3, 2, |x, y| i64::from(x + y));
    /// assert_eq!(grid.row(1), &[1, 2, 3]);
    /// ```
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y * self.width) as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Buffer 8 bits affichable : chaque niveau est multiplié par 8.
    ///
    /// 31 × 8 = 248 tient dans un octet, aucune saturation n'est nécessaire.
    ///
    /// # Example
    /// ```
    /// use g64_core::grid::PixelGrid;
    /// let grid = PixelGrid::from_levels(2, 1, vec![0, 31]).unwrap();
    /// assert_eq!(grid.to_gray8(), vec![0, 248]);
    /// ```
    #[must_use]
    pub fn to_gray8(&self) -> Vec<u8> {
        self.data.iter().map(|&level| gray8(level)).collect()
    }
}
