use g64_core::error::CoreError;
use g64_core::grid::PixelGrid;
use g64_core::histogram::Histogram;
use g64_ops::operation::Operation;
use g64_source::EncodedSource;

/// Cycle de vie d'une session.
///
/// `Empty -> Loaded -> Transformed -> Loaded` (au chargement suivant).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing decoded yet.
    #[default]
    Empty,
    /// A primary image is loaded and shown as is.
    Loaded,
    /// A derived grid was produced from the loaded image.
    Transformed,
}

#[derive(Debug)]
struct Slot {
    name: String,
    grid: PixelGrid,
}

/// Coordinateur explicite : une image principale, une seconde pour la moyenne.
///
/// Les grilles produites ne sont jamais stockées ; l'appelant les possède.
#[derive(Debug, Default)]
pub struct Session {
    primary: Option<Slot>,
    secondary: Option<Slot>,
    state: SessionState,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Primary grid, if loaded.
    #[must_use]
    pub fn primary(&self) -> Option<&PixelGrid> {
        self.primary.as_ref().map(|s| &s.grid)
    }

    #[must_use]
    pub fn primary_name(&self) -> Option<&str> {
        self.primary.as_ref().map(|s| s.name.as_str())
    }

    #[must_use]
    pub fn secondary_name(&self) -> Option<&str> {
        self.secondary.as_ref().map(|s| s.name.as_str())
    }

    /// Décode `source` et remplace l'image principale.
    ///
    /// En cas d'échec, l'image et l'état restent inchangés.
    ///
    /// # Errors
    /// Returns [`CoreError::Format`] when the source is malformed.
    pub fn load_image(&mut self, source: &EncodedSource) -> Result<PixelGrid, CoreError> {
        let grid = Self::decode_logged(source)?;
        self.primary = Some(Slot {
            name: source.name().to_string(),
            grid: grid.clone(),
        });
        self.state = SessionState::Loaded;
        log::info!("Image chargée : {}", source.name());
        Ok(grid)
    }

    /// Remplit l'emplacement secondaire (opérande de la moyenne).
    ///
    /// # Errors
    /// Returns [`CoreError::Format`] when the source is malformed.
    pub fn load_secondary(&mut self, source: &EncodedSource) -> Result<PixelGrid, CoreError> {
        let grid = Self::decode_logged(source)?;
        self.secondary = Some(Slot {
            name: source.name().to_string(),
            grid: grid.clone(),
        });
        log::info!("Seconde image : {}", source.name());
        Ok(grid)
    }

    fn decode_logged(source: &EncodedSource) -> Result<PixelGrid, CoreError> {
        source.decode().inspect_err(|e| {
            log::warn!("{} : {e}", source.name());
        })
    }

    /// Applique `op` à l'image principale. `None` sans image chargée.
    pub fn apply_operation(&mut self, op: Operation) -> Option<PixelGrid> {
        let Some(primary) = self.primary.as_ref() else {
            log::info!("no image loaded");
            return None;
        };
        let out = op.apply(&primary.grid);
        self.state = SessionState::Transformed;
        Some(out)
    }

    /// Moyenne des deux emplacements. `Ok(None)` si l'un d'eux est vide.
    ///
    /// # Errors
    /// Returns [`CoreError::ShapeMismatch`] if the two grids differ in size.
    pub fn average(&mut self) -> Result<Option<PixelGrid>, CoreError> {
        let (Some(first), Some(second)) = (self.primary.as_ref(), self.secondary.as_ref()) else {
            log::info!("no image loaded");
            return Ok(None);
        };
        let out = g64_ops::average(&first.grid, &second.grid)?;
        self.state = SessionState::Transformed;
        Ok(Some(out))
    }

    /// Histogramme de l'image principale.
    #[must_use]
    pub fn compute_histogram(&self) -> Option<Histogram> {
        let Some(primary) = self.primary.as_ref() else {
            log::info!("no image loaded");
            return None;
        };
        Some(Histogram::from_grid(&primary.grid))
    }

    /// Back to the untransformed view of the loaded image.
    pub fn reset(&mut self) {
        if self.state == SessionState::Transformed {
            self.state = SessionState::Loaded;
        }
    }
}
