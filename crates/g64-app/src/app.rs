use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use g64_core::MAX_LEVEL;
use g64_core::config::AppConfig;
use g64_core::grid::PixelGrid;
use g64_core::histogram::Histogram;
use g64_ops::operation::OperationKind;
use g64_render::ui::{self, DrawContext, RenderState};
use g64_source::EncodedSource;
use g64_source::folder::{list_names, resolve};
use ratatui::DefaultTerminal;

use crate::session::{Session, SessionState};

/// Délai de polling clavier.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Application interactive : liste des sources, outil, curseur, vue courante.
pub struct App {
    config: Option<AppConfig>,
    pub images: Vec<String>,
    pub selected: usize,
    pub session: Session,
    pub tool: OperationKind,
    /// Valeur du curseur, [0, 31].
    pub constant: i32,
    view: Option<PixelGrid>,
    view_label: String,
    view_histogram: Option<Histogram>,
    pub status: String,
    pub state: RenderState,
}

impl App {
    /// Build the app from the result of loading the configuration.
    ///
    /// A configuration or folder error is not fatal here: the list stays
    /// empty and the message goes to the status line.
    #[must_use]
    pub fn new(config: Result<AppConfig>) -> Self {
        let mut app = Self {
            config: None,
            images: Vec::new(),
            selected: 0,
            session: Session::new(),
            tool: OperationKind::default(),
            constant: 0,
            view: None,
            view_label: String::new(),
            view_histogram: None,
            status: String::new(),
            state: RenderState::Running,
        };

        match config {
            Ok(config) => {
                match list_names(&config.input_folder) {
                    Ok(names) => {
                        app.status = format!(
                            "{} image(s) dans {}",
                            names.len(),
                            config.input_folder.display()
                        );
                        app.images = names;
                    }
                    Err(e) => app.status = format!("{e:#}"),
                }
                app.config = Some(config);
            }
            Err(e) => {
                log::warn!("Configuration : {e:#}");
                app.status = format!("Configuration : {e:#}");
            }
        }
        app
    }

    /// Grid currently shown.
    #[must_use]
    pub fn view(&self) -> Option<&PixelGrid> {
        self.view.as_ref()
    }

    #[must_use]
    pub fn view_label(&self) -> &str {
        &self.view_label
    }

    /// Histogram of the grid currently shown.
    #[must_use]
    pub fn view_histogram(&self) -> Option<&Histogram> {
        self.view_histogram.as_ref()
    }

    /// Main event loop.
    ///
    /// # Errors
    /// Returns an error if terminal operations fail.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            if self.state == RenderState::Quitting {
                break;
            }
            terminal.draw(|frame| ui::draw(frame, &self.draw_context()))?;

            if event::poll(POLL_INTERVAL)? {
                self.handle_event(&event::read()?);
            }
        }
        Ok(())
    }

    fn draw_context(&self) -> DrawContext<'_> {
        DrawContext {
            images: &self.images,
            selected: self.selected,
            loaded: self.session.primary_name(),
            secondary: self.session.secondary_name(),
            tool: self.tool,
            constant: self.constant,
            view: self.view(),
            view_label: self.view_label(),
            histogram: self.view_histogram(),
            status: &self.status,
            state: self.state,
        }
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = *event {
            self.handle_key(key);
        }
    }

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.state == RenderState::Help {
            if matches!(key.code, KeyCode::Char('?' | 'q') | KeyCode::Esc) {
                self.state = RenderState::Running;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state = RenderState::Quitting,
            KeyCode::Char('?') => self.state = RenderState::Help,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char(' ') => self.load_selected(),
            KeyCode::Char('t') => self.tool = self.tool.next(),
            KeyCode::Char('T') => self.tool = self.tool.prev(),
            KeyCode::Left => self.set_constant(self.constant - 1),
            KeyCode::Right => self.set_constant(self.constant + 1),
            KeyCode::Enter => self.apply_tool(),
            KeyCode::Char('m') => self.mark_secondary(),
            KeyCode::Char('a') => self.average(),
            KeyCode::Char('r') => self.reset_view(),
            _ => {}
        }
    }

    fn set_constant(&mut self, value: i32) {
        self.constant = value.clamp(0, i32::from(MAX_LEVEL));
    }

    fn move_selection(&mut self, delta: isize) {
        if self.images.is_empty() {
            return;
        }
        let last = self.images.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.load_selected();
    }

    /// Resolve the highlighted name against `input_folder` and read it.
    fn read_selected(&mut self) -> Option<EncodedSource> {
        let name = self.images.get(self.selected)?.clone();
        let Some(config) = self.config.as_ref() else {
            self.status = "Aucune configuration chargée".into();
            return None;
        };
        let path = match resolve(&config.input_folder, &name) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{e}");
                self.status = e.to_string();
                return None;
            }
        };
        match EncodedSource::read(&path) {
            Ok(source) => Some(source),
            Err(e) => {
                log::warn!("{e:#}");
                self.status = format!("{e:#}");
                None
            }
        }
    }

    fn load_selected(&mut self) {
        let Some(source) = self.read_selected() else {
            return;
        };
        match self.session.load_image(&source) {
            Ok(grid) => {
                self.status = format!("{} chargée", source.name());
                let histogram = self.session.compute_histogram();
                self.show(grid, source.name().to_string(), histogram);
            }
            Err(e) => self.status = format!("{} : {e}", source.name()),
        }
    }

    fn mark_secondary(&mut self) {
        let Some(source) = self.read_selected() else {
            return;
        };
        match self.session.load_secondary(&source) {
            Ok(_) => self.status = format!("{} marquée pour la moyenne", source.name()),
            Err(e) => self.status = format!("{} : {e}", source.name()),
        }
    }

    fn apply_tool(&mut self) {
        let op = self.tool.with_constant(self.constant);
        let Some(grid) = self.session.apply_operation(op) else {
            self.status = "Aucune image chargée".into();
            return;
        };
        let name = self.session.primary_name().unwrap_or_default();
        let label = format!("{name} {}", op.label());
        self.status = format!("Appliqué : {label}");
        let histogram = Histogram::from_grid(&grid);
        self.show(grid, label, Some(histogram));
    }

    fn average(&mut self) {
        match self.session.average() {
            Ok(Some(grid)) => {
                let label = format!(
                    "{} + {} average",
                    self.session.primary_name().unwrap_or_default(),
                    self.session.secondary_name().unwrap_or_default()
                );
                self.status = format!("Moyenne : {label}");
                let histogram = Histogram::from_grid(&grid);
                self.show(grid, label, Some(histogram));
            }
            Ok(None) => {
                self.status = "Moyenne : chargez une image et marquez-en une seconde (m)".into();
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn reset_view(&mut self) {
        if self.session.state() == SessionState::Empty {
            self.status = "Aucune image chargée".into();
            return;
        }
        self.session.reset();
        let Some(grid) = self.session.primary().cloned() else {
            return;
        };
        let name = self.session.primary_name().unwrap_or_default().to_string();
        let histogram = self.session.compute_histogram();
        self.show(grid, name, histogram);
    }

    fn show(&mut self, grid: PixelGrid, label: String, histogram: Option<Histogram>) {
        self.view_histogram = histogram;
        self.view = Some(grid);
        self.view_label = label;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::path::Path;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn folder_with(files: &[(&str, char)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, symbol) in files {
            std::fs::write(dir.path().join(name), symbol.to_string().repeat(4096)).unwrap();
        }
        dir
    }

    fn app_for(dir: &Path) -> App {
        App::new(Ok(AppConfig {
            input_folder: dir.to_path_buf(),
            ..AppConfig::default()
        }))
    }

    #[test]
    fn config_error_becomes_status() {
        let app = App::new(Err(anyhow::anyhow!("clé input_folder absente")));
        assert!(app.images.is_empty());
        assert!(app.status.contains("input_folder"));
        assert_eq!(app.state, RenderState::Running);
    }

    #[test]
    fn selecting_loads_image() {
        let dir = folder_with(&[("A.64", '3'), ("B.64", '9')]);
        let mut app = app_for(dir.path());
        assert_eq!(app.images, ["A.64", "B.64"]);
        assert!(app.view().is_none());

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);
        assert_eq!(app.session.primary_name(), Some("B.64"));
        assert_eq!(app.view().unwrap().get(0, 0), 9);
        assert_eq!(app.view_histogram().unwrap().count(9), 4096);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.session.primary_name(), Some("A.64"));
    }

    #[test]
    fn apply_tool_uses_constant_slider() {
        let dir = folder_with(&[("A.64", '3')]);
        let mut app = app_for(dir.path());
        assert_eq!(app.constant, 0);
        press(&mut app, KeyCode::Up);

        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.tool, OperationKind::Multiply);
        for _ in 0..3 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.constant, 3);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.view().unwrap().get(5, 5), 9);
        assert_eq!(app.view_label(), "A.64 * 3");
        assert_eq!(app.session.state(), SessionState::Transformed);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.view().unwrap().get(5, 5), 3);
        assert_eq!(app.session.state(), SessionState::Loaded);
    }

    #[test]
    fn constant_is_bounded() {
        let mut app = App::new(Err(anyhow::anyhow!("none")));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.constant, 0);
        for _ in 0..40 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.constant, 31);
    }

    #[test]
    fn space_loads_highlighted_entry() {
        let dir = folder_with(&[("A.64", '4'), ("B.64", '9')]);
        let mut app = app_for(dir.path());
        press(&mut app, KeyCode::Char(' '));

        assert_eq!(app.selected, 0);
        assert_eq!(app.session.primary_name(), Some("A.64"));
        assert_eq!(app.view().unwrap().get(0, 0), 4);
    }

    #[test]
    fn loaded_view_uses_session_histogram() {
        let dir = folder_with(&[("A.64", '4')]);
        let mut app = app_for(dir.path());
        press(&mut app, KeyCode::Char(' '));
        let loaded = app.session.compute_histogram();
        assert_eq!(app.view_histogram().copied(), loaded);

        for _ in 0..5 {
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view_histogram().unwrap().count(4), 0);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.view_histogram().copied(), loaded);
        assert_eq!(app.view_histogram().unwrap().count(4), 4096);
    }

    #[test]
    fn apply_without_image_reports_status() {
        let dir = folder_with(&[]);
        let mut app = app_for(dir.path());
        press(&mut app, KeyCode::Enter);
        assert!(app.view().is_none());
        assert_eq!(app.status, "Aucune image chargée");
    }

    #[test]
    fn mark_then_average() {
        let dir = folder_with(&[("A.64", '2'), ("B.64", '8')]);
        let mut app = app_for(dir.path());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.session.secondary_name(), Some("B.64"));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.view().unwrap().get(0, 0), 5);
        assert_eq!(app.view_label(), "A.64 + B.64 average");
    }

    #[test]
    fn malformed_file_keeps_previous_view() {
        let dir = folder_with(&[("A.64", '7')]);
        std::fs::write(dir.path().join("Z.64"), "xyz").unwrap();
        let mut app = app_for(dir.path());
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Down);

        assert!(app.status.contains("Z.64"));
        assert_eq!(app.session.primary_name(), Some("A.64"));
        assert_eq!(app.view().unwrap().get(0, 0), 7);
    }

    #[test]
    fn deleted_file_is_reported() {
        let dir = folder_with(&[("A.64", '1'), ("B.64", '1')]);
        let mut app = app_for(dir.path());
        std::fs::remove_file(dir.path().join("B.64")).unwrap();
        press(&mut app, KeyCode::Down);
        assert!(app.status.contains("introuvable"));
        assert!(app.view().is_none());
    }

    #[test]
    fn help_and_quit() {
        let mut app = App::new(Err(anyhow::anyhow!("none")));
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state, RenderState::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, RenderState::Running);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.state, RenderState::Quitting);
    }
}
