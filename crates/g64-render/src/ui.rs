use g64_core::MAX_LEVEL;
use g64_core::grid::PixelGrid;
use g64_core::histogram::Histogram;
use g64_ops::operation::OperationKind;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::{canvas, chart};

/// Largeur de la barre latérale, bordure comprise.
pub const SIDEBAR_WIDTH: u16 = 26;

/// Cells used by the constant slider track.
const SLIDER_CELLS: usize = 16;

/// Application state enum (mirrored for rendering decisions).
///
/// # Example
/// ```
/// use g64_render::ui::RenderState;
/// let state = RenderState::Running;
/// assert_ne!(state, RenderState::Help);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// Normal running state.
    Running,
    /// Help overlay visible.
    Help,
    /// Quitting (should not reach draw).
    Quitting,
}

/// Tout ce qu'il faut pour dessiner une frame, emprunté à l'application.
pub struct DrawContext<'a> {
    /// `.64` file names of the input folder.
    pub images: &'a [String],
    /// Highlighted entry in `images`.
    pub selected: usize,
    /// Name of the primary image, if any.
    pub loaded: Option<&'a str>,
    /// Name of the image marked for averaging.
    pub secondary: Option<&'a str>,
    pub tool: OperationKind,
    pub constant: i32,
    /// Grid currently shown in the canvas.
    pub view: Option<&'a PixelGrid>,
    pub view_label: &'a str,
    pub histogram: Option<&'a Histogram>,
    /// One-line message under the chart.
    pub status: &'a str,
    pub state: RenderState,
}

/// Texte du curseur de constante, ex. `[########........] 15`.
///
/// # Example
/// ```
/// use g64_render::ui::slider_text;
/// assert_eq!(slider_text(0), "[................]  0");
/// assert_eq!(slider_text(31), "[################] 31");
/// ```
#[must_use]
pub fn slider_text(constant: i32) -> String {
    let max = i32::from(MAX_LEVEL);
    let k = constant.clamp(0, max);
    let filled = k as usize * SLIDER_CELLS / max as usize;
    format!(
        "[{}{}] {k:>2}",
        "#".repeat(filled),
        ".".repeat(SLIDER_CELLS - filled)
    )
}

/// Draw the full UI: canvas + histogram + status on the left, sidebar on the right.
pub fn draw(frame: &mut Frame, ctx: &DrawContext<'_>) {
    let area = frame.area();

    let h_chunks = Layout::horizontal([
        Constraint::Min(40),
        Constraint::Length(SIDEBAR_WIDTH),
    ])
    .split(area);

    // [canvas(32 + bordures) | histogramme | statut]
    let v_chunks = Layout::vertical([
        Constraint::Length(34),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .split(h_chunks[0]);

    draw_canvas(frame, v_chunks[0], ctx);
    draw_histogram(frame, v_chunks[1], ctx.histogram);
    draw_status(frame, v_chunks[2], ctx.status);
    draw_sidebar(frame, h_chunks[1], ctx);

    if ctx.state == RenderState::Help {
        draw_help_overlay(frame, area);
    }
}

fn draw_canvas(frame: &mut Frame, area: Rect, ctx: &DrawContext<'_>) {
    let title = if ctx.view_label.is_empty() {
        " No image ".to_string()
    } else {
        format!(" {} ", ctx.view_label)
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(grid) = ctx.view {
        canvas::render_grid(frame.buffer_mut(), inner, grid);
    } else {
        let hint = Paragraph::new(Line::from(Span::styled(
            " ↑/↓ ou Espace pour charger un .64",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(hint, inner);
    }
}

fn draw_histogram(frame: &mut Frame, area: Rect, histogram: Option<&Histogram>) {
    let title = match histogram {
        Some(h) => format!(" Histogram (peak {}) ", h.peak()),
        None => " Histogram ".to_string(),
    };
    let block = Block::default().borders(Borders::TOP).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(h) = histogram {
        chart::render_histogram(frame.buffer_mut(), inner, h);
    }
}

fn draw_status(frame: &mut Frame, area: Rect, status: &str) {
    let line = Line::from(Span::styled(
        format!(" {status}"),
        Style::default().fg(Color::Cyan),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the sidebar: file list, tool, constant and averaging pair.
fn draw_sidebar(frame: &mut Frame, area: Rect, ctx: &DrawContext<'_>) {
    let section = |name: &str| {
        Line::from(Span::styled(
            format!("─ {name} ──────"),
            Style::default().fg(Color::Yellow),
        ))
    };

    let state_str = match ctx.state {
        RenderState::Running => "▶ RUN",
        RenderState::Help => "? HELP",
        RenderState::Quitting => "⏹ QUIT",
    };

    let mut lines = vec![
        Line::from(Span::styled(state_str, Style::default().fg(Color::Green))),
        Line::from(""),
        section("Images"),
    ];

    if ctx.images.is_empty() {
        lines.push(Line::from(Span::styled(
            " (aucun .64)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, name) in ctx.images.iter().enumerate() {
        let marker = if i == ctx.selected { '>' } else { ' ' };
        let mut style = Style::default();
        if ctx.loaded == Some(name.as_str()) {
            style = style.add_modifier(Modifier::BOLD);
        }
        if ctx.secondary == Some(name.as_str()) {
            style = style.fg(Color::Magenta);
        }
        lines.push(Line::from(Span::styled(format!("{marker} {name}"), style)));
    }

    lines.push(Line::from(""));
    lines.push(section("Tool"));
    for kind in OperationKind::ALL {
        let (marker, style) = if kind == ctx.tool {
            ("●", Style::default().fg(Color::Green))
        } else {
            ("○", Style::default())
        };
        lines.push(Line::from(Span::styled(
            format!(" {marker} {}", kind.label()),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(section("Constant"));
    let slider_style = if ctx.tool.takes_constant() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(
        format!(" {}", slider_text(ctx.constant)),
        slider_style,
    )));

    lines.push(Line::from(""));
    lines.push(section("Average"));
    lines.push(Line::from(format!(" A: {}", ctx.loaded.unwrap_or("-"))));
    lines.push(Line::from(format!(" B: {}", ctx.secondary.unwrap_or("-"))));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " ? = help",
        Style::default().fg(Color::DarkGray),
    )));

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::LEFT)
            .title(" gray64 "),
    );

    frame.render_widget(sidebar, area);
}

/// Draw the help overlay with all keybindings.
fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            " gray64 : Controls ",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(" q/Esc    Quit"),
        Line::from(" ↑/↓      Select + load image"),
        Line::from(" Space    Reload selected image"),
        Line::from(" t/T      Cycle tool"),
        Line::from(" ←/→      Constant ∓1"),
        Line::from(" Enter    Apply tool"),
        Line::from(" m        Mark image for average"),
        Line::from(" a        Average loaded + marked"),
        Line::from(" r        Back to original"),
        Line::from(" ?        Toggle help"),
        Line::from(""),
        Line::from(Span::styled(
            " Press ? or Esc to close ",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_width = 38u16.min(area.width);
    let help_height = (help_text.len() as u16 + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(help_width) / 2;
    let y = area.y + area.height.saturating_sub(help_height) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().bg(Color::Black).fg(Color::White)),
    );

    frame.render_widget(Clear, help_area);
    frame.render_widget(help, help_area);
}
