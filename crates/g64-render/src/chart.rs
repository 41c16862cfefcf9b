use g64_core::LEVELS;
use g64_core::grid::gray8;
use g64_core::histogram::Histogram;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

/// Blocs partiels, 1/8 à 8/8 de hauteur.
const EIGHTHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Width of one bar so that the 32 bins fit in `width` columns.
#[must_use]
pub fn bar_width(width: u16) -> u16 {
    (width / LEVELS as u16).max(1)
}

/// Bar height in eighths of a cell, scaled so that `peak` fills `rows`.
#[must_use]
pub fn bar_eighths(count: u32, peak: u32, rows: u16) -> u64 {
    if peak == 0 {
        return 0;
    }
    u64::from(count) * u64::from(rows) * 8 / u64::from(peak)
}

/// Dessine l'histogramme en barres verticales, niveau 0 à gauche.
///
/// The last row of `area` holds the axis labels (0, 15, 31); bars use the
/// rows above it. Bars are colored with their own gray level.
pub fn render_histogram(buf: &mut Buffer, area: Rect, histogram: &Histogram) {
    if area.height < 2 || area.width == 0 {
        return;
    }
    let rows = area.height - 1;
    let bw = bar_width(area.width);
    let peak = histogram.peak();

    for (level, &count) in histogram.counts().iter().enumerate() {
        let x0 = area.x + level as u16 * bw;
        if x0 >= area.right() {
            break;
        }
        let mut eighths = bar_eighths(count, peak, rows);
        // Non-empty bins stay visible.
        if count > 0 && eighths == 0 {
            eighths = 1;
        }
        let color = bar_color(level as u8);

        for r in 0..rows {
            let filled = eighths.saturating_sub(u64::from(r) * 8).min(8);
            if filled == 0 {
                break;
            }
            let y = area.y + rows - 1 - r;
            for dx in 0..bw {
                if let Some(cell) = buf.cell_mut((x0 + dx, y)) {
                    cell.set_char(EIGHTHS[filled as usize - 1]).set_fg(color);
                }
            }
        }
    }

    let axis_y = area.bottom() - 1;
    let style = Style::default().fg(Color::DarkGray);
    buf.set_string(area.x, axis_y, "0", style);
    let mid_x = area.x + 15 * bw;
    if mid_x + 2 <= area.right() {
        buf.set_string(mid_x, axis_y, "15", style);
    }
    let last_x = area.x + 31 * bw;
    if last_x + 2 <= area.right() {
        buf.set_string(last_x, axis_y, "31", style);
    }
}

/// Couleur d'une barre : son propre gris, relevé pour rester visible sur fond noir.
fn bar_color(level: u8) -> Color {
    let v = gray8(level).max(64);
    Color::Rgb(v, v, v)
}
