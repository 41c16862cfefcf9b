use g64_core::grid::{PixelGrid, gray8};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Couleur terminal d'un niveau 5 bits (`niveau * 8`, gris neutre).
///
/// # Example
/// ```
/// use g64_render::canvas::level_color;
/// use ratatui::style::Color;
/// assert_eq!(level_color(31), Color::Rgb(248, 248, 248));
/// ```
#[inline]
#[must_use]
pub fn level_color(level: u8) -> Color {
    let v = gray8(level);
    Color::Rgb(v, v, v)
}

/// Taille en cellules terminal d'une grille rendue en demi-blocs.
///
/// Each cell covers one column and two rows of pixels.
#[must_use]
pub fn canvas_size(grid: &PixelGrid) -> (u16, u16) {
    let w = u16::try_from(grid.width()).unwrap_or(u16::MAX);
    let h = u16::try_from(grid.height().div_ceil(2)).unwrap_or(u16::MAX);
    (w, h)
}

/// Écrit une `PixelGrid` directement dans un `ratatui::Buffer`.
///
/// Caractère '▄' : le pixel du haut va dans le bg, celui du bas dans le fg.
/// Pixels outside `area` are clipped.
pub fn render_grid(buf: &mut Buffer, area: Rect, grid: &PixelGrid) {
    let (cols, rows) = canvas_size(grid);
    for cy in 0..rows.min(area.height) {
        for cx in 0..cols.min(area.width) {
            let x = u32::from(cx);
            let top_y = u32::from(cy) * 2;
            let top = grid.get(x, top_y);
            let bottom = if top_y + 1 < grid.height() {
                grid.get(x, top_y + 1)
            } else {
                top
            };

            if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                cell.set_char('▄')
                    .set_fg(level_color(bottom))
                    .set_bg(level_color(top));
            }
        }
    }
}
