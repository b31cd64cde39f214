use eframe::egui::{self, pos2, vec2, Color32, Painter, Rect, TextureId};
use crate::thermal::color::{HueGrid, OverlayStyle};
use crate::types::{GRID_COLS, GRID_ROWS};
/// One overlay rectangle ready to paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPaint {
    /// Screen column the rectangle occupies.
    pub col: usize,
    pub row: usize,
    pub rect: Rect,
    pub hue: f32,
}
/// Tiles `area` with the 8x8 grid. With `mirror` set, screen column `col`
/// shows grid column `7 - col`, matching the flipped video underneath.
pub fn layout_cells(grid: &HueGrid, area: Rect, mirror: bool) -> Vec<CellPaint> {
    let cell = vec2(
        area.width() / GRID_COLS as f32,
        area.height() / GRID_ROWS as f32,
    );
    let mut cells = Vec::with_capacity(GRID_COLS * GRID_ROWS);
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let src_col = if mirror { GRID_COLS - 1 - col } else { col };
            let min = area.min + vec2(col as f32 * cell.x, row as f32 * cell.y);
            cells.push(CellPaint {
                col,
                row,
                rect: Rect::from_min_size(min, cell),
                hue: grid.get(src_col, row),
            });
        }
    }
    cells
}
/// Texture coordinates for the video quad; mirroring swaps left and right.
pub fn video_uv(mirror: bool) -> Rect {
    if mirror {
        Rect::from_min_max(pos2(1.0, 0.0), pos2(0.0, 1.0))
    } else {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0))
    }
}
/// Video first, then the overlay on top. Called every frame; nothing is cached.
pub fn paint_frame(
    painter: &Painter,
    area: Rect,
    video: Option<TextureId>,
    grid: &HueGrid,
    style: &OverlayStyle,
    mirror: bool,
) {
    if let Some(texture) = video {
        painter.image(texture, area, video_uv(mirror), Color32::WHITE);
    } else {
        painter.rect_filled(area, egui::Rounding::ZERO, Color32::BLACK);
    }
    for cell in layout_cells(grid, area, mirror) {
        painter.rect_filled(cell.rect, egui::Rounding::ZERO, style.color(cell.hue));
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn area() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(640.0, 480.0))
    }
    #[test]
    fn cells_tile_the_display() {
        let cells = layout_cells(&HueGrid::uniform(240.0), area(), false);
        assert_eq!(cells.len(), 64);
        let c = cells.iter().find(|c| c.col == 3 && c.row == 2).unwrap();
        assert_eq!(c.rect.min, pos2(240.0, 120.0));
        assert_eq!(c.rect.size(), vec2(80.0, 60.0));
        let last = cells.last().unwrap();
        assert_eq!(last.rect.max, pos2(640.0, 480.0));
    }
    #[test]
    fn mirror_moves_first_column_to_the_right_edge() {
        let mut grid = HueGrid::uniform(240.0);
        for row in 0..GRID_ROWS {
            grid.set(0, row, 333.0);
        }
        let plain = layout_cells(&grid, area(), false);
        let mirrored = layout_cells(&grid, area(), true);
        for row in 0..GRID_ROWS {
            let at = |cells: &[CellPaint], col: usize| {
                cells.iter().find(|c| c.col == col && c.row == row).unwrap().hue
            };
            assert_eq!(at(&plain, 0), 333.0);
            assert_eq!(at(&mirrored, GRID_COLS - 1), 333.0);
            assert_eq!(at(&mirrored, 0), 240.0);
        }
        let right = mirrored
            .iter()
            .find(|c| c.col == GRID_COLS - 1 && c.row == 0)
            .unwrap();
        assert_eq!(right.rect.max.x, 640.0);
    }
    #[test]
    fn offset_area_is_respected() {
        let area = Rect::from_min_size(pos2(10.0, 20.0), vec2(80.0, 80.0));
        let cells = layout_cells(&HueGrid::uniform(300.0), area, false);
        assert_eq!(cells[0].rect.min, pos2(10.0, 20.0));
        assert_eq!(cells[0].rect.size(), vec2(10.0, 10.0));
    }
    #[test]
    fn uv_flips_only_when_mirrored() {
        assert_eq!(video_uv(false).min, pos2(0.0, 0.0));
        assert_eq!(video_uv(true).min, pos2(1.0, 0.0));
        assert_eq!(video_uv(true).max, pos2(0.0, 1.0));
    }
}
