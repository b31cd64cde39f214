// src/types.rs

/// 传感器网格尺寸 (8x8)
pub const GRID_COLS: usize = 8;
pub const GRID_ROWS: usize = 8;
pub const CELL_COUNT: usize = GRID_COLS * GRID_ROWS;

/// Row-major index of a sensor cell.
pub const fn cell_index(col: usize, row: usize) -> usize {
    col + row * GRID_COLS
}

// 用户按键切换
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Toggle {
    AutoScale,
    Mirror,
}

// 显示开关, 每帧读取一次
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    pub auto_scale: bool,
    pub mirror: bool,
}

impl DisplayConfig {
    /// Flips one flag and returns the status line shown to the user.
    pub fn apply(&mut self, toggle: Toggle) -> String {
        match toggle {
            Toggle::AutoScale => {
                self.auto_scale = !self.auto_scale;
                format!("Auto scale {}", on_off(self.auto_scale))
            }
            Toggle::Mirror => {
                self.mirror = !self.mirror;
                format!("Mirror {}", on_off(self.mirror))
            }
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}
