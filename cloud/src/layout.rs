//! Greedy spiral placement of word boxes.
//!
//! Boxes are placed in the order given, each at the first point of an Archimedean spiral
//! around the canvas center where it overlaps nothing already placed and stays on the canvas.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn right(&self) -> i32 { self.x + self.w as i32 }
    pub fn bottom(&self) -> i32 { self.y + self.h as i32 }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    pub fn inside(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= width as i32 && self.bottom() <= height as i32
    }
}

const CELL: u32 = 4;
/// Arc length between two probes, in pixels.
const PROBE_STEP: f32 = 8.0;
/// Distance between spiral turns, in pixels.
const TURN_SPACING: f32 = 16.0;

/// Coarse occupancy bitmap; a cell is taken as soon as any placed box touches it.
struct Occupancy {
    cols: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl Occupancy {
    fn new(width: u32, height: u32) -> Self {
        let cols = width.div_ceil(CELL);
        let rows = height.div_ceil(CELL);
        Self { cols, rows, cells: vec![false; (cols * rows) as usize] }
    }

    fn cell_span(&self, r: &Rect) -> (u32, u32, u32, u32) {
        let x0 = r.x as u32 / CELL;
        let y0 = r.y as u32 / CELL;
        let x1 = ((r.right() as u32).div_ceil(CELL)).min(self.cols);
        let y1 = ((r.bottom() as u32).div_ceil(CELL)).min(self.rows);
        (x0, y0, x1, y1)
    }

    fn is_free(&self, r: &Rect) -> bool {
        let (x0, y0, x1, y1) = self.cell_span(r);
        (y0..y1).all(|y| (x0..x1).all(|x| !self.cells[(y * self.cols + x) as usize]))
    }

    fn mark(&mut self, r: &Rect) {
        let (x0, y0, x1, y1) = self.cell_span(r);
        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[(y * self.cols + x) as usize] = true;
            }
        }
    }
}

/// Returns one slot per input size: the chosen rectangle, or `None` if the box found no room.
pub fn place_boxes(sizes: &[(u32, u32)], width: u32, height: u32) -> Vec<Option<Rect>> {
    let mut grid = Occupancy::new(width, height);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let max_radius = (cx * cx + cy * cy).sqrt();
    let a = TURN_SPACING / std::f32::consts::TAU;

    sizes
        .iter()
        .map(|&(w, h)| {
            if w == 0 || h == 0 || w > width || h > height {
                return None;
            }
            let mut theta = 0.0f32;
            loop {
                let radius = a * theta;
                if radius > max_radius {
                    return None;
                }
                let rect = Rect {
                    x: (cx + radius * theta.cos() - w as f32 / 2.0).round() as i32,
                    y: (cy + radius * theta.sin() - h as f32 / 2.0).round() as i32,
                    w,
                    h,
                };
                if rect.inside(width, height) && grid.is_free(&rect) {
                    grid.mark(&rect);
                    return Some(rect);
                }
                theta += PROBE_STEP / radius.max(PROBE_STEP);
            }
        })
        .collect()
}
