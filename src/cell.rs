//! Cells and the edge walker
//!
//! Each scanline owns a sorted list of [Cell]s holding the cover and area
//! contributed by every edge crossing that pixel. Edges are walked in 24.8
//! fixed point by [RasterizerCell::line].

use crate::POLY_SUBPIXEL_SCALE;
use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_MASK;

use crate::error::Error;
use crate::error::Result;

use std::cmp::min;
use std::cmp::max;

/// Longest horizontal run walked in one piece, in subpixels
const DX_LIMIT : i64 = 16384 << POLY_SUBPIXEL_SHIFT;

/// Coverage of a single pixel within a scanline
#[derive(Debug,Copy,Clone,PartialEq,Default)]
pub struct Cell { // cell_aa
    /// Pixel column
    pub x: i64,
    /// Vertical extent of edges within the cell, scaled by 256, signed
    pub cover: i64,
    /// Twice the signed area swept by edges within the cell
    pub area: i64,
}

impl Cell {
    pub fn at(x: i64) -> Self {
        Cell { x, cover: 0, area: 0 }
    }
    pub fn is_empty(&self) -> bool {
        self.cover == 0 && self.area == 0
    }
}

/// Cells of a single scanline
///
/// Cells are sorted by x without duplicates. The cursor remembers the last
/// touched cell so edges walking to the right find their cell quickly.
#[derive(Debug,Default,Clone)]
pub struct Row {
    cells: Vec<Cell>,
    cursor: usize,
    /// Cover entering from the left of the clip box
    carry: i64,
    generation: u64,
}

impl Row {
    fn clear(&mut self, generation: u64) {
        self.cells.clear();
        self.cursor = 0;
        self.carry = 0;
        self.generation = generation;
    }
    /// Find or insert the cell at `x`, returns its index and if it was created
    fn locate(&mut self, y: i64, x: i64) -> Result<(usize, bool)> {
        if self.cells.is_empty() {
            self.cells.push(Cell::at(x));
            self.cursor = 0;
            return Ok((0, true));
        }
        let cur = match self.cells.get(self.cursor) {
            Some(c) => c.x,
            None => return Err(Error::CellCursor { y, cursor: self.cursor,
                                                   len: self.cells.len() }),
        };
        if cur == x {
            return Ok((self.cursor, false));
        }
        // Moving backwards restarts from the head
        let mut i = if cur < x { self.cursor + 1 } else { 0 };
        while i < self.cells.len() && self.cells[i].x < x {
            i += 1;
        }
        let created = i == self.cells.len() || self.cells[i].x != x;
        if created {
            self.cells.insert(i, Cell::at(x));
        }
        self.cursor = i;
        Ok((i, created))
    }
}

/// Row storage and edge walker
///
/// Rows cover scanlines `y0 ..= y0 + rows.len() - 1`. Rows are reset by
/// bumping the generation; a stale row is emptied on first use, keeping
/// its allocation.
#[derive(Debug)]
pub struct RasterizerCell {
    rows: Vec<Row>,
    y0: i64,
    generation: u64,
    total: usize,
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Default for RasterizerCell {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterizerCell {
    /// Create an empty store without rows
    pub fn new() -> Self {
        Self { rows: vec![],
               y0: 0,
               generation: 1,
               total: 0,
               min_x: std::i64::MAX,
               min_y: std::i64::MAX,
               max_x: std::i64::MIN,
               max_y: std::i64::MIN,
        }
    }
    /// Provide rows for scanlines `y1 ..= y2`
    ///
    /// All rows are reset
    pub fn resize(&mut self, y1: i64, y2: i64) {
        let n = if y2 >= y1 { (y2 - y1 + 1) as usize } else { 0 };
        self.rows.resize_with(n, Row::default);
        self.y0 = y1;
        self.reset();
    }
    /// Discard all cells
    pub fn reset(&mut self) {
        self.generation += 1;
        self.total = 0;
        self.max_x = std::i64::MIN;
        self.max_y = std::i64::MIN;
        self.min_x = std::i64::MAX;
        self.min_y = std::i64::MAX;
    }
    /// Number of cells created since the last reset
    pub fn total_cells(&self) -> usize {
        self.total
    }
    /// Nothing has been accumulated since the last reset
    pub fn is_empty(&self) -> bool {
        self.min_y > self.max_y
    }
    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
    fn live_row(&self, y: i64) -> Option<&Row> {
        if y < self.y0 {
            return None;
        }
        self.rows.get((y - self.y0) as usize)
            .filter(|row| row.generation == self.generation)
    }
    /// Cells of scanline `y`, sorted by x
    pub fn scanline_cells(&self, y: i64) -> &[Cell] {
        match self.live_row(y) {
            Some(row) => &row.cells,
            None => &[],
        }
    }
    /// Number of cells in scanline `y`
    pub fn scanline_num_cells(&self, y: i64) -> usize {
        self.scanline_cells(y).len()
    }
    /// Cover entering scanline `y` from the left of the clip box
    pub fn carry(&self, y: i64) -> i64 {
        self.live_row(y).map(|row| row.carry).unwrap_or(0)
    }
    fn row_mut(&mut self, y: i64) -> Result<&mut Row> {
        let (lo, hi) = (self.y0, self.y0 + self.rows.len() as i64 - 1);
        if y < lo || y > hi {
            return Err(Error::RowOutOfRange { y, min: lo, max: hi });
        }
        let generation = self.generation;
        let row = &mut self.rows[(y - lo) as usize];
        if row.generation != generation {
            row.clear(generation);
        }
        Ok(row)
    }
    /// Add `cover` and `area` to the cell at (`x`,`y`)
    ///
    /// The cell is created if missing. Zero contributions are ignored.
    pub fn accumulate(&mut self, y: i64, x: i64, cover: i64, area: i64) -> Result<()> {
        if cover == 0 && area == 0 {
            return Ok(());
        }
        let row = self.row_mut(y)?;
        let (i, created) = row.locate(y, x)?;
        let cell = &mut row.cells[i];
        cell.cover += cover;
        cell.area  += area;
        if created {
            self.total += 1;
        }
        Ok(())
    }
    /// Add `cover` entering scanline `y` from the left clip edge
    pub fn add_carry(&mut self, y: i64, cover: i64) -> Result<()> {
        if cover == 0 {
            return Ok(());
        }
        self.row_mut(y)?.carry += cover;
        Ok(())
    }
    fn update_bounds(&mut self, ex1: i64, ey1: i64, ex2: i64, ey2: i64) {
        self.min_x = min(ex2, min(ex1, self.min_x));
        self.min_y = min(ey2, min(ey1, self.min_y));
        self.max_x = max(ex2, max(ex1, self.max_x));
        self.max_y = max(ey2, max(ey1, self.max_y));
    }

    /// Walk a line within a single scanline `ey`
    ///
    /// `y1` and `y2` are subpixel offsets within the scanline
    fn render_hline(&mut self, ey: i64, x1: i64, y1: i64, x2: i64, y2: i64) -> Result<()> {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1  & POLY_SUBPIXEL_MASK;
        let fx2 = x2  & POLY_SUBPIXEL_MASK;

        // Horizontal Line
        if y1 == y2 {
            return Ok(());
        }

        // Single Cell
        if ex1 == ex2 {
            log::trace!("INCR0 x,y {} {} dcover {} darea {}", ex1, ey, y2-y1, (fx1 + fx2) * (y2-y1));
            return self.accumulate(ey, ex1, y2-y1, (fx1 + fx2) * (y2-y1));
        }
        // Adjacent Cells on Same Line
        let (mut p, first, incr, dx) = if x2-x1 < 0 {
            (fx1 * (y2-y1), 0,-1, x1-x2)
        } else {
            ((POLY_SUBPIXEL_SCALE - fx1) * (y2-y1), POLY_SUBPIXEL_SCALE, 1, x2-x1)
        };
        let mut delta = p / dx;
        let mut xmod =  p % dx;

        if xmod < 0 {
            delta -= 1;
            xmod += dx;
        }
        self.accumulate(ey, ex1, delta, (fx1 + first) * delta)?;

        let mut ex1 = ex1 + incr;
        let mut y1 = y1 + delta;

        if ex1 != ex2 {
            p = POLY_SUBPIXEL_SCALE * (y2 - y1 + delta);
            let mut lift = p / dx;
            let mut rem = p % dx;
            if rem < 0 {
                lift -= 1;
                rem += dx;
            }
            xmod -= dx;

            while ex1 != ex2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dx;
                    delta += 1;
                }
                self.accumulate(ey, ex1, delta, POLY_SUBPIXEL_SCALE * delta)?;
                y1 += delta;
                ex1 += incr;
            }
        }
        delta = y2-y1;
        self.accumulate(ey, ex2, delta, (fx2 + POLY_SUBPIXEL_SCALE - first) * delta)
    }

    /// Walk a line from (x1,y1) to (x2,y2), in subpixels
    ///
    /// Every pixel crossed receives its cover and area
    pub fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) -> Result<()> {
        log::trace!("LINE: {} {} -> {} {}", x1,y1, x2,y2);
        let dx = x2 - x1;
        // Split long lines in half
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = (x1 + x2) >> 1;
            let cy = (y1 + y2) >> 1;
            self.line(x1, y1, cx, cy)?;
            return self.line(cx, cy, x2, y2);
        }
        let dy = y2-y1;
        // Downshift
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 &  POLY_SUBPIXEL_MASK;
        let fy2 = y2 &  POLY_SUBPIXEL_MASK;

        self.update_bounds(ex1, ey1, ex2, ey2);

        // Within a single scanline
        if ey1 == ey2 {
            return self.render_hline(ey1, x1, fy1, x2, fy2);
        }

        // Vertical line, a single column of cells
        if dx == 0 {
            let ex = x1 >> POLY_SUBPIXEL_SHIFT;
            let two_fx = (x1 - (ex << POLY_SUBPIXEL_SHIFT)) << 1;
            return vertical_steps(y1, y2, |ey, delta| {
                self.accumulate(ey, ex, delta, two_fx * delta)
            });
        }

        // Render Multiple Lines
        let (p,first,incr, dy) = if dy < 0 {
            (fy1 * dx, 0, -1, -dy)
        } else {
            ((POLY_SUBPIXEL_SCALE - fy1) * dx, POLY_SUBPIXEL_SCALE, 1, dy)
        };
        let mut delta = p / dy;
        let mut xmod  = p % dy;
        if xmod < 0 {
            delta -= 1;
            xmod += dy;
        }
        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first)?;
        let mut ey1 = ey1 + incr;
        if ey1 != ey2 {
            let p = POLY_SUBPIXEL_SCALE * dx;
            let mut lift = p / dy;
            let mut rem  = p % dy;
            if rem < 0 {
                lift -= 1;
                rem += dy;
            }
            xmod -= dy;
            while ey1 != ey2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dy;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x_to, first)?;
                x_from = x_to;
                ey1 += incr;
            }
        }
        self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x2, fy2)
    }

    /// Walk a line lying on the left clip edge at `x`, in subpixels
    ///
    /// Only cover is recorded, as the row's carry; no cells are created
    pub fn left_edge(&mut self, x: i64, y1: i64, y2: i64) -> Result<()> {
        let ex = x >> POLY_SUBPIXEL_SHIFT;
        self.update_bounds(ex, y1 >> POLY_SUBPIXEL_SHIFT,
                           ex, y2 >> POLY_SUBPIXEL_SHIFT);
        vertical_steps(y1, y2, |ey, delta| self.add_carry(ey, delta))
    }
}

/// Split a vertical run from `y1` to `y2` into per-scanline cover
///
/// `f` is called with each scanline and its cover
fn vertical_steps<F>(y1: i64, y2: i64, mut f: F) -> Result<()>
    where F: FnMut(i64, i64) -> Result<()>
{
    let ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
    let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
    let fy1 = y1 &  POLY_SUBPIXEL_MASK;
    let fy2 = y2 &  POLY_SUBPIXEL_MASK;
    if ey1 == ey2 {
        return f(ey1, fy2 - fy1);
    }
    let (first, incr) = if y2 < y1 {
        (0, -1)
    } else {
        (POLY_SUBPIXEL_SCALE, 1)
    };
    f(ey1, first - fy1)?;
    let mut ey = ey1 + incr;
    let delta = first + first - POLY_SUBPIXEL_SCALE;
    while ey != ey2 {
        f(ey, delta)?;
        ey += incr;
    }
    f(ey2, fy2 - POLY_SUBPIXEL_SCALE + first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RasterizerCell {
        let mut c = RasterizerCell::new();
        c.resize(0, 10);
        c
    }

    #[test]
    fn accumulate_keeps_cells_sorted() {
        let mut c = store();
        for &x in [5, 2, 9, 2, 7, 1, 9].iter() {
            c.accumulate(3, x, 1, 1).unwrap();
        }
        let xs : Vec<_> = c.scanline_cells(3).iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![1, 2, 5, 7, 9]);
        assert_eq!(c.total_cells(), 5);
        let c2 = c.scanline_cells(3)[1];
        assert_eq!(c2, Cell { x: 2, cover: 2, area: 2 });
    }

    #[test]
    fn zero_contribution_creates_nothing() {
        let mut c = store();
        c.accumulate(3, 4, 0, 0).unwrap();
        c.add_carry(3, 0).unwrap();
        assert_eq!(c.total_cells(), 0);
        assert_eq!(c.scanline_num_cells(3), 0);
    }

    #[test]
    fn row_out_of_range() {
        let mut c = store();
        match c.accumulate(11, 0, 1, 0) {
            Err(Error::RowOutOfRange { y: 11, min: 0, max: 10 }) => {},
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn bad_cursor_is_reported() {
        let mut row = Row::default();
        row.cells.push(Cell::at(3));
        row.cursor = 4;
        match row.locate(0, 5) {
            Err(Error::CellCursor { cursor: 4, len: 1, .. }) => {},
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn reset_empties_rows() {
        let mut c = store();
        c.accumulate(2, 2, 5, 5).unwrap();
        c.add_carry(2, 5).unwrap();
        c.reset();
        assert!(c.scanline_cells(2).is_empty());
        assert_eq!(c.carry(2), 0);
        c.accumulate(2, 8, 1, 0).unwrap();
        assert_eq!(c.scanline_cells(2), &[Cell { x: 8, cover: 1, area: 0 }]);
    }

    #[test]
    fn vertical_line_cover() {
        let mut c = store();
        // x = 2.5, y from 1.25 to 4.75
        c.line(640, 320, 640, 1216).unwrap();
        let total : i64 = (0..10).map(|y| c.scanline_cells(y).iter()
                                      .map(|c| c.cover).sum::<i64>()).sum();
        assert_eq!(total, 1216 - 320);
        assert_eq!(c.scanline_cells(2), &[Cell { x: 2, cover: 256, area: 256 * 256 }]);
        assert_eq!(c.scanline_cells(1)[0].cover, 256 - 64);
        assert_eq!(c.scanline_cells(4)[0].cover, 192);
    }

    #[test]
    fn horizontal_line_creates_nothing() {
        let mut c = store();
        c.line(0, 512, 2048, 512).unwrap();
        assert_eq!(c.total_cells(), 0);
    }

    #[test]
    fn diagonal_cover_and_area() {
        let mut c = store();
        // (0,0) -> (2,2): two cells on the diagonal and two beside it
        c.line(0, 0, 512, 512).unwrap();
        for y in 0..2 {
            let cov : i64 = c.scanline_cells(y).iter().map(|c| c.cover).sum();
            assert_eq!(cov, 256);
            let cell = c.scanline_cells(y)[0];
            assert_eq!(cell.x, y);
            // Half of the pixel lies to the left of the edge
            assert_eq!(cell.area, 256 * 256);
        }
    }

    #[test]
    fn shallow_line_across_cells() {
        let mut c = store();
        // 0.25 -> 5.25 pixels across, 203 subpixels down, all in row 0
        c.line(64, 0, 1344, 203).unwrap();
        let cells = c.scanline_cells(0).to_vec();
        assert_eq!(cells, vec![
            Cell { x: 0, cover: 30, area:  9600 },
            Cell { x: 1, cover: 41, area: 10496 },
            Cell { x: 2, cover: 40, area: 10240 },
            Cell { x: 3, cover: 41, area: 10496 },
            Cell { x: 4, cover: 40, area: 10240 },
            Cell { x: 5, cover: 11, area:   704 },
        ]);
        assert_eq!(c.num_rows(), 11);
        assert_eq!((c.min_x, c.max_x, c.min_y, c.max_y), (0, 5, 0, 0));

        // Walking backwards gives the same cells, negated
        let mut r = store();
        r.line(1344, 203, 64, 0).unwrap();
        let neg : Vec<_> = cells.iter()
            .map(|c| Cell { x: c.x, cover: -c.cover, area: -c.area })
            .collect();
        assert_eq!(r.scanline_cells(0), &neg[..]);
    }

    #[test]
    fn long_line_is_split() {
        let mut c = store();
        // 16384 pixels across 10 rows, split at (8192, 5)
        c.line(0, 0, DX_LIMIT, 2560).unwrap();
        let slope = DX_LIMIT as f64 / 2560.0;
        for y in 0 .. 10 {
            let cells = c.scanline_cells(y);
            let cover : i64 = cells.iter().map(|c| c.cover).sum();
            assert_eq!(cover, 256, "row {}", y);
            assert!(cells.windows(2).all(|w| w[0].x < w[1].x), "row {}", y);

            let lo = (slope * y as f64).floor() as i64;
            let hi = (slope * (y + 1) as f64).floor() as i64;
            let (first, last) = (cells[0].x, cells[cells.len()-1].x);
            assert!(first >= lo && last <= hi, "row {} {}..{} {}..{}", y, first, last, lo, hi);

            // Twice the integral of x over the row, in subpixels; each
            // crossed column may move its cover by less than one subpixel
            let moment : i64 = cells.iter()
                .map(|c| 2 * POLY_SUBPIXEL_SCALE * c.x * c.cover + c.area)
                .sum();
            let exact = slope * 65536.0 * (2 * y + 1) as f64;
            let tol = 2.0 * 256.0 * (slope + 2.0);
            assert!((moment as f64 - exact).abs() <= tol,
                    "row {} moment {} exact {}", y, moment, exact);
        }
        // Split halves meet at (8192, 5)
        assert!(c.scanline_cells(4).last().map(|c| c.x) <= Some(8192));
        assert!(c.scanline_cells(5)[0].x >= 8192);
        assert!(c.scanline_cells(10).is_empty());
    }
}
