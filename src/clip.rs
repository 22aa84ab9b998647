//! Clipping Region

use crate::cell::RasterizerCell;
use crate::error::Result;

/// Rectangle
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rectangle<T: std::cmp::PartialOrd + Copy> {
    /// Minimum x value
    pub x1: T,
    /// Minimum y value
    pub y1: T,
    /// Maximum x value
    pub x2: T,
    /// Maximum y value
    pub y2: T,
}
impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    ///
    ///     use scanfill::Rectangle;
    ///
    ///     let r = Rectangle::new(10, 20, 0, 5);
    ///     assert_eq!(r, Rectangle { x1: 0, y1: 5, x2: 10, y2: 20 });
    ///
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        let (x1, x2) = if x1 > x2 { (x2,x1) } else { (x1,x2) };
        let (y1, y2) = if y1 > y2 { (y2,y1) } else { (y1,y2) };
        Self { x1,y1,x2,y2 }
    }
    /// Get location of point relative to rectangle
    ///
    /// Returned is an a u8 made up of the following bits:
    /// - [INSIDE](constant.INSIDE.html)
    /// - [LEFT](constant.LEFT.html)
    /// - [RIGHT](constant.RIGHT.html)
    /// - [ABOVE](constant.ABOVE.html)
    /// - [BELOW](constant.BELOW.html)
    ///
    /// Points on the boundary are inside
    pub fn clip_flags(&self, x: T, y: T) -> u8 {
        clip_flags(&x,&y, &self.x1, &self.y1, &self.x2, &self.y2)
    }
}

/// Inside Region
///
/// See [Liang Barsky](https://en.wikipedia.org/wiki/Liang-Barsky_algorithm)
pub const INSIDE : u8 = 0b0000;
/// Left of Region, x < x1
pub const LEFT   : u8 = 0b0000_0001;
/// Right of Region, x > x2
pub const RIGHT  : u8 = 0b0000_0010;
/// Above Region, y < y1
pub const ABOVE  : u8 = 0b0000_0100;
/// Below Region, y > y2
pub const BELOW  : u8 = 0b0000_1000;

fn clip_flags<T: std::cmp::PartialOrd>(x: &T, y: &T, x1: &T, y1: &T, x2: &T, y2: &T) -> u8 {
    let mut code = INSIDE;
    if x < x1 { code |= LEFT; }
    if x > x2 { code |= RIGHT; }
    if y < y1 { code |= ABOVE; }
    if y > y2 { code |= BELOW; }
    code
}

/// Where a clipped piece of an edge lies
#[derive(Debug,Copy,Clone,PartialEq)]
enum Piece {
    /// Inside the clip box, walked normally
    Inside,
    /// Projected onto the left edge, only its cover is kept
    Left,
    /// Projected onto the right edge, dropped
    Right,
}

fn mul_div(a: i64, b: i64, c: i64) -> i64 {
    let (a,b,c) = (a as f64, b as f64, c as f64);
    (a * b / c).round() as i64
}

/// Clip Region
///
/// Clips edges, in subpixels, before they reach the cells
#[derive(Debug,Default)]
pub struct Clip {
    /// Current x Point
    x1: i64,
    /// Current y Point
    y1: i64,
    /// Rectangle to clip on, in subpixels
    clip_box: Rectangle<i64>,
    /// Current clip flag for point (x1,y1)
    clip_flag: u8,
}

impl Clip {
    /// Create new Clipping region, in subpixels
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        let clip_box = Rectangle::new(x1, y1, x2, y2);
        Self { x1: 0, y1: 0, clip_box,
               clip_flag: clip_box.clip_flags(0, 0) }
    }
    /// Clipping rectangle, in subpixels
    pub fn rect(&self) -> Rectangle<i64> {
        self.clip_box
    }
    /// Clip a line along the top and bottom of the region
    fn line_clip_y(&self, ras: &mut RasterizerCell, piece: Piece,
                   x1: i64, y1: i64,
                   x2: i64, y2: i64,
                   f1: u8, f2: u8) -> Result<()> {
        let b = &self.clip_box;
        let f1 = f1 & (ABOVE|BELOW);
        let f2 = f2 & (ABOVE|BELOW);
        let (mut tx1, mut ty1, mut tx2, mut ty2) = (x1,y1,x2,y2);
        if f1 != INSIDE || f2 != INSIDE {
            // Both points above or below clip box
            if f1 == f2 {
                return Ok(());
            }
            if f1 == ABOVE {
                tx1 = x1 + mul_div(b.y1-y1, x2-x1, y2-y1);
                ty1 = b.y1;
            }
            if f1 == BELOW {
                tx1 = x1 + mul_div(b.y2-y1, x2-x1, y2-y1);
                ty1 = b.y2;
            }
            if f2 == ABOVE {
                tx2 = x1 + mul_div(b.y1-y1, x2-x1, y2-y1);
                ty2 = b.y1;
            }
            if f2 == BELOW {
                tx2 = x1 + mul_div(b.y2-y1, x2-x1, y2-y1);
                ty2 = b.y2;
            }
        }
        match piece {
            Piece::Inside => ras.line(tx1, ty1, tx2, ty2),
            Piece::Left   => ras.left_edge(b.x1, ty1, ty2),
            Piece::Right  => Ok(()),
        }
    }

    /// Draw a line from the current point to (x2,y2) into a RasterizerCell
    ///
    /// Final point (x2,y2) becomes the current point
    pub fn line_to(&mut self, ras: &mut RasterizerCell, x2: i64, y2: i64) -> Result<()> {
        let b = self.clip_box;
        let f2 = b.clip_flags(x2,y2);
        let (x1,y1,f1) = (self.x1, self.y1, self.clip_flag);
        self.x1 = x2;
        self.y1 = y2;
        self.clip_flag = f2;

        // Both points above, below or right of the clip box
        let fy1 = (ABOVE | BELOW) & f1;
        let fy2 = (ABOVE | BELOW) & f2;
        if (fy1 != INSIDE && fy1 == fy2) || (f1 & f2 & RIGHT) != 0 {
            log::trace!("LINE OUTSIDE CLIP BOX {} {} -> {} {} f {:04b} {:04b}",
                        x1, y1, x2, y2, f1, f2);
            return Ok(());
        }
        match (f1 & (LEFT|RIGHT), f2 & (LEFT|RIGHT)) {
            (INSIDE,INSIDE) => self.line_clip_y(ras, Piece::Inside, x1,y1,x2,y2,f1,f2),
            (INSIDE,RIGHT) => {
                let y3 = y1 + mul_div(b.x2-x1, y2-y1, x2-x1);
                let f3 = b.clip_flags(b.x2, y3);
                self.line_clip_y(ras, Piece::Inside, x1,   y1, b.x2, y3, f1, f3)?;
                self.line_clip_y(ras, Piece::Right,  b.x2, y3, b.x2, y2, f3, f2)
            },
            (RIGHT,INSIDE) => {
                let y3 = y1 + mul_div(b.x2-x1, y2-y1, x2-x1);
                let f3 = b.clip_flags(b.x2, y3);
                self.line_clip_y(ras, Piece::Right,  b.x2, y1, b.x2, y3, f1, f3)?;
                self.line_clip_y(ras, Piece::Inside, b.x2, y3,   x2, y2, f3, f2)
            },
            (INSIDE,LEFT) => {
                let y3 = y1 + mul_div(b.x1-x1, y2-y1, x2-x1);
                let f3 = b.clip_flags(b.x1, y3);
                self.line_clip_y(ras, Piece::Inside, x1,   y1, b.x1, y3, f1, f3)?;
                self.line_clip_y(ras, Piece::Left,   b.x1, y3, b.x1, y2, f3, f2)
            },
            (RIGHT,LEFT) => {
                let y3 = y1 + mul_div(b.x2-x1, y2-y1, x2-x1);
                let y4 = y1 + mul_div(b.x1-x1, y2-y1, x2-x1);
                let f3 = b.clip_flags(b.x2, y3);
                let f4 = b.clip_flags(b.x1, y4);
                self.line_clip_y(ras, Piece::Right,  b.x2, y1, b.x2, y3, f1, f3)?;
                self.line_clip_y(ras, Piece::Inside, b.x2, y3, b.x1, y4, f3, f4)?;
                self.line_clip_y(ras, Piece::Left,   b.x1, y4, b.x1, y2, f4, f2)
            },
            (LEFT,INSIDE) => {
                let y3 = y1 + mul_div(b.x1-x1, y2-y1, x2-x1);
                let f3 = b.clip_flags(b.x1, y3);
                self.line_clip_y(ras, Piece::Left,   b.x1, y1, b.x1, y3, f1, f3)?;
                self.line_clip_y(ras, Piece::Inside, b.x1, y3,   x2, y2, f3, f2)
            },
            (LEFT,RIGHT) => {
                let y3 = y1 + mul_div(b.x1-x1, y2-y1, x2-x1);
                let y4 = y1 + mul_div(b.x2-x1, y2-y1, x2-x1);
                let f3 = b.clip_flags(b.x1, y3);
                let f4 = b.clip_flags(b.x2, y4);
                self.line_clip_y(ras, Piece::Left,   b.x1, y1, b.x1, y3, f1, f3)?;
                self.line_clip_y(ras, Piece::Inside, b.x1, y3, b.x2, y4, f3, f4)?;
                self.line_clip_y(ras, Piece::Right,  b.x2, y4, b.x2, y2, f4, f2)
            },
            (LEFT,LEFT)   => self.line_clip_y(ras, Piece::Left, b.x1,y1,b.x1,y2,f1,f2),
            (_,_) => unreachable!("f1,f2 {:04b} {:04b}", f1,f2),
        }
    }
    /// Move to point (x2,y2)
    ///
    /// Point is saved internally as (x1,y1)
    pub fn move_to(&mut self, x2: i64, y2: i64) {
        self.x1 = x2;
        self.y1 = y2;
        self.clip_flag = self.clip_box.clip_flags(x2, y2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Clip, RasterizerCell) {
        let clip = Clip::new(0, 0, 10 << 8, 10 << 8);
        let mut cells = RasterizerCell::new();
        cells.resize(0, 10);
        (clip, cells)
    }

    #[test]
    fn flags() {
        let r = Rectangle::new(0, 0, 10, 10);
        assert_eq!(r.clip_flags(5, 5), INSIDE);
        assert_eq!(r.clip_flags(10, 10), INSIDE);
        assert_eq!(r.clip_flags(-1, 5), LEFT);
        assert_eq!(r.clip_flags(11, -1), RIGHT | ABOVE);
        assert_eq!(r.clip_flags(-1, 11), LEFT | BELOW);
    }

    #[test]
    fn outside_edges_are_skipped() {
        let (mut clip, mut cells) = setup();
        assert_eq!(clip.rect(), Rectangle::new(0, 0, 10 << 8, 10 << 8));
        // Above
        clip.move_to(0, -512);
        clip.line_to(&mut cells, 2048, -256).unwrap();
        // Below
        clip.move_to(0, 3000);
        clip.line_to(&mut cells, 2048, 4000).unwrap();
        // Right
        clip.move_to(3000, 0);
        clip.line_to(&mut cells, 4000, 2048).unwrap();
        assert!(cells.is_empty());
        assert_eq!(cells.total_cells(), 0);
    }

    #[test]
    fn left_edges_carry() {
        let (mut clip, mut cells) = setup();
        clip.move_to(-512, 0);
        clip.line_to(&mut cells, -256, 1024).unwrap();
        assert_eq!(cells.total_cells(), 0);
        for y in 0..4 {
            assert_eq!(cells.carry(y), 256);
        }
        assert_eq!(cells.carry(4), 0);
    }

    #[test]
    fn crossing_edge_is_split() {
        let (mut clip, mut cells) = setup();
        // From left outside to inside across one row
        clip.move_to(-256, 0);
        clip.line_to(&mut cells, 256, 256).unwrap();
        assert_eq!(cells.carry(0), 128);
        let cover : i64 = cells.scanline_cells(0).iter().map(|c| c.cover).sum();
        assert_eq!(cover, 128);
    }
}
