//! Rasterizer
//!
//! Polygons enter through [RasterizerScanline::move_to_d],
//! [RasterizerScanline::line_to_d] or [RasterizerScanline::add_polygon],
//! are clipped and walked into cells, then swept row by row into
//! [ScanlineU8]s for a [Render]er.

use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_SCALE;

use crate::clip::Clip;
use crate::clip::Rectangle;
use crate::scan::ScanlineU8;
use crate::cell::RasterizerCell;
use crate::path_storage::PathBuilder;
use crate::render::render_scanlines;
use crate::error::Error;
use crate::error::Result;

use crate::Render;

use std::cmp::min;
use std::cmp::max;

/// Largest coordinate magnitude, in subpixels
///
/// Differences of two coordinates must not overflow in the clipper
pub const POLY_MAX_COORD : i64 = 1 << 40;

/// Convert a coordinate to subpixels, clamped to [-POLY_MAX_COORD, POLY_MAX_COORD]
///
///     use scanfill::raster::{upscale, POLY_MAX_COORD};
///
///     assert_eq!(upscale(1.5), 384);
///     assert_eq!(upscale(-4.0e16), -POLY_MAX_COORD);
///     assert_eq!(upscale(std::f64::INFINITY), POLY_MAX_COORD);
///
pub fn upscale(v: f64) -> i64 {
    let max = POLY_MAX_COORD as f64;
    (v * POLY_SUBPIXEL_SCALE as f64).round().max(-max).min(max) as i64
}

/// Winding rule deciding which pixels are inside
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum FillingRule {
    /// Use the rasterizer's rule
    Default,
    /// Inside where the winding count is not zero
    NonZero,
    /// Inside where the winding count is odd
    EvenOdd,
}
impl Default for FillingRule {
    fn default() -> FillingRule {
        FillingRule::Default
    }
}
impl FillingRule {
    /// This rule, or `fallback` when this is [FillingRule::Default]
    pub fn or(self, fallback: FillingRule) -> FillingRule {
        match self {
            FillingRule::Default => fallback,
            rule => rule,
        }
    }
}

#[derive(Debug,PartialEq,Copy,Clone)]
pub enum PathStatus {
    Initial,
    Closed,
    MoveTo,
    LineTo
}
impl Default for PathStatus {
    fn default() -> PathStatus {
        PathStatus::Initial
    }
}

/// Anti-aliased scanline rasterizer
///
/// One fill runs from [begin](#method.begin) to [finish](#method.finish),
/// or is a single call to [fill_polygon](#method.fill_polygon)
///
///     use scanfill::{RasterizerScanline, ColorBuffer, ColorCompositor, Paint, Rgba8};
///
///     let mut buf = ColorBuffer::new(100, 100);
///     let mut ras = RasterizerScanline::new(100, 100);
///
///     let mut ren = ColorCompositor::new(buf.view_mut(), Paint::new(Rgba8::black()));
///     ras.begin();
///     ras.move_to_d(10.0, 10.0).unwrap();
///     ras.line_to_d(50.0, 90.0).unwrap();
///     ras.line_to_d(90.0, 10.0).unwrap();
///     ras.finish(&mut ren).unwrap();
///     drop(ren);
///
///     assert_eq!(buf.get(50, 30), Some(0xff00_0000));
///     assert_eq!(buf.get(5, 5), Some(0));
///
#[derive(Debug)]
pub struct RasterizerScanline {
    clipper: Clip,
    outline: RasterizerCell,
    scanline: ScanlineU8,
    status: PathStatus,
    /// Start of the current polygon, in subpixels
    x0: i64,
    y0: i64,
    /// Clip box in pixels
    clip: Rectangle<i64>,
    scan_y: i64,
    scan_end: i64,
    filling_rule: FillingRule,
    active_rule: FillingRule,
    building: bool,
}

impl RasterizerScanline {
    /// Create a new rasterizer clipping to `width` x `height` pixels
    pub fn new(width: usize, height: usize) -> Self {
        let mut ras = Self { clipper: Clip::default(),
                             outline: RasterizerCell::new(),
                             scanline: ScanlineU8::new(),
                             status: PathStatus::Initial,
                             x0: 0, y0: 0,
                             clip: Rectangle::default(),
                             scan_y: 0, scan_end: -1,
                             filling_rule: FillingRule::NonZero,
                             active_rule: FillingRule::NonZero,
                             building: false,
        };
        ras.clip_box(0, 0, width as i64, height as i64);
        ras
    }
    /// Set the clipping box, in pixels
    ///
    /// Pixels in `left .. right` and `top .. bottom` are drawn. Any fill in
    /// progress is discarded.
    pub fn clip_box(&mut self, left: i64, top: i64, right: i64, bottom: i64) {
        self.clip = Rectangle::new(left, top, right, bottom);
        let c = self.clip;
        self.clipper = Clip::new(c.x1 << POLY_SUBPIXEL_SHIFT, c.y1 << POLY_SUBPIXEL_SHIFT,
                                 c.x2 << POLY_SUBPIXEL_SHIFT, c.y2 << POLY_SUBPIXEL_SHIFT);
        // One row past the bottom edge
        self.outline.resize(c.y1, c.y2);
        self.end();
    }
    /// Clipping box in pixels
    pub fn clip_rect(&self) -> Rectangle<i64> {
        self.clip
    }
    /// Set the rule used when the renderer does not choose one
    pub fn filling_rule(&mut self, rule: FillingRule) {
        self.filling_rule = rule.or(FillingRule::NonZero);
    }
    /// Cells accumulated so far
    pub fn cells(&self) -> &RasterizerCell {
        &self.outline
    }
    pub fn min_x(&self) -> i64 {
        self.outline.min_x
    }
    pub fn max_x(&self) -> i64 {
        self.outline.max_x
    }
    /// A fill is in progress
    pub fn is_building(&self) -> bool {
        self.building
    }
    /// Start a new fill, discarding anything not finished
    pub fn begin(&mut self) {
        self.outline.reset();
        self.status = PathStatus::Initial;
        self.building = true;
    }
    fn end(&mut self) {
        self.outline.reset();
        self.status = PathStatus::Initial;
        self.building = false;
    }
    /// Start a new polygon at (x,y), closing the current one
    pub fn move_to_d(&mut self, x: f64, y: f64) -> Result<()> {
        if ! self.building {
            self.begin();
        }
        self.close_polygon()?;
        self.x0 = upscale( x );
        self.y0 = upscale( y );
        self.clipper.move_to(self.x0,self.y0);
        self.status = PathStatus::MoveTo;
        Ok(())
    }
    /// Add an edge from the current point to (x,y)
    pub fn line_to_d(&mut self, x: f64, y: f64) -> Result<()> {
        if ! self.building || self.status == PathStatus::Initial {
            return self.move_to_d(x, y);
        }
        let x = upscale( x );
        let y = upscale( y );
        self.clipper.line_to(&mut self.outline, x,y)?;
        self.status = PathStatus::LineTo;
        Ok(())
    }
    /// Add the edge back to the start of the current polygon
    pub fn close_polygon(&mut self) -> Result<()> {
        if self.status == PathStatus::LineTo {
            self.clipper.line_to(&mut self.outline, self.x0, self.y0)?;
            self.status = PathStatus::Closed;
        }
        Ok(())
    }
    /// Add a closed polygon of `count` points from `data`
    ///
    /// Points are read as `[x0,y0,x1,y1,...]` starting at point `offset`
    /// and translated by (`dx`,`dy`)
    pub fn add_polygon(&mut self, data: &[f64], count: usize, offset: usize,
                       dx: f64, dy: f64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let end = offset.checked_add(count).and_then(|n| n.checked_mul(2));
        let end = match end {
            Some(end) if end <= data.len() => end,
            _ => return Err(Error::PolygonRange { offset, count, len: data.len() }),
        };
        let pts = &data[offset * 2 .. end];
        self.move_to_d(pts[0] + dx, pts[1] + dy)?;
        for p in pts[2..].chunks(2) {
            self.line_to_d(p[0] + dx, p[1] + dy)?;
        }
        self.close_polygon()
    }
    /// Add all closed subpaths of a path
    pub fn add_path(&mut self, path: &PathBuilder) -> Result<()> {
        for sub in path.subpaths() {
            log::trace!("ADD_PATH: {} points", sub.len() / 2);
            self.add_polygon(sub, sub.len() / 2, 0, 0.0, 0.0)?;
        }
        Ok(())
    }
    /// Resolve the coverage and hand it to `ren`
    ///
    /// The rasterizer is ready for the next fill afterwards, even on error
    pub fn finish<R: Render>(&mut self, ren: &mut R) -> Result<()> {
        log::debug!("FINISH: cells {} rows {} .. {}",
                    self.outline.total_cells(), self.outline.min_y, self.outline.max_y);
        let mut sl = std::mem::take(&mut self.scanline);
        let r = render_scanlines(self, &mut sl, ren);
        self.scanline = sl;
        self.end();
        r
    }
    /// Fill a single polygon, see [add_polygon](#method.add_polygon)
    pub fn fill_polygon<R: Render>(&mut self, data: &[f64], count: usize, offset: usize,
                                   dx: f64, dy: f64, ren: &mut R) -> Result<()> {
        self.begin();
        if let Err(e) = self.add_polygon(data, count, offset, dx, dy) {
            self.end();
            return Err(e);
        }
        self.finish(ren)
    }
    /// Fill all subpaths of a path as one shape
    pub fn fill_path<R: Render>(&mut self, path: &PathBuilder, ren: &mut R) -> Result<()> {
        self.begin();
        if let Err(e) = self.add_path(path) {
            self.end();
            return Err(e);
        }
        self.finish(ren)
    }
    /// Stroke a polygon outline
    ///
    /// Stroking is not supported
    ///
    ///     use scanfill::{RasterizerScanline, MaskBuffer, MaskWriter, Error};
    ///
    ///     let mut mask = MaskBuffer::new(10, 10);
    ///     let mut ras = RasterizerScanline::new(10, 10);
    ///     let mut ren = MaskWriter::new(mask.view_mut());
    ///     let r = ras.draw_polygon(&[0.,0., 5.,5., 0.,5.], 3, 0, 1.0, &mut ren);
    ///     assert!(matches!(r, Err(Error::Unsupported(_))));
    ///
    pub fn draw_polygon<R: Render>(&mut self, _data: &[f64], _count: usize, _offset: usize,
                                   _width: f64, _ren: &mut R) -> Result<()> {
        Err(Error::Unsupported("stroked polygons"))
    }

    /// Prepare to sweep the accumulated cells using `rule`
    ///
    /// Returns false if there is nothing to sweep
    pub fn rewind_scanlines(&mut self, rule: FillingRule) -> Result<bool> {
        self.close_polygon()?;
        self.active_rule = rule.or(self.filling_rule);
        if self.outline.is_empty() {
            return Ok(false);
        }
        self.scan_y = max(self.outline.min_y, self.clip.y1);
        self.scan_end = min(self.outline.max_y, self.clip.y2 - 1);
        Ok(self.scan_y <= self.scan_end)
    }
    /// Resolve the next row with coverage into `sl`
    ///
    /// Returns false when all rows are done
    pub fn sweep_scanline(&mut self, sl: &mut ScanlineU8) -> bool {
        loop {
            if self.scan_y > self.scan_end {
                return false;
            }
            let y = self.scan_y;
            self.scan_y += 1;
            sl.reset_spans();

            let mut cover = self.outline.carry(y);
            let mut x = self.clip.x1;
            for cell in self.outline.scanline_cells(y) {
                // Solid run between cells
                if cell.x > x && cover != 0 {
                    let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                    if alpha > 0 {
                        sl.add_span(x, cell.x - x, alpha);
                    }
                }
                cover += cell.cover;
                x = cell.x;
                if cell.area != 0 {
                    let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - cell.area);
                    if alpha > 0 {
                        sl.add_cell(x, alpha);
                    }
                    x += 1;
                }
            }
            // Run up to the right edge of the clip box
            if cover != 0 && x < self.clip.x2 {
                let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                if alpha > 0 {
                    sl.add_span(x, self.clip.x2 - x, alpha);
                }
            }
            if sl.num_spans() != 0 {
                log::trace!("SWEEP SCANLINES: Y: {} spans {}", y, sl.num_spans());
                sl.finalize(y);
                return true;
            }
        }
    }
    /// Convert a doubled area to an 8-bit coverage using the active rule
    pub fn calculate_alpha(&self, area: i64) -> u8 {
        let aa_shift  = 8;
        let aa_scale  = 1 << aa_shift;
        let aa_mask   = aa_scale  - 1;
        let aa_mask2  = aa_scale * 2 - 1;

        let mut cover = area >> (POLY_SUBPIXEL_SHIFT*2 + 1 - aa_shift);
        cover = cover.abs();
        if self.active_rule == FillingRule::EvenOdd {
            cover &= aa_mask2;
            if cover >= aa_scale {
                cover = aa_mask2 - cover;
            }
        }
        min(cover, aa_mask) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ras_with_rule(rule: FillingRule) -> RasterizerScanline {
        let mut ras = RasterizerScanline::new(10, 10);
        ras.filling_rule(rule);
        ras.active_rule = rule;
        ras
    }

    #[test]
    fn alpha_non_zero() {
        let ras = ras_with_rule(FillingRule::NonZero);
        assert_eq!(ras.calculate_alpha(0), 0);
        assert_eq!(ras.calculate_alpha(256 << 9), 255);
        assert_eq!(ras.calculate_alpha(-(256 << 9)), 255);
        assert_eq!(ras.calculate_alpha(128 << 9), 128);
        assert_eq!(ras.calculate_alpha(512 << 9), 255);
    }

    #[test]
    fn alpha_even_odd() {
        let ras = ras_with_rule(FillingRule::EvenOdd);
        assert_eq!(ras.calculate_alpha(256 << 9), 255);
        assert_eq!(ras.calculate_alpha(512 << 9), 0);
        assert_eq!(ras.calculate_alpha(384 << 9), 127);
        assert_eq!(ras.calculate_alpha(128 << 9), 128);
    }

    #[test]
    fn polygon_range_checked() {
        let mut ras = RasterizerScanline::new(10, 10);
        ras.begin();
        match ras.add_polygon(&[0.0, 0.0, 1.0, 1.0], 3, 0, 0.0, 0.0) {
            Err(Error::PolygonRange { count: 3, len: 4, .. }) => {},
            r => panic!("unexpected {:?}", r),
        }
        match ras.add_polygon(&[0.0, 0.0, 1.0, 1.0], 1, 2, 0.0, 0.0) {
            Err(Error::PolygonRange { offset: 2, .. }) => {},
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn sweep_square() {
        let mut ras = RasterizerScanline::new(10, 10);
        ras.begin();
        ras.add_polygon(&[2.0,2.0, 5.0,2.0, 5.0,4.0, 2.0,4.0], 4, 0, 0.0, 0.0).unwrap();
        assert!(ras.rewind_scanlines(FillingRule::Default).unwrap());
        let mut sl = ScanlineU8::new();
        let mut rows = vec![];
        while ras.sweep_scanline(&mut sl) {
            let spans : Vec<_> = sl.spans().map(|(x,c)| (x, c.to_vec())).collect();
            rows.push((sl.y, spans));
        }
        assert_eq!(rows.len(), 2);
        for (i, (y, spans)) in rows.iter().enumerate() {
            assert_eq!(*y, 2 + i as i64);
            assert_eq!(spans, &vec![(2, vec![255, 255, 255])]);
        }
    }
}
