//! Anti-aliased scanline polygon filling
//!
//! Polygons are converted into exact per pixel coverage and composited
//! into a color buffer, or written as coverage into a mask buffer.
//!
//! # How does this work
//!
//! ```text
//!    ren = ColorCompositor( ViewMut( ColorBuffer ) )   or MaskWriter
//!    ras = RasterizerScanline( width, height )
//!  Raster Operations
//!    begin, move_to_d, line_to_d, add_polygon, add_path
//!    clip.line_to()
//!       clip.line_clip_y()
//!        line()             -- inside pieces
//!         render_hline()
//!          accumulate()
//!        left_edge()        -- pieces left of the clip box, cover only
//!     Output: Rows of sorted Cells with X, Cover, and Area
//!  Render to Image
//!   finish(ren)
//!    render_scanlines(ras, sl, ren)
//!     rewind_scanlines()
//!       close_polygon()
//!     sweep_scanline() - Individual horizontal (y) lines
//!       calculate_alpha()  -- non-zero or even-odd
//!     ren.render(sl)
//!       blend_pix()        -- gamma, opacity mask, ALPHA_CACHE
//! ```
//!
//! # Example
//!
//!     use scanfill::{RasterizerScanline, ColorBuffer, ColorCompositor};
//!     use scanfill::{PathBuilder, Paint, Rgba8, FillingRule};
//!
//!     let mut path = PathBuilder::new();
//!     path.move_to(10.0, 10.0);
//!     path.line_to(90.0, 10.0);
//!     path.line_to(90.0, 90.0);
//!     path.line_to(10.0, 90.0);
//!     path.move_to(30.0, 30.0);
//!     path.line_to(70.0, 30.0);
//!     path.line_to(70.0, 70.0);
//!     path.line_to(30.0, 70.0);
//!     path.finish();
//!
//!     let mut buf = ColorBuffer::new(100, 100);
//!     buf.clear(Rgba8::white().to_argb());
//!     let mut ras = RasterizerScanline::new(100, 100);
//!     let paint = Paint::new(Rgba8::black()).filling_rule(FillingRule::EvenOdd);
//!     let mut ren = ColorCompositor::new(buf.view_mut(), paint);
//!     ras.fill_path(&path, &mut ren).unwrap();
//!     drop(ren);
//!
//!     assert_eq!(buf.get(20, 20), Some(0xff00_0000));
//!     assert_eq!(buf.get(50, 50), Some(0xffff_ffff));
//!

pub mod path_storage;
pub mod color;
pub mod math;
pub mod buffer;
pub mod clip;
pub mod cell;
pub mod raster;
pub mod scan;
pub mod alpha_cache;
pub mod gamma;
pub mod alphamask;
pub mod paint;
pub mod render;
pub mod error;

pub use path_storage::*;
pub use color::*;
pub use buffer::*;
pub use clip::*;
pub use cell::*;
pub use raster::*;
pub use scan::*;
pub use alpha_cache::*;
pub use gamma::*;
pub use alphamask::*;
pub use paint::*;
pub use render::*;
pub use error::Error;

/// Bits of subpixel precision in fixed point coordinates
pub const POLY_SUBPIXEL_SHIFT : i64 = 8;
/// Subpixels per pixel
pub const POLY_SUBPIXEL_SCALE : i64 = 1<<POLY_SUBPIXEL_SHIFT;
/// Mask of the subpixel part of a coordinate
pub const POLY_SUBPIXEL_MASK  : i64 = POLY_SUBPIXEL_SCALE - 1;

/// Render scanlines to a destination
pub trait Render {
    /// Winding rule requested for the fill, Default leaves it to the rasterizer
    fn rule(&self) -> FillingRule {
        FillingRule::Default
    }
    /// Render a single scanline row
    fn render(&mut self, sl: &ScanlineU8);
}
