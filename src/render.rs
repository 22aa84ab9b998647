//! Renderers
//!
//! Consumers of resolved scanlines. [ColorCompositor] blends a paint into a
//! color view, [MaskWriter] stores the coverage itself into a mask view.

use crate::scan::ScanlineU8;
use crate::raster::RasterizerScanline;
use crate::raster::FillingRule;
use crate::buffer::ViewMut;
use crate::gamma::GammaCorrector;
use crate::alphamask::AlphaMask;
use crate::alpha_cache::composite_alpha;
use crate::color::Rgba8;
use crate::paint::Paint;
use crate::math::lerp_u8;
use crate::math::multiply_u8;
use crate::math::scale_cover;
use crate::error::Result;

use crate::Render;

/// Render rasterized data using `ren`
pub fn render_scanlines<REN>(ras: &mut RasterizerScanline,
                             sl: &mut ScanlineU8,
                             ren: &mut REN) -> Result<()>
    where REN: Render
{
    if ras.rewind_scanlines(ren.rule())? {
        sl.reset( ras.min_x(), ras.max_x() );
        while ras.sweep_scanline(sl) {
            ren.render(sl);
        }
    }
    Ok(())
}

/// Call `f` with (x, y, cover) of every pixel of `sl` inside `width` x `height`
fn for_each_pixel<F>(sl: &ScanlineU8, width: usize, height: usize, mut f: F)
    where F: FnMut(usize, usize, u8)
{
    if sl.y < 0 || sl.y >= height as i64 {
        return;
    }
    let y = sl.y as usize;
    for (x, covers) in sl.spans() {
        log::trace!("RENDER SPAN: x,y,len {} {} {}", x, y, covers.len());
        for (i, &c) in covers.iter().enumerate() {
            let px = x + i as i64;
            if px < 0 {
                continue;
            }
            if px >= width as i64 {
                break;
            }
            f(px as usize, y, c);
        }
    }
}

/// Blend a color channel `s` with alpha `a` over `d` with alpha `da`
///
/// `oa` is the composited alpha. Colors are not premultiplied.
fn blend_channel(d: u8, da: u8, s: u8, a: u8, oa: u8) -> u8 {
    if da == 255 {
        return lerp_u8(d, s, a);
    }
    if oa == 0 {
        return 0;
    }
    let (d, da, s, a, oa) = (u32::from(d), u32::from(da), u32::from(s),
                             u32::from(a), u32::from(oa));
    let den = oa * 255;
    let num = s * a * 255 + d * da * (255 - a);
    ((num + den / 2) / den).min(255) as u8
}

/// Blend `color` with per channel alphas over the color word `dst`
///
/// `alpha` is the alpha of the composite, `alphas` those of red, green
/// and blue
fn blend_pix(dst: u32, color: Rgba8, alpha: u8, alphas: [u8; 3]) -> u32 {
    let d = Rgba8::from_argb(dst);
    let oa = composite_alpha(d.a, alpha);
    let a8 = (oa >> 24) as u8;
    let r = blend_channel(d.r, d.a, color.r, alphas[0], a8);
    let g = blend_channel(d.g, d.a, color.g, alphas[1], a8);
    let b = blend_channel(d.b, d.a, color.b, alphas[2], a8);
    oa | u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
}

/// Anti-aliased solid fill into a color view
///
///     use scanfill::{RasterizerScanline, ColorBuffer, ColorCompositor};
///     use scanfill::{Paint, Rgba8, GammaTable};
///
///     let gamma = GammaTable::power(1.0, 0.5, 2.0);
///     let mut buf = ColorBuffer::new(20, 20);
///     buf.clear(Rgba8::white().to_argb());
///     let mut ras = RasterizerScanline::new(20, 20);
///
///     let paint = Paint::new(Rgba8::new(255, 0, 0, 255)).opacity(0.5);
///     let mut ren = ColorCompositor::new(buf.view_mut(), paint).gamma(&gamma);
///     ras.fill_polygon(&[2.,2., 18.,2., 18.,18., 2.,18.], 4, 0, 0.0, 0.0, &mut ren).unwrap();
///     drop(ren);
///
///     let c = Rgba8::from_argb(buf.get(10, 10).unwrap());
///     assert_eq!(c, Rgba8::new(255, 128, 128, 255));
///
#[derive(Debug)]
pub struct ColorCompositor<'a> {
    view: ViewMut<'a, u32>,
    paint: Paint,
    gamma: Option<&'a dyn GammaCorrector>,
    mask: Option<AlphaMask<'a>>,
}

impl<'a> ColorCompositor<'a> {
    /// Create a new compositor drawing `paint` into `view`
    pub fn new(view: ViewMut<'a, u32>, paint: Paint) -> Self {
        Self { view, paint, gamma: None, mask: None }
    }
    /// Apply per channel gamma to coverage
    pub fn gamma(mut self, gamma: &'a dyn GammaCorrector) -> Self {
        self.gamma = Some(gamma);
        self
    }
    /// Attenuate coverage by an opacity mask aligned with the view
    pub fn opacity_mask(mut self, mask: AlphaMask<'a>) -> Self {
        self.mask = Some(mask);
        self
    }
    /// Set the paint used by following fills
    pub fn set_paint(&mut self, paint: Paint) {
        self.paint = paint;
    }
    pub fn paint(&self) -> Paint {
        self.paint
    }
    /// Destination view
    pub fn view(&mut self) -> ViewMut<'_, u32> {
        self.view.reborrow()
    }
}

impl<'a> Render for ColorCompositor<'a> {
    fn rule(&self) -> FillingRule {
        self.paint.filling_rule
    }
    fn render(&mut self, sl: &ScanlineU8) {
        let ColorCompositor { view, paint, gamma, mask } = self;
        let (w, h) = (view.width(), view.height());
        let color = paint.color;
        let opacity = paint.opacity;
        let alpha_of = |c: u8| multiply_u8(scale_cover(c, opacity) as u8, color.a);
        for_each_pixel(sl, w, h, |x, y, c| {
            let c = match mask {
                Some(m) => m.attenuate(x, y, c),
                None => c,
            };
            let alpha = alpha_of(c);
            let alphas = match gamma {
                Some(g) => {
                    let i = usize::from(c);
                    [alpha_of(g.lookup_table_red()[i]),
                     alpha_of(g.lookup_table_green()[i]),
                     alpha_of(g.lookup_table_blue()[i])]
                },
                None => [alpha; 3],
            };
            if alpha == 0 && alphas == [0; 3] {
                return;
            }
            if let Some(p) = view.get_mut(x, y) {
                *p = blend_pix(*p, color, alpha, alphas);
            }
        });
    }
}

/// Coverage writer into an 8-bit mask view
///
/// Pixels touched by the fill are overwritten with their coverage, all
/// others are left as is
///
///     use scanfill::{RasterizerScanline, MaskBuffer, MaskWriter, FillingRule};
///
///     let mut mask = MaskBuffer::new(10, 10);
///     let mut ras = RasterizerScanline::new(10, 10);
///     let mut ren = MaskWriter::new(mask.view_mut()).filling_rule(FillingRule::EvenOdd);
///     ras.fill_polygon(&[0.,0., 4.,0., 4.,4., 0.,4.], 4, 0, 0.5, 0.0, &mut ren).unwrap();
///     drop(ren);
///
///     assert_eq!(mask.get(0, 0), Some(128));
///     assert_eq!(mask.get(2, 2), Some(255));
///     assert_eq!(mask.get(4, 3), Some(128));
///     assert_eq!(mask.get(2, 4), Some(0));
///
#[derive(Debug)]
pub struct MaskWriter<'a> {
    view: ViewMut<'a, u8>,
    rule: FillingRule,
}

impl<'a> MaskWriter<'a> {
    /// Create a new writer using the rasterizer's rule
    pub fn new(view: ViewMut<'a, u8>) -> Self {
        Self { view, rule: FillingRule::Default }
    }
    /// Set the winding rule
    pub fn filling_rule(mut self, rule: FillingRule) -> Self {
        self.rule = rule;
        self
    }
}

impl<'a> Render for MaskWriter<'a> {
    fn rule(&self) -> FillingRule {
        self.rule
    }
    fn render(&mut self, sl: &ScanlineU8) {
        let view = &mut self.view;
        let (w, h) = (view.width(), view.height());
        for_each_pixel(sl, w, h, |x, y, c| {
            view.set(x, y, c);
        });
    }
}
