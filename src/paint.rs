//! Paint settings for a fill

use crate::color::Rgba8;
use crate::raster::FillingRule;

/// Color, opacity and winding rule of a fill
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Paint {
    /// Fill color
    pub color: Rgba8,
    /// Opacity in [0,256], 256 is fully opaque
    pub opacity: u32,
    /// Rule passed to the rasterizer
    pub filling_rule: FillingRule,
}

impl Default for Paint {
    fn default() -> Self {
        Paint::new(Rgba8::black())
    }
}

impl Paint {
    /// Opaque paint of `color` using the rasterizer's rule
    pub fn new(color: Rgba8) -> Self {
        Self { color, opacity: 256, filling_rule: FillingRule::Default }
    }
    /// Set the opacity from [0,1]
    ///
    ///     use scanfill::{Paint, Rgba8};
    ///
    ///     let p = Paint::new(Rgba8::white()).opacity(0.5);
    ///     assert_eq!(p.opacity, 128);
    ///     assert_eq!(p.opacity(7.0).opacity, 256);
    ///
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = (opacity * 256.0).round().max(0.0).min(256.0) as u32;
        self
    }
    /// Set the winding rule
    pub fn filling_rule(mut self, rule: FillingRule) -> Self {
        self.filling_rule = rule;
        self
    }
}
