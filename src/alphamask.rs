//! Opacity Mask
//!
//! An 8-bit buffer attenuating coverage before it is composited

use crate::buffer::View;
use crate::math::multiply_u8;

/// Per pixel opacity applied on top of coverage
#[derive(Debug,Copy,Clone)]
pub struct AlphaMask<'a> {
    mask: View<'a, u8>,
}

impl<'a> AlphaMask<'a> {
    /// Create a new mask from a view with the same origin as the target
    pub fn new(mask: View<'a, u8>) -> Self {
        Self { mask }
    }
    /// Opacity at (`x`,`y`); zero outside of the mask
    pub fn opacity(&self, x: usize, y: usize) -> u8 {
        self.mask.get(x, y).unwrap_or(0)
    }
    /// Attenuate `cover` by the opacity at (`x`,`y`)
    ///
    ///     use scanfill::{MaskBuffer, AlphaMask};
    ///
    ///     let mut m = MaskBuffer::new(2, 1);
    ///     m[(0,0)] = 255;
    ///     m[(1,0)] = 128;
    ///     let mask = AlphaMask::new(m.view());
    ///     assert_eq!(mask.attenuate(0, 0, 200), 200);
    ///     assert_eq!(mask.attenuate(1, 0, 255), 128);
    ///     assert_eq!(mask.attenuate(5, 0, 255), 0);
    ///
    pub fn attenuate(&self, x: usize, y: usize, cover: u8) -> u8 {
        multiply_u8(cover, self.opacity(x, y))
    }
}
