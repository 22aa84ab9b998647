//! Rendering buffer
//!
//! Pixels of a buffer are addressed as `start + row * stride + column`.
//! Views are windows into a buffer; they borrow the buffer for their whole
//! lifetime and may flip it vertically by negating the stride.

use crate::error::Error;
use crate::error::Result;

use std::path::Path;

/// Addressing of a rectangular block of pixels
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Layout {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Distance between rows in pixels, negative for bottom-up rows
    pub stride: isize,
    /// Index of pixel (0,0)
    pub start: usize,
}

impl Layout {
    /// Packed top-down rows
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, stride: width as isize, start: 0 }
    }
    /// Index of pixel (`x`,`y`), None outside of the layout
    ///
    ///     use scanfill::buffer::Layout;
    ///
    ///     let lay = Layout::new(4, 3);
    ///     assert_eq!(lay.index(1, 2), Some(9));
    ///     assert_eq!(lay.flipped().index(1, 2), Some(1));
    ///     assert_eq!(lay.index(4, 0), None);
    ///
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.start as isize + y as isize * self.stride + x as isize;
        if i < 0 {
            None
        } else {
            Some(i as usize)
        }
    }
    /// Layout of the `width` x `height` block at (`x`,`y`)
    pub fn sub(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Layout> {
        if x + width > self.width || y + height > self.height {
            return Err(Error::ViewBounds { x, y, width, height,
                                           parent_width: self.width,
                                           parent_height: self.height });
        }
        let start = if width == 0 || height == 0 {
            self.start
        } else {
            (self.start as isize + y as isize * self.stride + x as isize) as usize
        };
        Ok(Layout { width, height, stride: self.stride, start })
    }
    /// Same pixels with rows in reverse order
    pub fn flipped(&self) -> Layout {
        if self.height == 0 {
            return *self;
        }
        let last = self.start as isize + (self.height as isize - 1) * self.stride;
        Layout { width: self.width, height: self.height,
                 stride: -self.stride, start: last as usize }
    }
}

/// Rendering Buffer
///
/// Data is stored as row-major order (C-format), one `T` per pixel
#[derive(Debug,Default,Clone)]
pub struct RenderingBuffer<T> {
    data: Vec<T>,
    layout: Layout,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new(0, 0)
    }
}

/// Color buffer of `alpha<<24 | red<<16 | green<<8 | blue` words
pub type ColorBuffer = RenderingBuffer<u32>;
/// Mask buffer, one coverage or opacity byte per pixel
pub type MaskBuffer = RenderingBuffer<u8>;

impl<T> RenderingBuffer<T> where T: Copy + Default {
    /// Create a new buffer of width and height
    ///
    /// Data for the Image is allocated and zeroed
    pub fn new(width: usize, height: usize) -> Self {
        Self { data: vec![T::default(); width * height],
               layout: Layout::new(width, height) }
    }
    /// Image Width in pixels
    pub fn width(&self) -> usize {
        self.layout.width
    }
    /// Image Height in pixels
    pub fn height(&self) -> usize {
        self.layout.height
    }
    /// Underlying pixel data
    pub fn data(&self) -> &[T] {
        &self.data
    }
    /// Size of underlying Rendering Buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Pixel at (`x`,`y`)
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.layout.index(x, y).and_then(|i| self.data.get(i).copied())
    }
    /// Set all pixels to `v`
    pub fn clear(&mut self, v: T) {
        self.data.iter_mut().for_each(|p| *p = v);
    }
    /// Read-only view of the whole buffer
    pub fn view(&self) -> View<'_, T> {
        View { data: &self.data, layout: self.layout }
    }
    /// Writable view of the whole buffer
    pub fn view_mut(&mut self) -> ViewMut<'_, T> {
        ViewMut { data: &mut self.data, layout: self.layout }
    }
}

impl RenderingBuffer<u32> {
    /// Write the buffer as an RGBA image, format from the file extension
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let mut buf = Vec::with_capacity(self.data.len() * 4);
        for y in 0 .. self.height() {
            for x in 0 .. self.width() {
                let c = crate::Rgba8::from_argb(self.get(x,y).unwrap_or(0));
                buf.extend_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        image::save_buffer(filename, &buf, self.width() as u32, self.height() as u32,
                           image::ColorType::Rgba8)?;
        Ok(())
    }
}

impl RenderingBuffer<u8> {
    /// Write the buffer as a gray scale image
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let buf : Vec<u8> = (0 .. self.height())
            .flat_map(|y| (0 .. self.width()).map(move |x| (x,y)))
            .map(|(x,y)| self.get(x,y).unwrap_or(0))
            .collect();
        image::save_buffer(filename, &buf, self.width() as u32, self.height() as u32,
                           image::ColorType::L8)?;
        Ok(())
    }
}

use std::ops::Index;
use std::ops::IndexMut;

impl<T> Index<(usize,usize)> for RenderingBuffer<T> {
    type Output = T;
    fn index(&self, index: (usize, usize)) -> &T {
        let i = self.layout.index(index.0, index.1);
        assert!(i.is_some(), "request {:?} outside {}x{} :: index",
                index, self.layout.width, self.layout.height);
        &self.data[i.unwrap_or(0)]
    }
}
impl<T> IndexMut<(usize,usize)> for RenderingBuffer<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut T {
        let i = self.layout.index(index.0, index.1);
        assert!(i.is_some(), "request {:?} outside {}x{} :: index_mut",
                index, self.layout.width, self.layout.height);
        &mut self.data[i.unwrap_or(0)]
    }
}

/// Read-only window into a [RenderingBuffer]
#[derive(Debug,Copy,Clone)]
pub struct View<'a, T> {
    data: &'a [T],
    layout: Layout,
}

impl<'a, T: Copy> View<'a, T> {
    pub fn width(&self) -> usize {
        self.layout.width
    }
    pub fn height(&self) -> usize {
        self.layout.height
    }
    pub fn layout(&self) -> Layout {
        self.layout
    }
    /// Pixel at (`x`,`y`), None outside of the view
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.layout.index(x, y).and_then(|i| self.data.get(i).copied())
    }
    /// Window of `width` x `height` pixels at (`x`,`y`)
    pub fn sub_view(self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        Ok(View { data: self.data, layout: self.layout.sub(x, y, width, height)? })
    }
    /// View with rows in reverse order
    pub fn flipped(self) -> Self {
        View { data: self.data, layout: self.layout.flipped() }
    }
}

/// Writable window into a [RenderingBuffer]
///
///     use scanfill::ColorBuffer;
///
///     let mut buf = ColorBuffer::new(4, 4);
///     {
///         let mut view = buf.view_mut().sub_view(1, 1, 2, 2).unwrap().flipped();
///         view.set(0, 0, 7);
///     }
///     // Row 0 of the flipped view is the last row of the window
///     assert_eq!(buf.get(1, 2), Some(7));
///
#[derive(Debug)]
pub struct ViewMut<'a, T> {
    data: &'a mut [T],
    layout: Layout,
}

impl<'a, T: Copy> ViewMut<'a, T> {
    pub fn width(&self) -> usize {
        self.layout.width
    }
    pub fn height(&self) -> usize {
        self.layout.height
    }
    pub fn layout(&self) -> Layout {
        self.layout
    }
    /// Pixel at (`x`,`y`), None outside of the view
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.layout.index(x, y).and_then(|i| self.data.get(i).copied())
    }
    /// Mutable pixel at (`x`,`y`), None outside of the view
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        match self.layout.index(x, y) {
            Some(i) => self.data.get_mut(i),
            None => None,
        }
    }
    /// Set pixel at (`x`,`y`), returns false outside of the view
    pub fn set(&mut self, x: usize, y: usize, v: T) -> bool {
        match self.get_mut(x, y) {
            Some(p) => { *p = v; true },
            None => false,
        }
    }
    /// Set all pixels of the view to `v`
    pub fn fill(&mut self, v: T) {
        for y in 0 .. self.height() {
            for x in 0 .. self.width() {
                self.set(x, y, v);
            }
        }
    }
    /// Shorter lived view of the same window
    pub fn reborrow(&mut self) -> ViewMut<'_, T> {
        ViewMut { data: &mut *self.data, layout: self.layout }
    }
    /// Read-only copy of the view
    pub fn as_view(&self) -> View<'_, T> {
        View { data: &*self.data, layout: self.layout }
    }
    /// Window of `width` x `height` pixels at (`x`,`y`)
    pub fn sub_view(self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        let layout = self.layout.sub(x, y, width, height)?;
        Ok(ViewMut { data: self.data, layout })
    }
    /// View with rows in reverse order
    pub fn flipped(self) -> Self {
        let layout = self.layout.flipped();
        ViewMut { data: self.data, layout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_view_bounds() {
        let mut buf = RenderingBuffer::<u8>::new(5, 5);
        assert!(buf.view_mut().sub_view(3, 3, 2, 2).is_ok());
        match buf.view_mut().sub_view(3, 3, 3, 2) {
            Err(Error::ViewBounds { parent_width: 5, .. }) => {},
            r => panic!("unexpected {:?}", r.map(|v| v.layout())),
        }
    }

    #[test]
    fn flipped_addressing() {
        let mut buf = RenderingBuffer::<u8>::new(3, 3);
        {
            let mut v = buf.view_mut().flipped();
            v.set(2, 0, 9);
            assert!(!v.set(3, 0, 9));
            assert_eq!(v.as_view().get(2, 0), Some(9));
            assert_eq!(v.as_view().layout().stride, -3);
        }
        assert_eq!(buf[(2,2)], 9);
        let v = buf.view().flipped().sub_view(1, 0, 2, 1).unwrap();
        assert_eq!(v.get(1, 0), Some(9));
    }
}
