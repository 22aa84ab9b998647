//! Scanlines
//!
//! Resolved coverage of a single row, as runs of consecutive pixels

/// Run of covered pixels starting at `x`
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Span {
    /// First pixel
    pub x: i64,
    /// Number of pixels
    pub len: i64,
    /// Offset of the first coverage value in the scanline
    start: usize,
}

/// Coverage values of a row, one byte per pixel
#[derive(Debug,Default)]
pub struct ScanlineU8 {
    last_x: i64,
    spans: Vec<Span>,
    covers: Vec<u8>,
    /// Row of the scanline
    pub y: i64,
}

const LAST_X: i64 = 0x7FFF_FFF0;

impl ScanlineU8 {
    pub fn new() -> Self {
        Self { last_x: LAST_X, y: 0,
               spans: vec![], covers: vec![] }
    }
    /// Prepare for rows spanning `min_x ..= max_x`
    pub fn reset(&mut self, min_x: i64, max_x: i64) {
        self.reset_spans();
        if max_x >= min_x {
            let n = (max_x - min_x + 2) as usize;
            if self.covers.capacity() < n {
                self.covers.reserve(n);
            }
        }
    }
    /// Remove all spans
    pub fn reset_spans(&mut self) {
        self.last_x = LAST_X;
        self.spans.clear();
        self.covers.clear();
    }
    /// Set the row of the scanline
    pub fn finalize(&mut self, y: i64) {
        self.y = y;
    }
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }
    /// Spans as the first pixel and a coverage value per pixel
    pub fn spans(&self) -> impl Iterator<Item = (i64, &[u8])> + '_ {
        self.spans.iter()
            .map(move |s| (s.x, &self.covers[s.start .. s.start + s.len as usize]))
    }
    /// Add `len` pixels of coverage `cover` starting at `x`
    pub fn add_span(&mut self, x: i64, len: i64, cover: u8) {
        if len <= 0 {
            return;
        }
        let start = self.covers.len();
        self.covers.extend(std::iter::repeat(cover).take(len as usize));
        self.extend(x, len, start);
    }
    /// Add a single pixel of coverage `cover` at `x`
    pub fn add_cell(&mut self, x: i64, cover: u8) {
        let start = self.covers.len();
        self.covers.push(cover);
        self.extend(x, 1, start);
    }
    fn extend(&mut self, x: i64, len: i64, start: usize) {
        let adjacent = x == self.last_x + 1;
        match self.spans.last_mut() {
            Some(cur) if adjacent => cur.len += len,
            _ => self.spans.push(Span { x, len, start }),
        }
        self.last_x = x + len - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_runs_merge() {
        let mut sl = ScanlineU8::new();
        sl.add_cell(3, 10);
        sl.add_span(4, 3, 255);
        sl.add_cell(7, 20);
        sl.add_cell(10, 30);
        let spans : Vec<_> = sl.spans().collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], (3, &[10u8, 255, 255, 255, 20][..]));
        assert_eq!(spans[1], (10, &[30u8][..]));
        sl.reset_spans();
        assert_eq!(sl.num_spans(), 0);
    }
}
