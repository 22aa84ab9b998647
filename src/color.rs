//! Colors

/// Convert an f64 [0,1] component to a u8 [0,255] component
pub fn cu8(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

/// Color as Red, Green, Blue, and Alpha
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// Create new color from f64 components in [0,1]
    ///
    ///     use scanfill::Rgba8;
    ///
    ///     let c = Rgba8::from_f64(1.0, 0.5, -2.0, 1.0);
    ///     assert_eq!(c, Rgba8::new(255, 128, 0, 255));
    ///
    pub fn from_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(cu8(r), cu8(g), cu8(b), cu8(a))
    }
    /// Pack as a color word
    ///
    ///     use scanfill::Rgba8;
    ///
    ///     let c = Rgba8::new(0x11, 0x22, 0x33, 0x44);
    ///     assert_eq!(c.to_argb(), 0x4411_2233);
    ///     assert_eq!(Rgba8::from_argb(0x4411_2233), c);
    ///
    pub fn to_argb(&self) -> u32 {
        u32::from(self.a) << 24 | u32::from(self.r) << 16 |
        u32::from(self.g) << 8  | u32::from(self.b)
    }
    /// Unpack a color word, `alpha<<24 | red<<16 | green<<8 | blue`
    pub fn from_argb(v: u32) -> Self {
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8)
    }
}

impl From<u32> for Rgba8 {
    fn from(v: u32) -> Rgba8 {
        Rgba8::from_argb(v)
    }
}
impl From<Rgba8> for u32 {
    fn from(c: Rgba8) -> u32 {
        c.to_argb()
    }
}
