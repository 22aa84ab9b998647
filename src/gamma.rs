//! Gamma correction of coverage values

/// Supplies per channel lookup tables applied to coverage
pub trait GammaCorrector: std::fmt::Debug {
    fn lookup_table_red(&self) -> &[u8; 256];
    fn lookup_table_green(&self) -> &[u8; 256];
    fn lookup_table_blue(&self) -> &[u8; 256];
}

/// Red, green and blue gamma lookup tables
#[derive(Clone)]
pub struct GammaTable {
    red: [u8; 256],
    green: [u8; 256],
    blue: [u8; 256],
}

impl std::fmt::Debug for GammaTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("GammaTable")
            .field("red", &&self.red[..])
            .field("green", &&self.green[..])
            .field("blue", &&self.blue[..])
            .finish()
    }
}

fn table<F>(gfunc: F) -> [u8; 256]
    where F: Fn(f64) -> f64
{
    let aa_mask = 255.0;
    let mut t = [0u8; 256];
    for (i, v) in t.iter_mut().enumerate() {
        let g = gfunc(i as f64 / aa_mask).max(0.0).min(1.0);
        *v = (g * aa_mask).round() as u8;
    }
    t
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::linear()
    }
}

impl GammaTable {
    /// Identity tables
    pub fn linear() -> Self {
        Self::from_fn(|v| v)
    }
    /// Same function on all channels
    ///
    /// `gfunc` maps coverage in [0,1] to [0,1]
    pub fn from_fn<F>(gfunc: F) -> Self
        where F: Fn(f64) -> f64
    {
        let t = table(gfunc);
        Self { red: t, green: t, blue: t }
    }
    /// Power function `v^gamma` per channel
    ///
    ///     use scanfill::{GammaTable, GammaCorrector};
    ///
    ///     let g = GammaTable::power(1.0, 2.0, 0.5);
    ///     assert_eq!(g.lookup_table_red()[128], 128);
    ///     assert_eq!(g.lookup_table_green()[255], 255);
    ///     assert!(g.lookup_table_green()[128] < 128);
    ///     assert!(g.lookup_table_blue()[128] > 128);
    ///
    pub fn power(red: f64, green: f64, blue: f64) -> Self {
        Self { red:   table(|v| v.powf(red)),
               green: table(|v| v.powf(green)),
               blue:  table(|v| v.powf(blue)),
        }
    }
}

impl GammaCorrector for GammaTable {
    fn lookup_table_red(&self) -> &[u8; 256] {
        &self.red
    }
    fn lookup_table_green(&self) -> &[u8; 256] {
        &self.green
    }
    fn lookup_table_blue(&self) -> &[u8; 256] {
        &self.blue
    }
}
