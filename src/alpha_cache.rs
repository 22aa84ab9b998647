//! Alpha compositing table
//!
//! Source-over alpha for every pair of (existing, incoming) 8-bit alpha
//! values, already shifted into the top byte of a color word. The table is
//! computed at compile time.

/// Number of entries, 256 x 256
pub const ALPHA_CACHE_SIZE : usize = 256 * 256;

/// `ALPHA_CACHE[existing * 256 + incoming]` is the composited alpha `<< 24`
pub static ALPHA_CACHE : [u32; ALPHA_CACHE_SIZE] = build_alpha_cache();

const fn build_alpha_cache() -> [u32; ALPHA_CACHE_SIZE] {
    let mut table = [0u32; ALPHA_CACHE_SIZE];
    let mut da = 0;
    while da < 256 {
        let mut sa = 0;
        while sa < 256 {
            // sa + da * (1 - sa)
            let a = sa + (da * (255 - sa) + 127) / 255;
            table[da * 256 + sa] = (a as u32) << 24;
            sa += 1;
        }
        da += 1;
    }
    table
}

/// Composited alpha of `incoming` over `existing`, in the top byte
///
///     use scanfill::alpha_cache::composite_alpha;
///
///     assert_eq!(composite_alpha(255, 255), 255 << 24);
///     assert_eq!(composite_alpha(0, 77), 77 << 24);
///     assert_eq!(composite_alpha(255, 3), 255 << 24);
///
#[inline]
pub fn composite_alpha(existing: u8, incoming: u8) -> u32 {
    ALPHA_CACHE[usize::from(existing) << 8 | usize::from(incoming)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(ALPHA_CACHE[255*256+255], 255 << 24);
        for b in 0..256 {
            assert_eq!(ALPHA_CACHE[b], (b as u32) << 24);
            assert_eq!(ALPHA_CACHE[255*256+b], 255 << 24);
        }
    }

    #[test]
    fn monotonic_in_both_alphas() {
        for da in 0..256 {
            for sa in 1..256 {
                assert!(ALPHA_CACHE[da*256+sa] >= ALPHA_CACHE[da*256+sa-1]);
                assert!(ALPHA_CACHE[da*256+sa] >= (sa as u32) << 24);
            }
        }
    }

    #[test]
    fn half_over_half() {
        // 128 + 128 * 127 / 255
        assert_eq!(ALPHA_CACHE[128*256+128] >> 24, 192);
    }
}
