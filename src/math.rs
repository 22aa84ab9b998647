//! Fixed point helpers

/// Interpolate a value between two end points using fixed point math
///
/// See agg_color_rgba.h:454 of agg version 2.4
///
pub fn lerp_u8(p: u8, q: u8, a: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let v = if p > q { 1 } else { 0 };
    let (q,p,a) = (i32::from(q), i32::from(p), i32::from(a));
    let t0 : i32  = (q - p) * a + base_msb - v; // Signed multiplication
    let t1 : i32 = ((t0>>base_shift) + t0) >> base_shift;
    (p + t1) as u8
}

/// Multiply two u8 values using fixed point math
///
/// Computes `a * b / 255` with rounding, see agg_color_rgba.h:395
///
///     use scanfill::math::multiply_u8;
///
///     assert_eq!(multiply_u8(255, 255), 255);
///     assert_eq!(multiply_u8(255, 77), 77);
///     assert_eq!(multiply_u8(0, 200), 0);
///     assert_eq!(multiply_u8(128, 128), 64);
///
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a,b) = (u32::from(a), u32::from(b));
    let t : u32  = a * b + base_msb;
    let tt : u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}

/// Scale a coverage value by an opacity in [0,256]
pub fn scale_cover(cover: u8, opacity: u32) -> u32 {
    (u32::from(cover) * opacity) >> 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_end_points() {
        assert_eq!(lerp_u8(10, 200, 0), 10);
        assert_eq!(lerp_u8(10, 200, 255), 200);
        assert_eq!(lerp_u8(200, 10, 255), 10);
    }

    #[test]
    fn scale_full_opacity() {
        assert_eq!(scale_cover(255, 256), 255);
        assert_eq!(scale_cover(255, 0), 0);
        assert_eq!(scale_cover(200, 128), 100);
    }
}
