
extern crate scanfill;

use scanfill::{ALPHA_CACHE, ALPHA_CACHE_SIZE};
use scanfill::alpha_cache::composite_alpha;

#[test]
fn table_size() {
    assert_eq!(ALPHA_CACHE.len(), ALPHA_CACHE_SIZE);
    assert_eq!(ALPHA_CACHE_SIZE, 65536);
}

#[test]
fn boundary_values() {
    assert_eq!(ALPHA_CACHE[0], 0);
    assert_eq!(ALPHA_CACHE[255], 255 << 24);
    assert_eq!(ALPHA_CACHE[255 * 256], 255 << 24);
    assert_eq!(ALPHA_CACHE[65535], 255 << 24);
    for a in 0 .. 256u32 {
        assert_eq!(composite_alpha(0, a as u8), a << 24);
        assert_eq!(composite_alpha(a as u8, 0), a << 24);
    }
}

#[test]
fn only_top_byte_used() {
    assert!(ALPHA_CACHE.iter().all(|&v| v & 0x00ff_ffff == 0));
}

#[test]
fn symmetric() {
    for da in 0 .. 256usize {
        for sa in 0 .. 256usize {
            let a = ALPHA_CACHE[da * 256 + sa] >> 24;
            let b = ALPHA_CACHE[sa * 256 + da] >> 24;
            assert!((a as i64 - b as i64).abs() <= 1, "{} {} : {} {}", da, sa, a, b);
        }
    }
}
