
extern crate scanfill;

use scanfill::{RasterizerScanline, ColorBuffer, ColorCompositor, Paint, Rgba8};

#[test]
fn t00_example() {
    let (w, h) = (320, 200);
    let mut buf = ColorBuffer::new(w, h);
    buf.clear(Rgba8::white().to_argb());

    let mut ras = RasterizerScanline::new(w, h);
    let paint = Paint::new(Rgba8::new(255, 0, 0, 255));
    let mut ren = ColorCompositor::new(buf.view_mut(), paint);

    let tri = [10.0, 10.0,  50.0, 190.0,  310.0, 10.0];
    ras.fill_polygon(&tri, 3, 0, 0.0, 0.0, &mut ren).unwrap();
    drop(ren);

    assert_eq!(buf.get(100, 40), Some(0xffff_0000));
    assert_eq!(buf.get(5, 5), Some(0xffff_ffff));
    assert_eq!(buf.get(300, 150), Some(0xffff_ffff));

    // Edge pixels are partially covered
    let edge = (0 .. w).map(|x| buf.get(x, 100).unwrap_or(0))
        .filter(|&c| c != 0xffff_ffff && c != 0xffff_0000)
        .count();
    assert!(edge >= 2);

    let file = std::env::temp_dir().join("scanfill_t00_example.png");
    buf.to_file(&file).unwrap();
    assert!(file.exists());
}
