
extern crate scanfill;

use scanfill::{RasterizerScanline, MaskBuffer, MaskWriter};

fn shoelace(pts: &[f64]) -> f64 {
    let n = pts.len() / 2;
    let mut a = 0.0;
    for i in 0 .. n {
        let j = (i + 1) % n;
        a += pts[2*i] * pts[2*j+1] - pts[2*j] * pts[2*i+1];
    }
    (a / 2.0).abs()
}

fn coverage(w: usize, h: usize, pts: &[f64]) -> (MaskBuffer, f64) {
    let mut mask = MaskBuffer::new(w, h);
    let mut ras = RasterizerScanline::new(w, h);
    {
        let mut ren = MaskWriter::new(mask.view_mut());
        ras.fill_polygon(pts, pts.len() / 2, 0, 0.0, 0.0, &mut ren).unwrap();
    }
    let sum = mask.data().iter().map(|&c| f64::from(c)).sum::<f64>() / 255.0;
    (mask, sum)
}

#[test]
fn pixel_aligned_rectangle() {
    let pts = [10.0, 5.0,  30.0, 5.0,  30.0, 25.0,  10.0, 25.0];
    let (mask, _) = coverage(40, 40, &pts);
    let full = mask.data().iter().filter(|&&c| c == 255).count();
    let partial = mask.data().iter().filter(|&&c| c != 0 && c != 255).count();
    assert_eq!(full, 400);
    assert_eq!(partial, 0);
    assert_eq!(mask.get(10, 5), Some(255));
    assert_eq!(mask.get(29, 24), Some(255));
    assert_eq!(mask.get(30, 24), Some(0));
    assert_eq!(mask.get(29, 25), Some(0));
}

#[test]
fn convex_polygons_conserve_area() {
    let polys : Vec<Vec<f64>> = vec![
        vec![10.3, 5.7,  80.2, 20.1,  30.5, 70.9],
        vec![20.25, 20.75,  60.5, 22.0,  75.1, 50.3,  55.9, 78.4,  18.6, 60.0],
        vec![40.0, 2.5,  41.0, 2.5,  41.0, 97.5,  40.0, 97.5],
        vec![3.1, 50.2,  96.7, 49.1,  96.9, 51.3],
    ];
    for pts in polys.iter() {
        let area = shoelace(pts);
        let (_, sum) = coverage(100, 100, pts);
        let tol = 2.0 + area * 0.005;
        assert!((sum - area).abs() <= tol,
                "area {} coverage {} tolerance {}", area, sum, tol);
    }
}

#[test]
fn orientation_does_not_matter() {
    let cw  = [10.5, 10.5,  60.2, 15.0,  40.0, 55.7];
    let ccw = [40.0, 55.7,  60.2, 15.0,  10.5, 10.5];
    let (a, sa) = coverage(70, 70, &cw);
    let (b, sb) = coverage(70, 70, &ccw);
    assert!((sa - sb).abs() < 1.0, "{} {}", sa, sb);
    assert_eq!(a.get(35, 25), Some(255));
    assert_eq!(b.get(35, 25), Some(255));
}
