use super::*;

fn checker(w: u32, h: u32) -> Bitmap {
    let mut b = Bitmap::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let v = if (x / 4 + y / 4) % 2 == 0 { 255 } else { 0 };
            b.put_pixel(x, y, [v, 255 - v, 64, 255]);
        }
    }
    b
}

#[test]
fn output_matches_source_dimensions() {
    let src = checker(37, 21);
    let mut dst = Bitmap::new(3, 3);
    polar(&src, &mut dst, &PolarOptions::default());
    assert_eq!(dst.dimensions(), (37, 21));
}

#[test]
fn uniform_source_stays_uniform() {
    let src = Bitmap::filled(16, 12, [10, 20, 30, 255]);
    let mut dst = Bitmap::new(0, 0);
    let opts = PolarOptions {
        angle_offset: 0.3,
        zoom: 0.5,
        ..PolarOptions::default()
    };
    polar(&src, &mut dst, &opts);
    assert_eq!(dst, src);
}

#[test]
fn mirrored_strip_is_symmetric() {
    let src = checker(9, 5);
    let strip = mirrored_strip(&src);
    assert_eq!(strip.dimensions(), (18, 5));
    for y in 0..5 {
        for x in 0..9 {
            assert_eq!(strip.pixel(x, y), src.pixel(x, y));
            assert_eq!(strip.pixel(17 - x, y), src.pixel(x, y));
        }
    }
}

#[test]
fn center_samples_top_row() {
    let mut src = Bitmap::filled(20, 20, [0, 0, 0, 255]);
    for x in 0..20 {
        src.put_pixel(x, 0, [255, 255, 255, 255]);
    }
    let mut dst = Bitmap::new(0, 0);
    polar(&src, &mut dst, &PolarOptions::default());
    assert_eq!(dst.pixel(10, 10), [255, 255, 255, 255]);
}

#[test]
fn bad_zoom_and_center_do_not_panic() {
    let src = checker(8, 8);
    let mut dst = Bitmap::new(0, 0);
    let opts = PolarOptions {
        center_x: f64::NAN,
        center_y: 4.0,
        angle_offset: f64::INFINITY,
        zoom: 0.0,
    };
    polar(&src, &mut dst, &opts);
    assert_eq!(dst.dimensions(), (8, 8));
}

#[test]
fn params_use_defaults_for_missing_keys() {
    let o = PolarOptions::from_params(&serde_json::json!({ "zoom": 2.0, "centerX": 0.25 }));
    assert_eq!(o.zoom, 2.0);
    assert_eq!(o.center_x, 0.25);
    assert_eq!(o.center_y, 0.5);
    assert_eq!(o.angle_offset, 0.0);
}
