use super::*;

fn gradient(w: u32, h: u32) -> Bitmap {
    let mut b = Bitmap::new(w, h);
    for y in 0..h {
        for x in 0..w {
            b.put_pixel(x, y, [(x * 10) as u8, (y * 10) as u8, 0, 255]);
        }
    }
    b
}

#[test]
fn nearest_clamps_out_of_range_coordinates() {
    let b = gradient(4, 3);
    assert_eq!(sample_nearest(&b, -100.0, -5.0), b.pixel(0, 0));
    assert_eq!(sample_nearest(&b, 1e9, 1e9), b.pixel(3, 2));
    assert_eq!(sample_nearest(&b, f64::NAN, f64::INFINITY), b.pixel(0, 2));
}

#[test]
fn bilinear_interpolates_between_neighbours() {
    let b = gradient(4, 3);
    assert_eq!(sample_bilinear(&b, 1.5, 0.0)[0], 15);
    assert_eq!(sample_bilinear(&b, 1.0, 1.5)[1], 15);
    assert_eq!(sample_bilinear(&b, 3.0, 2.0), b.pixel(3, 2));
}

#[test]
fn identity_remap_copies() {
    let src = gradient(5, 4);
    let mut dst = Bitmap::new(1, 1);
    remap(&src, &mut dst, Filter::Nearest, |x, y| (x, y));
    assert_eq!(dst, src);
    remap(&src, &mut dst, Filter::Bilinear, |x, y| (x, y));
    assert_eq!(dst, src);
}

#[test]
fn options_fall_back_on_missing_or_bad_values() {
    let p = serde_json::json!({ "a": 2.5, "b": "x", "c": "vertical", "d": "0.25" });
    assert_eq!(opt_f64(&p, &["a"], 1.0), 2.5);
    assert_eq!(opt_f64(&p, &["b"], 1.0), 1.0);
    assert_eq!(opt_f64(&p, &["missing"], 7.0), 7.0);
    assert_eq!(opt_f64(&p, &["missing", "a"], 7.0), 2.5);
    assert_eq!(opt_f64(&p, &["d"], 1.0), 0.25);
    assert_eq!(opt_str(&p, &["c"]), Some("vertical"));
    assert_eq!(opt_f64(&serde_json::Value::Null, &["a"], 3.0), 3.0);
}

#[test]
fn sized_remap_uses_requested_dimensions() {
    let src = gradient(4, 3);
    let mut dst = Bitmap::new(0, 0);
    remap_sized(&src, &mut dst, 2, 2, Filter::Nearest, |x, y| (x + 1.0, y));
    assert_eq!(dst.dimensions(), (2, 2));
    assert_eq!(dst.pixel(0, 1), src.pixel(1, 1));
}
