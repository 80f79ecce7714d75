use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_rejects_mismatched_buffer() {
    assert!(blur_rgba8(&[0u8; 7], 1, 2, 1, 1.0).is_err());
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn zero_amount_leaves_bitmap_untouched() {
    let mut b = Bitmap::filled(4, 4, [1, 2, 3, 255]);
    b.put_pixel(0, 0, [200, 0, 0, 255]);
    let before = b.clone();
    blur_in_place(&mut b, 0.0, BlurKind::Gaussian);
    blur_in_place(&mut b, f64::NAN, BlurKind::Box);
    assert_eq!(b, before);
}

#[test]
fn padded_gaussian_keeps_edges_bright() {
    let mut b = Bitmap::filled(16, 12, [240, 240, 240, 255]);
    blur_in_place(&mut b, 3.0, BlurKind::Gaussian);
    assert_eq!(b.dimensions(), (16, 12));
    for (x, y) in [(0, 0), (15, 0), (0, 11), (15, 11), (8, 0)] {
        assert_eq!(b.pixel(x, y), [240, 240, 240, 255]);
    }
}

#[test]
fn both_strategies_soften_a_hard_edge() {
    for kind in [BlurKind::Gaussian, BlurKind::Box] {
        let mut b = Bitmap::filled(20, 4, [0, 0, 0, 255]);
        for y in 0..4 {
            for x in 10..20 {
                b.put_pixel(x, y, [255, 255, 255, 255]);
            }
        }
        blur_in_place(&mut b, 4.0, kind);
        let left = b.pixel(9, 2)[0];
        let right = b.pixel(10, 2)[0];
        assert!(left > 0 && left < 255, "{kind:?} left={left}");
        assert!(right > 0 && right < 255, "{kind:?} right={right}");
        assert_eq!(b.pixel(0, 0)[3], 255);
    }
}

#[test]
fn padding_replicates_border_pixels() {
    let mut b = Bitmap::new(2, 1);
    b.put_pixel(0, 0, [1, 1, 1, 255]);
    b.put_pixel(1, 0, [9, 9, 9, 255]);
    let p = pad_edge_extended(&b, 2);
    assert_eq!(p.dimensions(), (6, 5));
    assert_eq!(p.pixel(0, 0), [1, 1, 1, 255]);
    assert_eq!(p.pixel(5, 4), [9, 9, 9, 255]);
    assert_eq!(crop(&p, 2, 2, 1), b);
}

#[test]
fn oversized_amount_is_clamped_to_limit() {
    let mut src = Bitmap::filled(6, 4, [0, 0, 0, 255]);
    src.put_pixel(2, 2, [255, 255, 255, 255]);
    for kind in [BlurKind::Gaussian, BlurKind::Box] {
        let mut huge = src.clone();
        blur_in_place(&mut huge, 1e9, kind);
        let mut capped = src.clone();
        blur_in_place(&mut capped, BLUR_LIMITS.max, kind);
        assert_eq!(huge.dimensions(), (6, 4));
        assert_eq!(huge, capped);
    }
}
