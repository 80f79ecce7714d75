use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let src = [255, 0, 0, 255];
    assert_eq!(over([0, 0, 0, 255], src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn half_white_over_black() {
    let out = over([0, 0, 0, 255], [128, 128, 128, 128]);
    assert_eq!(out, [128, 128, 128, 255]);
}

#[test]
fn premultiply_round_trips_opaque_and_clear() {
    assert_eq!(premultiply([12, 34, 56, 255]), [12, 34, 56, 255]);
    assert_eq!(unpremultiply([12, 34, 56, 255]), [12, 34, 56, 255]);
    assert_eq!(unpremultiply([0, 0, 0, 0]), [0, 0, 0, 0]);
    let p = premultiply([200, 100, 50, 128]);
    let back = unpremultiply(p);
    for c in 0..3 {
        assert!((i16::from(back[c]) - [200i16, 100, 50][c]).abs() <= 2);
    }
}

#[test]
fn straight_composite_skips_transparent_layer_pixels() {
    let mut dst = vec![10, 20, 30, 255, 40, 50, 60, 255];
    let src = vec![0, 0, 0, 0, 255, 255, 255, 255];
    over_straight_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255, 255, 255, 255, 255]);
}

#[test]
fn length_mismatch_is_an_error() {
    let mut dst = vec![0u8; 8];
    assert!(over_straight_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(unpremultiply_into(&mut dst, &[0u8; 12]).is_err());
}
