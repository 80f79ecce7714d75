use super::*;

fn base() -> Vec<Color> {
    vec![Color::from_hsl(10.0, 80.0, 50.0), Color::from_hsl(200.0, 60.0, 40.0)]
}

#[test]
fn inactive_animator_yields_nothing() {
    let mut a = HueAnimator::new();
    assert!(!a.is_active());
    assert!(a.colors_at(1.0).is_none());
    assert!(!a.stop());
}

#[test]
fn rotates_from_snapshot_by_elapsed_time() {
    let mut a = HueAnimator::new();
    a.start(base(), 2.0, 30.0, HueDirection::Forward);
    assert!(a.is_active());

    let c = a.colors_at(3.0).unwrap();
    assert!((c[0].h() - 40.0).abs() < 1e-9);
    assert!((c[1].h() - 230.0).abs() < 1e-9);
    assert_eq!(c[0].s(), 80.0);
    assert_eq!(c[1].l(), 40.0);

    // Computed from the snapshot every time, not accumulated.
    let again = a.colors_at(3.0).unwrap();
    assert_eq!(again, c);
}

#[test]
fn reverse_direction_wraps_below_zero() {
    let mut a = HueAnimator::new();
    a.start(base(), 0.0, 20.0, HueDirection::Reverse);
    let c = a.colors_at(1.0).unwrap();
    assert!((c[0].h() - 350.0).abs() < 1e-9);
}

#[test]
fn time_before_start_is_clamped() {
    let mut a = HueAnimator::new();
    a.start(base(), 5.0, 90.0, HueDirection::Forward);
    assert_eq!(a.offset_at(1.0), Some(0.0));
}

#[test]
fn stop_is_idempotent() {
    let mut a = HueAnimator::new();
    a.start(base(), 0.0, f64::NAN, HueDirection::Forward);
    assert!(a.stop());
    assert!(!a.stop());
    assert!(a.base_colors().is_none());
}

#[test]
fn rebase_keeps_clock() {
    let mut a = HueAnimator::new();
    a.rebase(base());
    assert!(!a.is_active());

    a.start(base(), 0.0, 10.0, HueDirection::Forward);
    a.rebase(vec![Color::from_hsl(100.0, 50.0, 50.0)]);
    let c = a.colors_at(2.0).unwrap();
    assert_eq!(c.len(), 1);
    assert!((c[0].h() - 120.0).abs() < 1e-9);
}
