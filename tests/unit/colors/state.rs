use super::*;

fn palette(hues: &[f64]) -> Vec<Color> {
    hues.iter().map(|&h| Color::from_hsl(h, 80.0, 50.0)).collect()
}

fn state() -> ColorState {
    let mut s = ColorState::new(4);
    s.regenerate(palette(&[0.0, 90.0, 180.0, 270.0]));
    s
}

#[test]
fn resolution_order_is_lock_override_palette() {
    let mut s = state();
    let base = s.get_cell_color(1);

    assert!(s.set_cell_color(1, "#112233", false));
    assert_eq!(s.get_cell_color(1).hex(), "#112233");

    assert!(s.set_cell_color(1, "#445566", true));
    assert_eq!(s.get_cell_color(1).hex(), "#445566");

    // Override untouched by the lock write.
    s.locks.remove(&1);
    assert_eq!(s.get_cell_color(1).hex(), "#112233");

    assert!(s.unlock_cell_color(1));
    assert_eq!(s.get_cell_color(1), base);
}

#[test]
fn palette_lookup_wraps_and_falls_back_to_gray() {
    let mut s = ColorState::new(6);
    assert_eq!(s.get_cell_color(0), Color::neutral());
    s.regenerate(palette(&[0.0, 120.0]));
    assert_eq!(s.get_cell_color(5), s.palette()[1]);
}

#[test]
fn lock_freezes_current_effective_color() {
    let mut s = state();
    s.set_cell_color(2, "#abcdef", false);
    assert!(s.lock_cell_color(2));
    assert!(s.is_cell_color_locked(2));
    assert!(!s.overrides.contains_key(&2));

    s.regenerate(palette(&[10.0, 20.0, 30.0, 40.0]));
    assert_eq!(s.get_cell_color(2).hex(), "#abcdef");
}

#[test]
fn regenerate_clears_overrides_but_keeps_locks() {
    let mut s = state();
    s.set_cell_color(0, "#000001", false);
    s.lock_cell_color(3);
    let locked = s.get_cell_color(3);

    let fresh = palette(&[5.0, 15.0, 25.0, 35.0]);
    s.regenerate(fresh.clone());
    assert_eq!(s.get_cell_color(0), fresh[0]);
    assert_eq!(s.get_cell_color(3), locked);
}

#[test]
fn set_palette_keeps_overrides() {
    let mut s = state();
    s.set_cell_color(0, "#000001", false);
    s.set_palette(palette(&[5.0, 15.0, 25.0, 35.0]));
    assert_eq!(s.get_cell_color(0).hex(), "#000001");
}

#[test]
fn out_of_range_mutations_are_noops() {
    let mut s = state();
    assert!(!s.set_cell_color(4, "#ffffff", true));
    assert!(!s.lock_cell_color(99));
    assert!(!s.unlock_cell_color(4));
    assert!(!s.is_cell_color_locked(4));
    assert_eq!(s.locked_indices().count(), 0);
}

#[test]
fn invalid_hex_is_ignored() {
    let mut s = state();
    let before = s.get_cell_color(0);
    assert!(!s.set_cell_color(0, "not-a-color", false));
    assert_eq!(s.get_cell_color(0), before);
}

#[test]
fn resolved_colors_cover_every_cell() {
    let mut s = state();
    s.lock_cell_color(1);
    let all = s.resolved_colors();
    assert_eq!(all.len(), 4);
    assert_eq!(all[1], s.get_cell_color(1));
}
