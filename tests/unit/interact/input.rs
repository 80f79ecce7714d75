use super::*;
use crate::foundation::core::Canvas;

fn field(points: &[(f64, f64)]) -> SiteField {
    let mut f = SiteField::with_seed(Canvas::new(400, 300).unwrap(), 1);
    f.set_sites(points.iter().map(|&(x, y)| Point::new(x, y)));
    f
}

fn two_sites() -> SiteField {
    field(&[(100.0, 150.0), (300.0, 150.0)])
}

#[test]
fn hover_tracks_closest_site_and_pill_segment() {
    let sites = two_sites();
    let mut i = Interaction::new();

    assert_eq!(
        i.pointer_move(Point::new(20.0, 20.0), &sites, false),
        InteractionEffect::Redraw
    );
    assert_eq!(
        i.phase(),
        PointerPhase::Hovering {
            cell: 0,
            segment: None
        }
    );
    assert_eq!(
        i.pointer_move(Point::new(21.0, 20.0), &sites, false),
        InteractionEffect::None
    );

    i.pointer_move(Point::new(60.0, 150.0), &sites, false);
    assert_eq!(
        i.phase(),
        PointerPhase::Hovering {
            cell: 0,
            segment: Some(PillSegment::Swap)
        }
    );
    i.pointer_move(Point::new(100.0, 150.0), &sites, false);
    assert_eq!(
        i.phase(),
        PointerPhase::Hovering {
            cell: 0,
            segment: Some(PillSegment::Move)
        }
    );
    i.pointer_move(Point::new(350.0, 40.0), &sites, false);
    assert_eq!(i.hovered_cell(), Some(1));
}

#[test]
fn pill_presses_act_on_the_hovered_cell() {
    let sites = two_sites();
    let mut i = Interaction::new();
    assert_eq!(
        i.pointer_down(Point::new(130.0, 150.0), &sites, false),
        InteractionEffect::ToggleLock { cell: 0 }
    );
    assert!(!i.is_dragging());
    assert_eq!(
        i.pointer_down(Point::new(60.0, 150.0), &sites, false),
        InteractionEffect::RequestColorPick { cell: 0 }
    );
    assert_eq!(
        i.pointer_down(Point::new(100.0, 150.0), &sites, false),
        InteractionEffect::DragStarted { site: 0 }
    );
    assert_eq!(i.dragging_site(), Some(0));
}

#[test]
fn drag_lifecycle_and_release_anywhere() {
    let sites = two_sites();
    let mut i = Interaction::new();
    assert_eq!(
        i.pointer_down(Point::new(350.0, 50.0), &sites, false),
        InteractionEffect::DragStarted { site: 1 }
    );
    assert_eq!(
        i.pointer_move(Point::new(250.0, 60.0), &sites, false),
        InteractionEffect::MoveSite {
            site: 1,
            to: Point::new(250.0, 60.0)
        }
    );
    assert_eq!(i.pointer_leave(), InteractionEffect::None);
    assert_eq!(i.dragging_site(), Some(1));

    assert_eq!(
        i.pointer_up(Point::new(-500.0, 9000.0), &sites, false),
        InteractionEffect::DragEnded { site: 1 }
    );
    assert!(!i.is_dragging());
    assert_eq!(i.pointer_up(Point::new(0.0, 0.0), &sites, false), InteractionEffect::None);
}

#[test]
fn leave_ends_hover() {
    let sites = two_sites();
    let mut i = Interaction::new();
    i.pointer_move(Point::new(20.0, 20.0), &sites, false);
    assert_eq!(i.pointer_leave(), InteractionEffect::Redraw);
    assert_eq!(i.phase(), PointerPhase::Idle);
    assert_eq!(i.pointer_leave(), InteractionEffect::None);
}

#[test]
fn suppression_keeps_hover_idle_but_allows_drag() {
    let sites = two_sites();
    let mut i = Interaction::new();
    i.pointer_move(Point::new(20.0, 20.0), &sites, false);
    assert_eq!(
        i.pointer_move(Point::new(25.0, 20.0), &sites, true),
        InteractionEffect::Redraw
    );
    assert_eq!(i.phase(), PointerPhase::Idle);

    // Over where the lock segment would be: no pill action, just a grab.
    assert_eq!(
        i.pointer_down(Point::new(130.0, 150.0), &sites, true),
        InteractionEffect::DragStarted { site: 0 }
    );
    i.pointer_up(Point::new(130.0, 150.0), &sites, true);
    assert_eq!(i.phase(), PointerPhase::Idle);
}

#[test]
fn pill_keeps_hover_over_neighbouring_cell() {
    let sites = field(&[(100.0, 150.0), (140.0, 150.0)]);
    let mut i = Interaction::new();
    i.pointer_move(Point::new(100.0, 100.0), &sites, false);
    assert_eq!(i.hovered_cell(), Some(0));

    i.pointer_move(Point::new(130.0, 150.0), &sites, false);
    assert_eq!(
        i.phase(),
        PointerPhase::Hovering {
            cell: 0,
            segment: Some(PillSegment::Lock)
        }
    );

    let mut fresh = Interaction::new();
    fresh.pointer_move(Point::new(130.0, 150.0), &sites, false);
    assert_eq!(
        fresh.phase(),
        PointerPhase::Hovering {
            cell: 1,
            segment: Some(PillSegment::Move)
        }
    );
}

#[test]
fn empty_field_stays_idle() {
    let sites = field(&[]);
    let mut i = Interaction::new();
    assert_eq!(
        i.pointer_move(Point::new(5.0, 5.0), &sites, false),
        InteractionEffect::None
    );
    assert_eq!(
        i.pointer_down(Point::new(5.0, 5.0), &sites, false),
        InteractionEffect::None
    );
}

#[test]
fn overlay_view_follows_phase() {
    let sites = two_sites();
    let mut colors = ColorState::new(2);
    colors.set_cell_color(0, "#ff0000", true);
    let mut i = Interaction::new();
    assert!(i.overlay_view(&colors).is_none());

    i.pointer_move(Point::new(20.0, 20.0), &sites, false);
    let v = i.overlay_view(&colors).unwrap();
    assert_eq!(v.cell, 0);
    assert!(v.show_pill);
    assert!(v.locked);
    assert_eq!((v.swatch.r, v.swatch.g, v.swatch.b), (255, 0, 0));

    i.pointer_down(Point::new(350.0, 50.0), &sites, false);
    let v = i.overlay_view(&colors).unwrap();
    assert_eq!(v.cell, 1);
    assert!(!v.show_pill);
    assert!(!v.locked);
}
