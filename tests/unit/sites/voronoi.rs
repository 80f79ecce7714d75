use super::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_sites(n: usize, w: f64, h: f64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h)))
        .collect()
}

#[test]
fn single_site_owns_whole_rect() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
    let cells = compute_cells(&[Point::new(10.0, 10.0)], bounds);
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].site, 0);
    assert!((cells[0].area() - 5000.0).abs() < 1e-9);
}

#[test]
fn two_sites_split_along_bisector() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let cells = compute_cells(&[Point::new(25.0, 50.0), Point::new(75.0, 50.0)], bounds);
    assert!((cells[0].area() - 5000.0).abs() < 1e-9);
    assert!((cells[1].area() - 5000.0).abs() < 1e-9);
    assert!(cells[0].contains(Point::new(10.0, 90.0)));
    assert!(!cells[0].contains(Point::new(90.0, 10.0)));
}

#[test]
fn cells_partition_the_rectangle() {
    for (n, seed) in [(3usize, 1u64), (12, 2), (40, 3), (64, 4)] {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let sites = random_sites(n, 800.0, 600.0, seed);
        let cells = compute_cells(&sites, bounds);
        assert_eq!(cells.len(), n);
        let total: f64 = cells.iter().map(Cell::area).sum();
        assert!((total - 480_000.0).abs() < 1e-6, "n={n} total={total}");
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(c.site, i);
            assert!(!c.is_empty());
        }
    }
}

#[test]
fn every_probe_lands_in_its_nearest_sites_cell() {
    let bounds = Rect::new(0.0, 0.0, 300.0, 200.0);
    let sites = random_sites(15, 300.0, 200.0, 11);
    let cells = compute_cells(&sites, bounds);
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..200 {
        let p = Point::new(rng.gen_range(0.0..300.0), rng.gen_range(0.0..200.0));
        let nearest = sites
            .iter()
            .enumerate()
            .min_by(|a, b| (*a.1 - p).hypot2().total_cmp(&(*b.1 - p).hypot2()))
            .map(|(i, _)| i)
            .unwrap();
        assert!(cells[nearest].contains(p));
    }
}

#[test]
fn output_is_bit_reproducible() {
    let bounds = Rect::new(0.0, 0.0, 640.0, 480.0);
    let sites = random_sites(25, 640.0, 480.0, 5);
    let a = compute_cells(&sites, bounds);
    let b = compute_cells(&sites, bounds);
    assert_eq!(a, b);
}

#[test]
fn duplicate_sites_do_not_overlap() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let p = Point::new(30.0, 30.0);
    let cells = compute_cells(&[p, Point::new(70.0, 70.0), p], bounds);
    assert_eq!(cells.len(), 3);
    assert!(!cells[0].is_empty());
    assert!(cells[2].is_empty());
    let total: f64 = cells.iter().map(Cell::area).sum();
    assert!((total - 10_000.0).abs() < 1e-9);
}

#[test]
fn sites_outside_bounds_still_partition() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let sites = [
        Point::new(50.0, 50.0),
        Point::new(500.0, 500.0),
        Point::new(-10.0, 20.0),
    ];
    let cells = compute_cells(&sites, bounds);
    assert!(cells[1].is_empty());
    let total: f64 = cells.iter().map(Cell::area).sum();
    assert!((total - 10_000.0).abs() < 1e-9);
}

#[test]
fn centroid_of_square_cell() {
    let bounds = Rect::new(0.0, 0.0, 40.0, 20.0);
    let cells = compute_cells(&[Point::new(5.0, 5.0)], bounds);
    let c = cells[0].centroid().unwrap();
    assert!((c.x - 20.0).abs() < 1e-9);
    assert!((c.y - 10.0).abs() < 1e-9);
}

#[test]
fn empty_site_list_yields_no_cells() {
    assert!(compute_cells(&[], Rect::new(0.0, 0.0, 10.0, 10.0)).is_empty());
}
