//! Builds a random hyperbolic graph: points are sampled from a hyperbolic
//! disk and every pair closer than the disk radius is joined by an edge.
//! The neighbourhood of each point comes from a single radius query.

use hyperquad::geometry::hyperbolic_radius_to_euclidean;
use hyperquad::{PolarCoord, QuadtreeBuilder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;
use std::time::Instant;

const NODES: usize = 20_000;
const DISK_RADIUS: f64 = 12.0;
/// Controls how strongly points concentrate towards the rim.
const ALPHA: f64 = 0.75;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let coords: Vec<PolarCoord> = (0..NODES)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let u: f64 = rng.gen_range(0.0..1.0);
            let native_r = (1.0 + ((ALPHA * DISK_RADIUS).cosh() - 1.0) * u).acosh() / ALPHA;
            PolarCoord::new(angle, hyperbolic_radius_to_euclidean(native_r))
        })
        .collect();

    let start = Instant::now();
    let mut tree = QuadtreeBuilder::new()
        .capacity(32)
        .hyperbolic_radius(DISK_RADIUS + 0.5)
        .build()?;
    tree.extend(coords.iter().copied().enumerate())?;
    println!("Indexed {} points in {:?}", tree.len(), start.elapsed());
    println!("{:?}", tree.stats());

    let start = Instant::now();
    let mut edges = 0usize;
    let mut max_degree = 0usize;
    for (id, coord) in coords.iter().enumerate() {
        let neighbours = tree.close_elements(*coord, DISK_RADIUS)?;
        // the point itself is at distance zero
        let degree = neighbours.iter().filter(|&&&other| other != id).count();
        edges += degree;
        max_degree = max_degree.max(degree);
    }
    edges /= 2;

    println!("Generated {} edges in {:?}", edges, start.elapsed());
    println!(
        "Average degree {:.2}, maximum degree {}",
        2.0 * edges as f64 / NODES as f64,
        max_degree
    );
    Ok(())
}
