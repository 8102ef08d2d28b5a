use hyperquad::geometry::hyperbolic_distance_polar;
use hyperquad::{Config, PolarCoord, Quadtree, QuadtreeBuilder};
use std::f64::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see splits)
    env_logger::init();

    println!("=== hyperquad - Getting Started ===\n");

    // === BUILDING A TREE ===
    println!("1. Building a Tree");
    println!("------------------");

    let mut tree = QuadtreeBuilder::new()
        .capacity(4)
        .hyperbolic_radius(6.0)
        .build()?;
    println!(
        "   Root covers the disk up to Euclidean radius {:.4}",
        tree.config().max_radius
    );

    let places = [
        ("north", PolarCoord::new(PI / 2.0, 0.6)),
        ("north-east", PolarCoord::new(PI / 4.0, 0.62)),
        ("east", PolarCoord::new(0.0, 0.6)),
        ("centre", PolarCoord::new(0.0, 0.05)),
        ("south", PolarCoord::new(1.5 * PI, 0.9)),
        ("far south", PolarCoord::new(1.5 * PI, 0.98)),
        ("west", PolarCoord::new(PI, 0.3)),
    ];
    for (name, coord) in places {
        tree.insert(name, coord)?;
    }
    println!("   Inserted {} elements", tree.len());
    println!("   {:?}\n", tree.stats());

    // === RADIUS QUERIES ===
    println!("2. Hyperbolic Radius Queries");
    println!("----------------------------");

    let query = PolarCoord::new(PI / 3.0, 0.6);
    for distance in [0.5, 1.5, 3.0] {
        let mut near = tree.close_elements(query, distance)?;
        near.sort_unstable();
        println!("   Within {:.1} of the query: {:?}", distance, near);
    }
    println!();

    // Near the rim, small Euclidean gaps are large hyperbolic distances
    let south = PolarCoord::new(1.5 * PI, 0.9);
    let far_south = PolarCoord::new(1.5 * PI, 0.98);
    println!(
        "   south -> far south: Euclidean {:.2}, hyperbolic {:.2}\n",
        far_south.r - south.r,
        hyperbolic_distance_polar(south.angle, south.r, far_south.angle, far_south.r)
    );

    // === CIRCLE QUERIES ===
    println!("3. Circle Queries");
    println!("-----------------");

    let mut circle = tree.elements_in_hyperbolic_circle(query, 1.5)?;
    circle.sort_unstable();
    println!("   Hyperbolic circle of radius 1.5: {:?}", circle);

    // === POINT LOCATION ===
    println!("\n4. Point Location");
    println!("-----------------");

    let leaf = tree.appropriate_leaf(query)?;
    println!(
        "   Query falls in leaf {} holding {} elements",
        leaf.region(),
        leaf.len()
    );

    // === CONFIGURATION ===
    println!("\n5. Configuration");
    println!("----------------");

    let config = Config::from_json(r#"{ "capacity": 64 }"#)?;
    let empty: Quadtree<u64> = Quadtree::new(config)?;
    println!("   Loaded config from JSON: {}", empty.config().to_json()?);

    // Invalid input is rejected instead of stored
    match tree.insert("outside", PolarCoord::new(0.0, 1.2)) {
        Ok(()) => println!("   Unexpectedly accepted a point outside the disk"),
        Err(e) => println!("   Rejected: {}", e),
    }

    println!("\n=== Done ===");
    Ok(())
}
