//! Spatial layout - force-directed placement mapped onto a canvas
//!
//! Worlds are laid out with a Fruchterman-Reingold spring simulation over the
//! weighted sector graph, rescaled into the canvas inside a margin, and then
//! distant/far worlds are pushed out along their edge to the canvas border
//! where the renderer draws them as pointers.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::f32::consts::TAU;

use crate::core::config::LayoutConfig;
use crate::core::error::GenerationError;
use crate::core::types::WorldId;
use crate::sector::graph::Sector;

/// Closest two positions are treated as being, to keep forces finite
const MIN_DISTANCE: f32 = 0.01;

/// Spring layout over `n` nodes with weighted edges `(from, to, weight)`
///
/// Initial positions come from `rng`, so a seeded RNG reproduces the layout.
/// The result is centered on the origin.
pub fn spring_layout(
    n: usize,
    edges: &[(usize, usize, f32)],
    iterations: u32,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec2> {
    let mut positions: Vec<Vec2> = (0..n)
        .map(|_| Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()))
        .collect();

    if n <= 1 {
        return vec![Vec2::ZERO; n];
    }

    // Optimal distance for n nodes in a unit square
    let k = (1.0 / n as f32).sqrt();
    let mut temperature = 0.1_f32;
    let cooling = temperature / (iterations as f32 + 1.0);

    for _ in 0..iterations {
        let mut disp = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = positions[i] - positions[j];
                let distance = delta.length().max(MIN_DISTANCE);
                let direction = delta / distance;
                let force = k * k / distance;
                disp[i] += direction * force;
                disp[j] -= direction * force;
            }
        }

        for &(from, to, weight) in edges {
            if from >= n || to >= n || from == to {
                continue;
            }
            let delta = positions[from] - positions[to];
            let distance = delta.length().max(MIN_DISTANCE);
            let direction = delta / distance;
            let force = weight * distance * distance / k;
            disp[from] -= direction * force;
            disp[to] += direction * force;
        }

        for (position, d) in positions.iter_mut().zip(&disp) {
            let length = d.length();
            if length > 0.0 {
                *position += *d / length * length.min(temperature);
            }
        }

        temperature -= cooling;
    }

    let center = positions.iter().copied().sum::<Vec2>() / n as f32;
    positions.into_iter().map(|p| p - center).collect()
}

/// Stretch positions to fill the canvas inside the margin
///
/// An axis with no extent (a single world, or worlds in a line) is centered.
pub fn to_canvas(positions: &[Vec2], config: &LayoutConfig) -> Vec<Vec2> {
    if positions.is_empty() {
        return Vec::new();
    }

    let min = positions.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
    let max = positions.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
    let extent = max - min;
    let area = Vec2::new(config.width, config.height) - Vec2::splat(config.margin * 2.0);

    let unit = |value: f32, lo: f32, span: f32| {
        if span > f32::EPSILON {
            (value - lo) / span
        } else {
            0.5
        }
    };

    positions
        .iter()
        .map(|p| {
            let u = Vec2::new(unit(p.x, min.x, extent.x), unit(p.y, min.y, extent.y));
            Vec2::splat(config.margin) + u * area
        })
        .collect()
}

/// Walk from `origin` along `direction` until the canvas border
pub fn project_to_boundary(origin: Vec2, direction: Vec2, width: f32, height: f32) -> Vec2 {
    let mut t = f32::INFINITY;

    if direction.x > 0.0 {
        t = t.min((width - origin.x) / direction.x);
    } else if direction.x < 0.0 {
        t = t.min(-origin.x / direction.x);
    }
    if direction.y > 0.0 {
        t = t.min((height - origin.y) / direction.y);
    } else if direction.y < 0.0 {
        t = t.min(-origin.y / direction.y);
    }

    if !t.is_finite() {
        return origin;
    }
    origin + direction * t.max(0.0)
}

/// Assign canvas coordinates to every world in the sector
pub fn apply(
    sector: &mut Sector,
    config: &LayoutConfig,
    rng: &mut ChaCha8Rng,
) -> Result<(), GenerationError> {
    let edges: Vec<(usize, usize, f32)> = sector
        .edges
        .iter()
        .map(|e| (e.a.index(), e.b.index(), e.weight))
        .collect();

    let raw = spring_layout(sector.worlds.len(), &edges, config.iterations, rng);
    let mut placed = to_canvas(&raw, config);

    let remote: Vec<WorldId> = sector.remote_worlds().map(|w| w.id).collect();
    for id in remote {
        let neighbors = sector.neighbors(id);
        let [anchor] = neighbors.as_slice() else {
            return Err(GenerationError::Layout(format!(
                "remote world {} has {} edges, expected 1",
                id.0,
                neighbors.len()
            )));
        };

        let origin = placed[anchor.index()];
        let mut direction = placed[id.index()] - origin;
        if direction.length_squared() < f32::EPSILON {
            let angle = rng.gen_range(0.0..TAU);
            direction = Vec2::new(angle.cos(), angle.sin());
        }
        placed[id.index()] =
            project_to_boundary(origin, direction.normalize(), config.width, config.height);
    }

    for (world, position) in sector.worlds.iter_mut().zip(placed) {
        if !position.is_finite() {
            return Err(GenerationError::Layout(format!(
                "world {} landed at a non-finite position",
                world.name
            )));
        }
        world.coordinates = Some(position);
    }

    tracing::debug!(
        "Laid out {} worlds on a {}x{} canvas",
        sector.worlds.len(),
        config.width,
        config.height
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_empty_and_single() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(spring_layout(0, &[], 150, &mut rng).is_empty());
        assert_eq!(spring_layout(1, &[], 150, &mut rng), vec![Vec2::ZERO]);

        let placed = to_canvas(&[Vec2::ZERO], &LayoutConfig::default());
        assert_eq!(placed, vec![Vec2::new(500.0, 500.0)]);
    }

    #[test]
    fn test_layout_is_seeded() {
        let edges = [(0, 1, 3.0), (0, 2, 2.0), (1, 3, 1.0)];
        let a = spring_layout(4, &edges, 150, &mut ChaCha8Rng::seed_from_u64(8));
        let b = spring_layout(4, &edges, 150, &mut ChaCha8Rng::seed_from_u64(8));
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_is_centered() {
        let edges = [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)];
        let positions = spring_layout(4, &edges, 150, &mut ChaCha8Rng::seed_from_u64(2));
        let center = positions.iter().copied().sum::<Vec2>() / 4.0;
        assert!(center.length() < 1e-4);
    }

    #[test]
    fn test_connected_nodes_end_up_closer() {
        // 0-1 strongly bound, 2 unconnected
        let edges = [(0, 1, 3.0)];
        let positions = spring_layout(3, &edges, 150, &mut ChaCha8Rng::seed_from_u64(4));
        let bound = positions[0].distance(positions[1]);
        let loose = positions[0].distance(positions[2]).min(positions[1].distance(positions[2]));
        assert!(bound < loose);
    }

    #[test]
    fn test_to_canvas_respects_margin() {
        let config = LayoutConfig::default();
        let positions = [Vec2::new(-1.0, 2.0), Vec2::new(3.0, -2.0), Vec2::new(0.0, 0.0)];
        let placed = to_canvas(&positions, &config);

        assert_eq!(placed[0], Vec2::new(60.0, 940.0));
        assert_eq!(placed[1], Vec2::new(940.0, 60.0));
        for p in placed {
            assert!(p.x >= config.margin && p.x <= config.width - config.margin);
            assert!(p.y >= config.margin && p.y <= config.height - config.margin);
        }
    }

    #[test]
    fn test_project_to_boundary() {
        let origin = Vec2::new(500.0, 500.0);
        assert_eq!(
            project_to_boundary(origin, Vec2::X, 1000.0, 1000.0),
            Vec2::new(1000.0, 500.0)
        );
        assert_eq!(
            project_to_boundary(origin, -Vec2::Y, 1000.0, 1000.0),
            Vec2::new(500.0, 0.0)
        );

        let diagonal = project_to_boundary(
            Vec2::new(200.0, 500.0),
            Vec2::new(-1.0, 1.0).normalize(),
            1000.0,
            1000.0,
        );
        assert!(diagonal.x.abs() < 1e-3);
        assert!((diagonal.y - 700.0).abs() < 1e-3);

        assert_eq!(project_to_boundary(origin, Vec2::ZERO, 1000.0, 1000.0), origin);
    }
}
