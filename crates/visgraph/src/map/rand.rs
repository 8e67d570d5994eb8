//! Random obstacle maps (radial-jitter convex polygons on a grid).
//!
//! Model
//! - The square field `[0, field]^2` is cut into a near-square grid with one
//!   cell per obstacle. Each obstacle is a convex polygon drawn around its cell
//!   centre from `n` jittered angles and radii, then hulled.
//! - The base radius keeps every obstacle strictly inside its cell, so
//!   obstacles never touch each other.
//! - Start sits left of the field, end right of it, both at mid height.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Map, Polygon};
use crate::geom2::{convex_hull, GeomCfg, Point};

/// Vertex count distribution per obstacle.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct MapCfg {
    pub obstacles: usize,
    pub vertex_count: VertexCount,
    /// Side length of the square field holding the obstacles.
    pub field: f64,
    /// Angular jitter as a fraction of the base spacing 2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Relative radial jitter, clamped to [0, 0.25].
    pub radial_jitter: f64,
}

impl Default for MapCfg {
    fn default() -> Self {
        Self {
            obstacles: 4,
            vertex_count: VertexCount::Uniform { min: 3, max: 7 },
            field: 100.0,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.2,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random map. Obstacles whose hull degenerates are skipped, so the
/// result may hold fewer than `cfg.obstacles` polygons.
pub fn draw_map(cfg: MapCfg, tok: ReplayToken) -> Map {
    let mut rng = tok.to_std_rng();
    let field = cfg.field.max(1e-6);
    let k = cfg.obstacles;
    let start = Vector2::new(-0.1 * field, 0.5 * field);
    let end = Vector2::new(1.1 * field, 0.5 * field);
    if k == 0 {
        return Map::new(start, end, Vec::new());
    }
    let cols = (k as f64).sqrt().ceil() as usize;
    let rows = k.div_ceil(cols);
    let (cw, ch) = (field / cols as f64, field / rows as f64);
    // radius * (1 + radial_jitter) < 0.5 * cell
    let base_radius = 0.35 * cw.min(ch);
    let mut polygons = Vec::with_capacity(k);
    for cell in 0..k {
        let (c, r) = (cell % cols, cell / cols);
        let centre = Vector2::new((c as f64 + 0.5) * cw, (r as f64 + 0.5) * ch);
        let ring = draw_convex_ring(&mut rng, &cfg, centre, base_radius);
        if let Some(poly) = convex_hull(&ring, GeomCfg::default()).and_then(Polygon::new) {
            polygons.push(poly);
        }
    }
    Map::new(start, end, polygons)
}

fn draw_convex_ring<R: Rng>(rng: &mut R, cfg: &MapCfg, centre: Point, r0: f64) -> Vec<Point> {
    let n = cfg.vertex_count.sample(rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.25);
    let delta = std::f64::consts::TAU / n as f64;
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    (0..n)
        .map(|k| {
            let th = phase + k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = r0 * (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj);
            centre + Vector2::new(th.cos(), th.sin()) * r
        })
        .collect()
}
