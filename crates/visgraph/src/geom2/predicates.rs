//! Orientation, intersection and containment predicates.
//!
//! All decisions that compare against zero go through `GeomCfg`, so two runs
//! with the same tolerances classify the same inputs identically.

use super::types::{Containment, GeomCfg, Intersection, Orientation, Point, Segment};

/// Signed area of the parallelogram spanned by `q - p` and `r - p`.
/// Positive for a counterclockwise turn.
#[inline]
pub fn cross(p: Point, q: Point, r: Point) -> f64 {
    let pq = q - p;
    let pr = r - p;
    pq.x * pr.y - pq.y * pr.x
}

/// Orientation of the ordered triple `(p, q, r)`; `|cross| <= eps_collinear` is collinear.
#[inline]
pub fn orientation(p: Point, q: Point, r: Point, cfg: GeomCfg) -> Orientation {
    let c = cross(p, q, r);
    if c.abs() <= cfg.eps_collinear {
        Orientation::Collinear
    } else if c > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Euclidean distance; used as the edge weight everywhere.
#[inline]
pub fn distance(p: Point, q: Point) -> f64 {
    (q - p).norm()
}

#[inline]
pub fn points_equal(p: Point, q: Point, cfg: GeomCfg) -> bool {
    (p.x - q.x).abs() < cfg.eps_point && (p.y - q.y).abs() < cfg.eps_point
}

/// Bounding-box containment with `eps_point` slack. Only meaningful for collinear `p`.
#[inline]
fn within_box(p: Point, s: &Segment, cfg: GeomCfg) -> bool {
    let eps = cfg.eps_point;
    p.x >= s.a.x.min(s.b.x) - eps
        && p.x <= s.a.x.max(s.b.x) + eps
        && p.y >= s.a.y.min(s.b.y) - eps
        && p.y <= s.a.y.max(s.b.y) + eps
}

/// `p` lies on the closed segment `s`.
pub fn point_on_segment(p: Point, s: &Segment, cfg: GeomCfg) -> bool {
    if points_equal(s.a, s.b, cfg) {
        return points_equal(p, s.a, cfg);
    }
    orientation(s.a, s.b, p, cfg) == Orientation::Collinear && within_box(p, s, cfg)
}

/// Classify how two closed segments meet.
///
/// Orientations of each endpoint against the other segment decide the general
/// case; collinear pairs fall back to comparing their projections on the
/// shared line.
pub fn classify_intersection(s1: &Segment, s2: &Segment, cfg: GeomCfg) -> Intersection {
    if points_equal(s1.a, s1.b, cfg) {
        return if point_on_segment(s1.a, s2, cfg) {
            Intersection::Touch
        } else {
            Intersection::None
        };
    }
    if points_equal(s2.a, s2.b, cfg) {
        return if point_on_segment(s2.a, s1, cfg) {
            Intersection::Touch
        } else {
            Intersection::None
        };
    }
    let o1 = orientation(s2.a, s2.b, s1.a, cfg);
    let o2 = orientation(s2.a, s2.b, s1.b, cfg);
    let o3 = orientation(s1.a, s1.b, s2.a, cfg);
    let o4 = orientation(s1.a, s1.b, s2.b, cfg);
    use Orientation::Collinear;

    if o1 == Collinear && o2 == Collinear {
        return collinear_overlap(s1, s2, cfg);
    }
    if o1 != Collinear && o2 != Collinear && o1 != o2 && o3 != Collinear && o4 != Collinear && o3 != o4
    {
        return Intersection::Proper;
    }
    let touches = (o1 == Collinear && within_box(s1.a, s2, cfg))
        || (o2 == Collinear && within_box(s1.b, s2, cfg))
        || (o3 == Collinear && within_box(s2.a, s1, cfg))
        || (o4 == Collinear && within_box(s2.b, s1, cfg));
    if touches {
        Intersection::Touch
    } else {
        Intersection::None
    }
}

fn collinear_overlap(s1: &Segment, s2: &Segment, cfg: GeomCfg) -> Intersection {
    // Project on the longer direction; both segments sit on the same line.
    let d = if s2.length() >= s1.length() {
        s2.b - s2.a
    } else {
        s1.b - s1.a
    };
    let d = d / d.norm();
    let interval = |s: &Segment| {
        let (u, v) = (s.a.dot(&d), s.b.dot(&d));
        (u.min(v), u.max(v))
    };
    let (lo1, hi1) = interval(s1);
    let (lo2, hi2) = interval(s2);
    let shared = hi1.min(hi2) - lo1.max(lo2);
    if shared > cfg.eps_point {
        Intersection::Overlap
    } else if shared >= -cfg.eps_point {
        Intersection::Touch
    } else {
        Intersection::None
    }
}

/// Any contact at all, including shared endpoints and collinear touching.
#[inline]
pub fn segments_intersect(s1: &Segment, s2: &Segment, cfg: GeomCfg) -> bool {
    classify_intersection(s1, s2, cfg) != Intersection::None
}

/// Even-odd ray casting after an explicit boundary check.
///
/// `vertices` is a closed ring in boundary order; fewer than three vertices
/// enclose nothing.
pub fn point_in_polygon(p: Point, vertices: &[Point], cfg: GeomCfg) -> Containment {
    let n = vertices.len();
    if n == 0 {
        return Containment::Outside;
    }
    for k in 0..n {
        let edge = Segment::new(vertices[k], vertices[(k + 1) % n]);
        if point_on_segment(p, &edge, cfg) {
            return Containment::Boundary;
        }
    }
    if n < 3 {
        return Containment::Outside;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    if inside {
        Containment::Inside
    } else {
        Containment::Outside
    }
}
