//! Monotone cubic smoothing for the line series.
//!
//! Tangents follow Steffen's method: at each interior point the tangent is
//! limited by both neighbouring secants, so a segment never overshoots its
//! end points. Each segment is then drawn as a cubic Bézier.

/// Samples drawn per segment when no other density is requested
pub const DEFAULT_SAMPLES: usize = 8;

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn secant(dy: f64, dx: f64) -> f64 {
    if dx == 0.0 {
        0.0
    } else {
        dy / dx
    }
}

fn interior_tangent(prev: (f64, f64), at: (f64, f64), next: (f64, f64)) -> f64 {
    let h0 = at.0 - prev.0;
    let h1 = next.0 - at.0;
    let s0 = secant(at.1 - prev.1, h0);
    let s1 = secant(next.1 - at.1, h1);
    let p = if h0 + h1 == 0.0 {
        0.0
    } else {
        (s0 * h1 + s1 * h0) / (h0 + h1)
    };

    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_nan() {
        0.0
    } else {
        t
    }
}

/// Tangent at the far end of a segment given the tangent at its near end
fn end_tangent(from: (f64, f64), to: (f64, f64), known: f64) -> f64 {
    let h = to.0 - from.0;
    if h == 0.0 {
        known
    } else {
        (3.0 * (to.1 - from.1) / h - known) / 2.0
    }
}

/// Tangent (dy/dx) at every point
pub fn tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    if n < 3 {
        let slope = match points {
            [a, b] => secant(b.1 - a.1, b.0 - a.0),
            _ => 0.0,
        };
        return vec![slope; n];
    }

    let mut t = vec![0.0; n];
    for i in 1..n - 1 {
        t[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    t[0] = end_tangent(points[1], points[0], t[1]);
    t[n - 1] = end_tangent(points[n - 2], points[n - 1], t[n - 2]);
    t
}

fn bezier(p0: f64, p1: f64, p2: f64, p3: f64, u: f64) -> f64 {
    let v = 1.0 - u;
    v * v * v * p0 + 3.0 * v * v * u * p1 + 3.0 * v * u * u * p2 + u * u * u * p3
}

/// Densify a polyline into a smooth monotone curve. Every input point is
/// part of the output; `samples` points are produced per segment.
pub fn smooth(points: &[(f64, f64)], samples: usize) -> Vec<(f64, f64)> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let samples = samples.max(1);
    let t = tangents(points);
    let mut out = Vec::with_capacity((points.len() - 1) * samples + 1);
    out.push(points[0]);

    for (i, pair) in points.windows(2).enumerate() {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let dx = (x1 - x0) / 3.0;

        let (cx0, cy0) = (x0 + dx, y0 + dx * t[i]);
        let (cx1, cy1) = (x1 - dx, y1 - dx * t[i + 1]);

        for k in 1..samples {
            let u = k as f64 / samples as f64;
            out.push((bezier(x0, cx0, cx1, x1, u), bezier(y0, cy0, cy1, y1, u)));
        }
        out.push((x1, y1));
    }

    // Tangents overflow for values near the limits of f64; fall back to the
    // straight polyline there
    if out.iter().all(|(x, y)| x.is_finite() && y.is_finite()) {
        out
    } else {
        points.to_vec()
    }
}
