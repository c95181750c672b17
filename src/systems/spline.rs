//! Chordal Catmull-Rom spline and arc-length reparameterization.
//!
//! Open curves only. The first and last spans use phantom end points mirrored
//! through the end control points. Knot spacing is the chord length between
//! consecutive points; spans shorter than 1e-4 borrow the neighbouring spacing.

use glam::Vec3;

/// Divisions used to tabulate arc length.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

const MIN_SPAN: f32 = 1e-4;

#[derive(Clone, Debug, PartialEq)]
pub struct CatmullRom {
    points: Vec<Vec3>,
}

/// Cubic `c0 + c1 w + c2 w^2 + c3 w^3` for one span.
#[derive(Clone, Copy, Debug)]
struct SpanPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl SpanPoly {
    fn hermite(x1: Vec3, x2: Vec3, t1: Vec3, t2: Vec3) -> Self {
        Self {
            c0: x1,
            c1: t1,
            c2: -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2,
            c3: 2.0 * x1 - 2.0 * x2 + t1 + t2,
        }
    }

    #[inline]
    fn eval(&self, w: f32) -> Vec3 {
        self.c0 + w * (self.c1 + w * (self.c2 + w * self.c3))
    }

    #[inline]
    fn eval_derivative(&self, w: f32) -> Vec3 {
        self.c1 + w * (2.0 * self.c2 + w * 3.0 * self.c3)
    }
}

impl CatmullRom {
    /// `None` with fewer than two control points.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Span index and local weight for global parameter `t`.
    fn locate(&self, t: f32) -> (usize, f32) {
        let last = self.points.len() - 1;
        let p = last as f32 * t.clamp(0.0, 1.0);
        let mut index = p.floor() as usize;
        let mut weight = p - index as f32;
        if index >= last {
            index = last - 1;
            weight = 1.0;
        }
        (index, weight)
    }

    fn span(&self, index: usize) -> SpanPoly {
        let pts = &self.points;
        let l = pts.len();
        let p1 = pts[index];
        let p2 = pts[index + 1];
        let p0 = if index > 0 { pts[index - 1] } else { 2.0 * pts[0] - pts[1] };
        let p3 = if index + 2 < l { pts[index + 2] } else { 2.0 * pts[l - 1] - pts[l - 2] };

        let mut dt0 = p0.distance(p1);
        let mut dt1 = p1.distance(p2);
        let mut dt2 = p2.distance(p3);
        if dt1 < MIN_SPAN {
            dt1 = 1.0;
        }
        if dt0 < MIN_SPAN {
            dt0 = dt1;
        }
        if dt2 < MIN_SPAN {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;
        SpanPoly::hermite(p1, p2, t1, t2)
    }

    pub fn point(&self, t: f32) -> Vec3 {
        let (index, w) = self.locate(t);
        self.span(index).eval(w)
    }

    /// Derivative with respect to the global parameter `t`.
    pub fn derivative(&self, t: f32) -> Vec3 {
        let (index, w) = self.locate(t);
        self.span(index).eval_derivative(w) * (self.points.len() - 1) as f32
    }

    /// `divisions + 1` points at uniform parameter `k / divisions`.
    pub fn samples(&self, divisions: usize) -> Samples<'_> {
        Samples { curve: self, divisions, next: 0 }
    }

    pub fn arc_length_table(&self, divisions: usize) -> ArcLengthTable {
        ArcLengthTable::new(self, divisions)
    }
}

/// Lazy uniform-parameter sampler, see [`CatmullRom::samples`].
#[derive(Clone, Debug)]
pub struct Samples<'a> {
    curve: &'a CatmullRom,
    divisions: usize,
    next: usize,
}

impl Iterator for Samples<'_> {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        if self.next > self.divisions {
            return None;
        }
        let t = if self.divisions == 0 { 0.0 } else { self.next as f32 / self.divisions as f32 };
        self.next += 1;
        Some(self.curve.point(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.divisions + 1).saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Samples<'_> {}

/// Cumulative chord lengths of a curve at uniform parameter steps.
#[derive(Clone, Debug)]
pub struct ArcLengthTable {
    lengths: Vec<f32>,
}

impl ArcLengthTable {
    pub fn new(curve: &CatmullRom, divisions: usize) -> Self {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut sum = 0.0;
        let mut last = curve.point(0.0);
        lengths.push(0.0);
        for k in 1..=divisions {
            let p = curve.point(k as f32 / divisions as f32);
            sum += p.distance(last);
            lengths.push(sum);
            last = p;
        }
        Self { lengths }
    }

    pub fn total(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Curve parameter at arc-length fraction `u`.
    pub fn u_to_t(&self, u: f32) -> f32 {
        let n = self.lengths.len();
        let intervals = (n - 1) as f32;
        let target = u.clamp(0.0, 1.0) * self.total();

        // Last index whose length is <= target.
        let mut low: isize = 0;
        let mut high: isize = n as isize - 1;
        while low <= high {
            let mid = low + (high - low) / 2;
            let cmp = self.lengths[mid as usize] - target;
            if cmp < 0.0 {
                low = mid + 1;
            } else if cmp > 0.0 {
                high = mid - 1;
            } else {
                high = mid;
                break;
            }
        }
        let i = high.clamp(0, n as isize - 2) as usize;
        let before = self.lengths[i];
        let span = self.lengths[i + 1] - before;
        if span <= 0.0 {
            return i as f32 / intervals;
        }
        let frac = ((target - before) / span).clamp(0.0, 1.0);
        (i as f32 + frac) / intervals
    }
}
