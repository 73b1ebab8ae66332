use crate::{Circle, Coord, GeometryError, PixelSink, Point, Setup, Step, StepObserver};

/// Reflect `(x, y)` offset into all eight octants around the center
///
/// Order: `(x, y) (-x, y) (x, -y) (-x, -y) (y, x) (-y, x) (y, -x) (-y, -x)`.
/// Some of the points coincide when `x == 0` or `x == y`.
pub fn octant_points(center: Point, x: Coord, y: Coord) -> [Point; 8] {
    let Point([cx, cy]) = center;
    [
        Point::new(cx + x, cy + y),
        Point::new(cx - x, cy + y),
        Point::new(cx + x, cy - y),
        Point::new(cx - x, cy - y),
        Point::new(cx + y, cy + x),
        Point::new(cx - y, cy + x),
        Point::new(cx + y, cy - x),
        Point::new(cx - y, cy - x),
    ]
}

/// Octant sample produced by the midpoint recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctantSample {
    pub index: u64,
    /// Offset from the center, `0 <= x` and `y <= radius`
    pub x: i64,
    pub y: i64,
    /// Decision parameter the sample was produced with
    pub d: i64,
}

/// Samples of the second octant (from `(0, r)` towards the diagonal)
///
/// Starts at `(0, r)` with `d = 3 - 2r`, and keeps stepping while `x <= y`.
/// The last sample may lie just past the diagonal, it is a reflection of an
/// already produced one.
#[derive(Debug, Clone)]
pub struct OctantIter {
    x: i64,
    y: i64,
    d: i64,
    index: u64,
    done: bool,
}

impl OctantIter {
    pub fn new(radius: Coord) -> Self {
        let radius = radius as i64;
        Self {
            x: 0,
            y: radius,
            d: 3 - 2 * radius,
            index: 0,
            done: false,
        }
    }
}

impl Iterator for OctantIter {
    type Item = OctantSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let sample = OctantSample {
            index: self.index,
            x: self.x,
            y: self.y,
            d: self.d,
        };
        if self.x <= self.y {
            // decision is updated from the cursor before it moves
            if self.d < 0 {
                // East
                self.d += 4 * self.x + 6;
            } else {
                // South-East
                self.d += 4 * (self.x - self.y) + 10;
                self.y -= 1;
            }
            self.x += 1;
        } else {
            self.done = true;
        }
        self.index += 1;
        Some(sample)
    }

    /// Exact, but walks the remaining samples of the octant
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.done {
            0
        } else {
            self.clone().fold(0, |count, _| count + 1)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OctantIter {}

/// Midpoint (Bresenham) circle rasterizer
///
/// Produces closed 8-way symmetric boundary of the circle, not a filled disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct BresenhamCircleRasterizer;

impl BresenhamCircleRasterizer {
    pub fn name(&self) -> &'static str {
        "bresenham-circle"
    }

    pub fn iter(&self, circle: Circle) -> BresenhamCircleIter {
        BresenhamCircleIter::new(circle)
    }

    /// Plot boundary of the circle, returns number of plotted pixels
    /// (including duplicates at octant boundaries).
    pub fn rasterize(&self, circle: Circle, sink: &mut dyn PixelSink) -> usize {
        tracing::debug_span!("[bresenham-circle]", ?circle).in_scope(|| {
            let mut count = 0;
            for Point([x, y]) in BresenhamCircleIter::new(circle) {
                sink.plot(x, y);
                count += 1;
            }
            count
        })
    }

    /// Same as `rasterize` but also reports each octant sample to the observer
    pub fn rasterize_observed(
        &self,
        circle: Circle,
        sink: &mut dyn PixelSink,
        observer: &mut dyn StepObserver,
    ) -> usize {
        let octant = OctantIter::new(circle.radius());
        observer.setup(&Setup::BresenhamCircle {
            circle,
            d: octant.d,
        });
        let mut count = 0;
        for OctantSample { index, x, y, d } in octant {
            observer.step(&Step::BresenhamCircle { index, x, y, d });
            for Point([px, py]) in octant_points(circle.center(), x as Coord, y as Coord) {
                sink.plot(px, py);
                count += 1;
            }
        }
        observer.finish(count);
        count
    }
}

/// Iterator over the boundary pixels of the circle
///
/// Yields eight reflected points for every octant sample.
#[derive(Debug, Clone)]
pub struct BresenhamCircleIter {
    center: Point,
    octant: OctantIter,
    points: [Point; 8],
    index: usize,
}

impl BresenhamCircleIter {
    pub fn new(circle: Circle) -> Self {
        Self {
            center: circle.center(),
            octant: OctantIter::new(circle.radius()),
            points: [circle.center(); 8],
            index: 8,
        }
    }
}

impl Iterator for BresenhamCircleIter {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.points.len() {
            let sample = self.octant.next()?;
            // offsets are bounded by the radius which was validated by `Circle::new`
            self.points = octant_points(self.center, sample.x as Coord, sample.y as Coord);
            self.index = 0;
        }
        let point = self.points[self.index];
        self.index += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.points.len() - self.index;
        let remaining = buffered + self.points.len() * self.octant.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BresenhamCircleIter {}

/// Rasterize circle boundary with the midpoint algorithm
///
/// Fails with `InvalidRadius` if `radius < 1`.
pub fn bresenham_circle(
    center: impl Into<Point>,
    radius: Coord,
    sink: &mut impl PixelSink,
) -> Result<usize, GeometryError> {
    let circle = Circle::new(center, radius)?;
    Ok(BresenhamCircleRasterizer.rasterize(circle, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StepLog;
    use std::collections::{BTreeSet, HashSet};

    fn offsets(circle: Circle) -> Vec<Point> {
        BresenhamCircleIter::new(circle)
            .map(|p| p - circle.center())
            .collect()
    }

    #[test]
    fn test_radius_five() -> Result<(), GeometryError> {
        let samples: Vec<_> = OctantIter::new(5).map(|s| (s.x, s.y, s.d)).collect();
        assert_eq!(
            samples,
            vec![(0, 5, -7), (1, 5, -1), (2, 5, 9), (3, 4, 7), (4, 3, 13)]
        );

        let mut pixels: HashSet<Point> = HashSet::new();
        assert_eq!(bresenham_circle((0, 0), 5, &mut pixels)?, 40);
        for (x, y) in [
            (5, 0),
            (0, 5),
            (-5, 0),
            (0, -5),
            (3, 4),
            (4, 3),
            (-3, 4),
            (-4, 3),
            (3, -4),
            (-4, -3),
        ] {
            assert!(pixels.contains(&Point::new(x, y)), "missing {},{}", x, y);
        }
        for point in pixels.iter() {
            let deviation = (point.dist_sq(Point::default()) - 25).abs();
            assert!(deviation <= 5, "{:?} deviates by {}", point, deviation);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_radius() {
        let mut pixels: Vec<Point> = Vec::new();
        assert!(matches!(
            bresenham_circle((0, 0), 0, &mut pixels),
            Err(GeometryError::InvalidRadius(0))
        ));
        assert!(matches!(
            bresenham_circle((0, 0), -3, &mut pixels),
            Err(GeometryError::InvalidRadius(-3))
        ));
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_unit_circle() -> Result<(), GeometryError> {
        let circle = Circle::new((10, 10), 1)?;
        let set: BTreeSet<_> = BresenhamCircleIter::new(circle).collect();
        let expected: BTreeSet<_> = [(11, 10), (9, 10), (10, 11), (10, 9)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(set, expected);
        Ok(())
    }

    #[test]
    fn test_circle_properties() -> Result<(), GeometryError> {
        for radius in 1..200 {
            let circle = Circle::new((radius % 7 - 3, 11 - radius % 5), radius)?;
            let offsets = offsets(circle);
            assert_eq!(offsets.len() % 8, 0);

            let r2 = (radius as i64) * (radius as i64);
            let set: HashSet<_> = offsets.iter().copied().collect();
            for offset in set.iter() {
                // closest integer approximation, never further than radius in squared terms
                let deviation = (offset.dist_sq(Point::default()) - r2).abs();
                assert!(
                    deviation <= radius as i64,
                    "radius {}: {:?} deviates by {}",
                    radius,
                    offset,
                    deviation
                );
                // dihedral symmetry of order 8
                let Point([x, y]) = *offset;
                for reflection in octant_points(Point::default(), x, y) {
                    assert!(set.contains(&reflection), "radius {}: {:?}", radius, reflection);
                }
            }

            // boundary is closed: every pixel has a neighbour on both sides
            for offset in set.iter() {
                let neighbours = set
                    .iter()
                    .filter(|other| *other != offset && offset.is_adjacent(**other))
                    .count();
                assert!(neighbours >= 2, "radius {}: {:?} is isolated", radius, offset);
            }

            assert!(set.contains(&Point::new(radius, 0)));
            assert!(set.contains(&Point::new(0, -radius)));
        }
        Ok(())
    }

    #[test]
    fn test_octant_termination() {
        for radius in [1, 2, 3, 10, 100, 1000, 100_000] {
            let samples: Vec<_> = OctantIter::new(radius).collect();
            // x strictly increases by one per sample
            for (index, sample) in samples.iter().enumerate() {
                assert_eq!(sample.x, index as i64);
                assert_eq!(sample.index, index as u64);
            }
            let last = samples[samples.len() - 1];
            assert!(last.x > last.y);
            assert!(samples.len() as i64 <= radius as i64 + 2);
        }
    }

    #[test]
    fn test_circle_size_hint() -> Result<(), GeometryError> {
        let mut octant = OctantIter::new(5);
        assert_eq!(octant.len(), 5);
        octant.next();
        assert_eq!(octant.len(), 4);

        let mut iter = BresenhamCircleIter::new(Circle::new((0, 0), 5)?);
        assert_eq!(iter.size_hint(), (40, Some(40)));
        iter.next();
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 37);
        iter.nth(7);
        assert_eq!(iter.len(), 29);
        assert_eq!(iter.by_ref().count(), 29);
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);

        for radius in [1, 2, 7, 64, 199] {
            let iter = BresenhamCircleIter::new(Circle::new((3, -3), radius)?);
            assert_eq!(iter.len(), iter.clone().count(), "radius {}", radius);
        }
        Ok(())
    }

    #[test]
    fn test_large_radius() -> Result<(), GeometryError> {
        let radius = i32::MAX / 2;
        let circle = Circle::new((0, 0), radius)?;
        let mut iter = BresenhamCircleIter::new(circle);
        assert_eq!(iter.next(), Some(Point::new(0, radius)));
        let sample = OctantIter::new(radius).nth(1000).map(|s| (s.x, s.y));
        assert!(matches!(sample, Some((1000, y)) if y == radius as i64));
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<(), GeometryError> {
        let circle = Circle::new((400, 300), 120)?;
        let mut first: Vec<Point> = Vec::new();
        let mut second: Vec<Point> = Vec::new();
        BresenhamCircleRasterizer.rasterize(circle, &mut first);
        BresenhamCircleRasterizer.rasterize(circle, &mut second);
        assert_eq!(first, second);
        assert_eq!(BresenhamCircleRasterizer.iter(circle).collect::<Vec<_>>(), first);
        Ok(())
    }

    #[test]
    fn test_observed() -> Result<(), GeometryError> {
        let circle = Circle::new((0, 0), 5)?;
        let mut log = StepLog::with_limit(2);
        let mut pixels: Vec<Point> = Vec::new();
        let count = BresenhamCircleRasterizer.rasterize_observed(circle, &mut pixels, &mut log);
        assert_eq!(count, 40);
        assert_eq!(log.pixels(), 40);
        assert_eq!(pixels, offsets(circle));
        assert_eq!(
            log.steps()[3],
            Step::BresenhamCircle {
                index: 3,
                x: 3,
                y: 4,
                d: 7,
            }
        );
        let table = log.to_string();
        assert!(table.contains("d = 3 - 2 * r = -7"), "{}", table);
        assert!(table.contains("..."), "{}", table);
        assert!(table.contains("x=   4 y=   3 d=13"), "{}", table);
        Ok(())
    }
}
