use crate::{Coord, Point};
use std::collections::{BTreeSet, HashSet};

/// Consumer of rasterized pixels
///
/// Rasterizers call `plot` once per generated pixel. The circle rasterizer may
/// plot the same coordinate more than once (octant boundaries), so
/// implementations must tolerate redundant marks.
pub trait PixelSink {
    fn plot(&mut self, x: Coord, y: Coord);

    /// Plot every point produced by an iterator
    fn plot_all<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Point>,
        Self: Sized,
    {
        for Point([x, y]) in points {
            self.plot(x, y);
        }
    }
}

impl<S> PixelSink for &mut S
where
    S: PixelSink + ?Sized,
{
    fn plot(&mut self, x: Coord, y: Coord) {
        (**self).plot(x, y)
    }
}

impl PixelSink for Vec<Point> {
    fn plot(&mut self, x: Coord, y: Coord) {
        self.push(Point::new(x, y))
    }
}

impl PixelSink for HashSet<Point> {
    fn plot(&mut self, x: Coord, y: Coord) {
        self.insert(Point::new(x, y));
    }
}

impl PixelSink for BTreeSet<Point> {
    fn plot(&mut self, x: Coord, y: Coord) {
        self.insert(Point::new(x, y));
    }
}

/// Sink that forwards every pixel to a closure
pub struct FnSink<F>(pub F);

impl<F> PixelSink for FnSink<F>
where
    F: FnMut(Coord, Coord),
{
    fn plot(&mut self, x: Coord, y: Coord) {
        (self.0)(x, y)
    }
}

/// Sink that only counts plotted pixels
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountSink(pub usize);

impl PixelSink for CountSink {
    fn plot(&mut self, _x: Coord, _y: Coord) {
        self.0 += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sinks() {
        let points = [Point::new(1, 2), Point::new(3, 4), Point::new(1, 2)];

        let mut list: Vec<Point> = Vec::new();
        list.plot_all(points);
        assert_eq!(list, points.to_vec());

        let mut set: HashSet<Point> = HashSet::new();
        set.plot_all(points);
        assert_eq!(set.len(), 2);

        let mut ordered: BTreeSet<Point> = BTreeSet::new();
        (&mut ordered).plot_all(points);
        assert_eq!(
            ordered.into_iter().collect::<Vec<_>>(),
            vec![Point::new(1, 2), Point::new(3, 4)]
        );

        let mut sum = 0;
        FnSink(|x: Coord, y: Coord| sum += x * y).plot_all(points);
        assert_eq!(sum, 2 + 12 + 2);

        let mut count = CountSink::default();
        count.plot_all(points);
        assert_eq!(count, CountSink(3));
    }

    #[test]
    fn test_dyn_sink() {
        let mut list: Vec<Point> = Vec::new();
        {
            let sink: &mut dyn PixelSink = &mut list;
            sink.plot(5, 6);
        }
        assert_eq!(list, vec![Point::new(5, 6)]);
    }
}
