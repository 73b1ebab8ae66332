use crate::{Coord, LineSegment, PixelSink, Point, Scalar, Setup, Step, StepObserver};

/// Common interface of the line rasterizers
pub trait LineRasterizer {
    /// Name of the algorithm
    fn name(&self) -> &'static str;

    /// Lazy sequence of pixels approximating the line
    fn pixels(&self, line: LineSegment) -> Box<dyn Iterator<Item = Point> + Send>;

    /// Plot all pixels of the line, returns number of plotted pixels
    fn rasterize(&self, line: LineSegment, sink: &mut dyn PixelSink) -> usize;

    /// Same as `rasterize` but also reports each algorithm step to the observer
    fn rasterize_observed(
        &self,
        line: LineSegment,
        sink: &mut dyn PixelSink,
        observer: &mut dyn StepObserver,
    ) -> usize;
}

/// Plot pixels produced by the iterator into the sink
fn plot_iter(points: impl Iterator<Item = Point>, sink: &mut dyn PixelSink) -> usize {
    let mut count = 0;
    for Point([x, y]) in points {
        sink.plot(x, y);
        count += 1;
    }
    count
}

fn line_deltas(line: LineSegment) -> (i64, i64) {
    let LineSegment([p0, p1]) = line;
    (
        p1.x() as i64 - p0.x() as i64,
        p1.y() as i64 - p0.y() as i64,
    )
}

// -----------------------------------------------------------------------------
// DDA
// -----------------------------------------------------------------------------

/// Digital differential analyzer
///
/// Walks along the dominant axis with equal parametric increments and rounds
/// floating accumulators to the nearest pixel (ties are rounded away from zero).
#[derive(Debug, Default, Clone, Copy)]
pub struct DdaLineRasterizer;

impl DdaLineRasterizer {
    pub fn iter(&self, line: LineSegment) -> DdaLineIter {
        DdaLineIter::new(line)
    }
}

impl LineRasterizer for DdaLineRasterizer {
    fn name(&self) -> &'static str {
        "dda"
    }

    fn pixels(&self, line: LineSegment) -> Box<dyn Iterator<Item = Point> + Send> {
        Box::new(DdaLineIter::new(line))
    }

    fn rasterize(&self, line: LineSegment, sink: &mut dyn PixelSink) -> usize {
        tracing::debug_span!("[dda]", ?line).in_scope(|| plot_iter(DdaLineIter::new(line), sink))
    }

    fn rasterize_observed(
        &self,
        line: LineSegment,
        sink: &mut dyn PixelSink,
        observer: &mut dyn StepObserver,
    ) -> usize {
        let mut iter = DdaLineIter::new(line);
        observer.setup(&iter.setup());
        let mut count = 0;
        while let Some((index, x, y, pixel)) = iter.advance() {
            observer.step(&Step::Dda { index, x, y, pixel });
            sink.plot(pixel.x(), pixel.y());
            count += 1;
        }
        observer.finish(count);
        count
    }
}

/// Iterator over pixels of the DDA line
#[derive(Debug, Clone)]
pub struct DdaLineIter {
    line: LineSegment,
    dx: i64,
    dy: i64,
    steps: u64,
    x_inc: Scalar,
    y_inc: Scalar,
    // accumulators
    x: Scalar,
    y: Scalar,
    index: u64,
}

impl DdaLineIter {
    pub fn new(line: LineSegment) -> Self {
        let (dx, dy) = line_deltas(line);
        let steps = dx.unsigned_abs().max(dy.unsigned_abs());
        // degenerate segment, increments are undefined
        let (x_inc, y_inc) = if steps == 0 {
            (0.0, 0.0)
        } else {
            (dx as Scalar / steps as Scalar, dy as Scalar / steps as Scalar)
        };
        let start = line.start();
        Self {
            line,
            dx,
            dy,
            steps,
            x_inc,
            y_inc,
            x: start.x() as Scalar,
            y: start.y() as Scalar,
            index: 0,
        }
    }

    /// Parameters computed before the first step
    pub fn setup(&self) -> Setup {
        Setup::Dda {
            line: self.line,
            dx: self.dx,
            dy: self.dy,
            steps: self.steps,
            x_inc: self.x_inc,
            y_inc: self.y_inc,
        }
    }

    /// Advance by one step, returning accumulators together with the pixel
    pub fn next_step(&mut self) -> Option<Step> {
        let (index, x, y, pixel) = self.advance()?;
        Some(Step::Dda { index, x, y, pixel })
    }

    /// `(index, x, y, pixel)` of the current step
    fn advance(&mut self) -> Option<(u64, Scalar, Scalar, Point)> {
        if self.index > self.steps {
            return None;
        }
        let pixel = Point::new(self.x.round() as Coord, self.y.round() as Coord);
        let step = (self.index, self.x, self.y, pixel);
        self.x += self.x_inc;
        self.y += self.y_inc;
        self.index += 1;
        Some(step)
    }

    fn remaining(&self) -> usize {
        (self.steps + 1).saturating_sub(self.index) as usize
    }
}

impl Iterator for DdaLineIter {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, _, _, pixel) = self.advance()?;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DdaLineIter {}

/// Rasterize line from `start` to `end` with the DDA algorithm
pub fn dda_line(start: impl Into<Point>, end: impl Into<Point>, sink: &mut impl PixelSink) -> usize {
    DdaLineRasterizer.rasterize(LineSegment::new(start, end), sink)
}

// -----------------------------------------------------------------------------
// Bresenham
// -----------------------------------------------------------------------------

/// Integer only line rasterizer driven by an error accumulator
#[derive(Debug, Default, Clone, Copy)]
pub struct BresenhamLineRasterizer;

impl BresenhamLineRasterizer {
    pub fn iter(&self, line: LineSegment) -> BresenhamLineIter {
        BresenhamLineIter::new(line)
    }
}

impl LineRasterizer for BresenhamLineRasterizer {
    fn name(&self) -> &'static str {
        "bresenham"
    }

    fn pixels(&self, line: LineSegment) -> Box<dyn Iterator<Item = Point> + Send> {
        Box::new(BresenhamLineIter::new(line))
    }

    fn rasterize(&self, line: LineSegment, sink: &mut dyn PixelSink) -> usize {
        tracing::debug_span!("[bresenham-line]", ?line)
            .in_scope(|| plot_iter(BresenhamLineIter::new(line), sink))
    }

    fn rasterize_observed(
        &self,
        line: LineSegment,
        sink: &mut dyn PixelSink,
        observer: &mut dyn StepObserver,
    ) -> usize {
        let mut iter = BresenhamLineIter::new(line);
        observer.setup(&iter.setup());
        let mut count = 0;
        while let Some((index, pixel, err)) = iter.advance() {
            observer.step(&Step::BresenhamLine { index, pixel, err });
            sink.plot(pixel.x(), pixel.y());
            count += 1;
        }
        observer.finish(count);
        count
    }
}

/// Iterator over pixels of the Bresenham line
///
/// Both endpoints are always emitted, cursor never leaves the bounding box of
/// the segment.
#[derive(Debug, Clone)]
pub struct BresenhamLineIter {
    line: LineSegment,
    dx: i64,
    dy: i64,
    sx: Coord,
    sy: Coord,
    err: i64,
    cursor: Point,
    index: u64,
    done: bool,
}

impl BresenhamLineIter {
    pub fn new(line: LineSegment) -> Self {
        let (dx, dy) = line_deltas(line);
        let sx = if dx < 0 { -1 } else { 1 };
        let sy = if dy < 0 { -1 } else { 1 };
        let (dx, dy) = (dx.abs(), dy.abs());
        Self {
            line,
            dx,
            dy,
            sx,
            sy,
            err: dx - dy,
            cursor: line.start(),
            index: 0,
            done: false,
        }
    }

    /// Parameters computed before the first step
    pub fn setup(&self) -> Setup {
        Setup::BresenhamLine {
            line: self.line,
            dx: self.dx,
            dy: self.dy,
            sx: self.sx,
            sy: self.sy,
            err: self.dx - self.dy,
        }
    }

    /// Emit current cursor and move it towards the end point
    pub fn next_step(&mut self) -> Option<Step> {
        let (index, pixel, err) = self.advance()?;
        Some(Step::BresenhamLine { index, pixel, err })
    }

    /// `(index, pixel, err)` of the current step
    fn advance(&mut self) -> Option<(u64, Point, i64)> {
        if self.done {
            return None;
        }
        let pixel = self.cursor;
        let step = (self.index, pixel, self.err);
        if pixel == self.line.end() {
            self.done = true;
        } else {
            let Point([mut x, mut y]) = pixel;
            let e2 = 2 * self.err;
            if e2 > -self.dy {
                self.err -= self.dy;
                x += self.sx;
            }
            if e2 < self.dx {
                self.err += self.dx;
                y += self.sy;
            }
            self.cursor = Point([x, y]);
        }
        self.index += 1;
        Some(step)
    }

    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        let total = self.dx.max(self.dy) as u64 + 1;
        total.saturating_sub(self.index) as usize
    }
}

impl Iterator for BresenhamLineIter {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, pixel, _) = self.advance()?;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BresenhamLineIter {}

/// Rasterize line from `start` to `end` with the Bresenham algorithm
pub fn bresenham_line(
    start: impl Into<Point>,
    end: impl Into<Point>,
    sink: &mut impl PixelSink,
) -> usize {
    BresenhamLineRasterizer.rasterize(LineSegment::new(start, end), sink)
}
