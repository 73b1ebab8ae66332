//! Optional per-step narration of the rasterization algorithms
//!
//! Observers never see the sink, and the sink never sees the observer. This
//! keeps diagnostic output (tables, logs) out of the pixel stream.
use crate::{Circle, Coord, LineSegment, Point, Scalar};
use std::fmt;

/// Parameters computed by an algorithm before its first step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setup {
    Dda {
        line: LineSegment,
        dx: i64,
        dy: i64,
        steps: u64,
        x_inc: Scalar,
        y_inc: Scalar,
    },
    BresenhamLine {
        line: LineSegment,
        dx: i64,
        dy: i64,
        sx: Coord,
        sy: Coord,
        err: i64,
    },
    BresenhamCircle {
        circle: Circle,
        d: i64,
    },
}

/// Single step of an algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// DDA accumulators before rounding and the pixel they rounded to
    Dda {
        index: u64,
        x: Scalar,
        y: Scalar,
        pixel: Point,
    },
    /// Bresenham line cursor and the error term at the moment of emission
    BresenhamLine { index: u64, pixel: Point, err: i64 },
    /// Octant sample relative to the circle center and its decision parameter,
    /// each sample is plotted eight times.
    BresenhamCircle { index: u64, x: i64, y: i64, d: i64 },
}

impl Step {
    pub fn index(&self) -> u64 {
        match *self {
            Step::Dda { index, .. } => index,
            Step::BresenhamLine { index, .. } => index,
            Step::BresenhamCircle { index, .. } => index,
        }
    }
}

/// Hook called by `rasterize_observed` entry points
pub trait StepObserver {
    fn setup(&mut self, _setup: &Setup) {}

    fn step(&mut self, step: &Step);

    /// Called once after the last step with the number of plotted pixels
    fn finish(&mut self, _pixels: usize) {}
}

impl<O> StepObserver for &mut O
where
    O: StepObserver + ?Sized,
{
    fn setup(&mut self, setup: &Setup) {
        (**self).setup(setup)
    }

    fn step(&mut self, step: &Step) {
        (**self).step(step)
    }

    fn finish(&mut self, pixels: usize) {
        (**self).finish(pixels)
    }
}

/// Observer that forwards every step to `tracing` at trace level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl StepObserver for TracingObserver {
    fn setup(&mut self, setup: &Setup) {
        tracing::debug!(?setup, "[setup]");
    }

    fn step(&mut self, step: &Step) {
        match *step {
            Step::Dda { index, x, y, pixel } => {
                tracing::trace!(index, x, y, ?pixel, "[dda]")
            }
            Step::BresenhamLine { index, pixel, err } => {
                tracing::trace!(index, ?pixel, err, "[bresenham-line]")
            }
            Step::BresenhamCircle { index, x, y, d } => {
                tracing::trace!(index, x, y, d, "[bresenham-circle]")
            }
        }
    }

    fn finish(&mut self, pixels: usize) {
        tracing::debug!(pixels, "[finish]");
    }
}

/// Observer that records steps and renders them as a text table
#[derive(Debug, Clone, Default)]
pub struct StepLog {
    setup: Option<Setup>,
    steps: Vec<Step>,
    pixels: usize,
    limit: Option<usize>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only show first `limit` steps and the last one when displayed
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn setup_params(&self) -> Option<&Setup> {
        self.setup.as_ref()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of pixels plotted by the observed rasterization
    pub fn pixels(&self) -> usize {
        self.pixels
    }
}

impl StepObserver for StepLog {
    fn setup(&mut self, setup: &Setup) {
        self.setup = Some(*setup);
        self.steps.clear();
        self.pixels = 0;
    }

    fn step(&mut self, step: &Step) {
        self.steps.push(*step);
    }

    fn finish(&mut self, pixels: usize) {
        self.pixels = pixels;
    }
}

impl fmt::Display for StepLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.setup {
            Some(Setup::Dda {
                line,
                dx,
                dy,
                steps,
                x_inc,
                y_inc,
            }) => {
                writeln!(f, "DDA {:?} -> {:?}", line.start(), line.end())?;
                writeln!(f, "  dx = {}, dy = {}", dx, dy)?;
                writeln!(f, "  steps = max(|dx|, |dy|) = {}", steps)?;
                writeln!(f, "  x increment = {:.4}, y increment = {:.4}", x_inc, y_inc)?;
            }
            Some(Setup::BresenhamLine {
                line,
                dx,
                dy,
                sx,
                sy,
                err,
            }) => {
                writeln!(f, "Bresenham {:?} -> {:?}", line.start(), line.end())?;
                writeln!(f, "  dx = {}, dy = {}", dx, dy)?;
                writeln!(f, "  sx = {}, sy = {}", sx, sy)?;
                writeln!(f, "  initial error = dx - dy = {}", err)?;
            }
            Some(Setup::BresenhamCircle { circle, d }) => {
                writeln!(
                    f,
                    "Bresenham circle center {:?} radius {}",
                    circle.center(),
                    circle.radius()
                )?;
                writeln!(f, "  d = 3 - 2 * r = {}", d)?;
            }
            None => {}
        }

        let count = self.steps.len();
        let shown = self.limit.unwrap_or(count);
        for (position, step) in self.steps.iter().enumerate() {
            if position >= shown && position + 1 != count {
                if position == shown {
                    writeln!(f, "  ...")?;
                }
                continue;
            }
            match *step {
                Step::Dda { index, x, y, pixel } => {
                    writeln!(f, "  {:>4}: x={:>10.4} y={:>10.4} -> {:?}", index, x, y, pixel)?
                }
                Step::BresenhamLine { index, pixel, err } => {
                    writeln!(f, "  {:>4}: {:?} err={}", index, pixel, err)?
                }
                Step::BresenhamCircle { index, x, y, d } => {
                    writeln!(f, "  {:>4}: x={:>4} y={:>4} d={}", index, x, y, d)?
                }
            }
        }
        write!(f, "  pixels plotted: {}", self.pixels)
    }
}
