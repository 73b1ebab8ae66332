//! Integer scan-conversion of lines and circles.
//!
//! Main features:
//!  - DDA line rasterization
//!  - Bresenham line rasterization (integer only)
//!  - Bresenham (midpoint) circle rasterization with 8-way symmetry
//!
//! Every rasterizer is a pure function from geometry to a lazy sequence of
//! pixels, which is either consumed directly as an iterator or pushed into a
//! [`PixelSink`] (coordinate list, set, [`Canvas`], closure).
//!
//! ```
//! use scanconv::*;
//!
//! let mut pixels: Vec<Point> = Vec::new();
//! bresenham_line((0, 0), (5, 0), &mut pixels);
//! assert_eq!(pixels.len(), 6);
//! ```
#![deny(warnings)]

mod circle;
mod color;
mod error;
mod geometry;
mod image;
mod line;
mod observe;
mod scene;
mod sink;
mod utils;

pub use circle::{
    BresenhamCircleIter, BresenhamCircleRasterizer, OctantIter, OctantSample, bresenham_circle,
    octant_points,
};
pub use color::Rgb;
pub use error::GeometryError;
pub use geometry::{Circle, Coord, Fit, LineSegment, Point, Scalar, Size};
pub use image::{Canvas, Shape};
pub use line::{
    BresenhamLineIter, BresenhamLineRasterizer, DdaLineIter, DdaLineRasterizer, LineRasterizer,
    bresenham_line, dda_line,
};
pub use observe::{Setup, Step, StepLog, StepObserver, TracingObserver};
pub use scene::{Item, Primitive, Scene};
pub use sink::{CountSink, FnSink, PixelSink};
