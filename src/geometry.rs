use crate::GeometryError;
use std::{
    fmt,
    ops::{Add, Sub},
    str::FromStr,
};

/// Integer coordinate type used by all rasterizers
pub type Coord = i32;

/// Floating type used by the DDA accumulators
pub type Scalar = f64;

/// Integer 2D point (pixel coordinate)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub [Coord; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        write!(f, "{},{}", x, y)
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub const fn x(self) -> Coord {
        self.0[0]
    }

    /// Get `y` component of the point
    #[inline]
    pub const fn y(self) -> Coord {
        self.0[1]
    }

    /// Reflect point over the `x == y` diagonal
    #[inline]
    pub const fn transpose(self) -> Self {
        let Self([x, y]) = self;
        Self([y, x])
    }

    /// Squared euclidean distance to the other point
    pub fn dist_sq(self, other: Self) -> i64 {
        let dx = self.x() as i64 - other.x() as i64;
        let dy = self.y() as i64 - other.y() as i64;
        dx * dx + dy * dy
    }

    /// Check if points are 8-connected (differ by at most one in each axis)
    pub fn is_adjacent(self, other: Self) -> bool {
        (self.x() as i64 - other.x() as i64).abs() <= 1
            && (self.y() as i64 - other.y() as i64).abs() <= 1
    }
}

impl From<(Coord, Coord)> for Point {
    #[inline]
    fn from(xy: (Coord, Coord)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl From<[Coord; 2]> for Point {
    #[inline]
    fn from(xy: [Coord; 2]) -> Self {
        Self(xy)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

impl FromStr for Point {
    type Err = GeometryError;

    /// Parse point in `x,y` (or `x y`) format
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let [x, y] = parse_coords(text)?;
        Ok(Point([x, y]))
    }
}

/// Line segment between two integer points
///
/// Segments where `start == end` are valid and rasterize to a single pixel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment(pub [Point; 2]);

impl fmt::Debug for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let LineSegment([p0, p1]) = self;
        write!(f, "Line {:?} {:?}", p0, p1)
    }
}

impl LineSegment {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self([start.into(), end.into()])
    }

    pub fn start(&self) -> Point {
        self.0[0]
    }

    pub fn end(&self) -> Point {
        self.0[1]
    }

    pub fn points(&self) -> [Point; 2] {
        self.0
    }

    /// Same segment traversed in the opposite direction
    pub fn reverse(&self) -> Self {
        let Self([p0, p1]) = *self;
        Self([p1, p0])
    }

    /// Segment collapses into a single point
    pub fn is_degenerate(&self) -> bool {
        self.start() == self.end()
    }
}

impl FromStr for LineSegment {
    type Err = GeometryError;

    /// Parse segment in `x0,y0 x1,y1` format
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let [x0, y0, x1, y1] = parse_coords(text)?;
        Ok(LineSegment::new((x0, y0), (x1, y1)))
    }
}

/// Circle with integer center and positive integer radius
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CircleRaw", into = "CircleRaw")
)]
pub struct Circle {
    center: Point,
    radius: Coord,
}

impl fmt::Debug for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle {:?} r={}", self.center, self.radius)
    }
}

impl Circle {
    /// Create circle, fails if radius is not positive or if the circle
    /// extent does not fit into the coordinate type.
    pub fn new(center: impl Into<Point>, radius: Coord) -> Result<Self, GeometryError> {
        let center = center.into();
        if radius <= 0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        let Point([x, y]) = center;
        let fits = x.checked_add(radius).is_some()
            && x.checked_sub(radius).is_some()
            && y.checked_add(radius).is_some()
            && y.checked_sub(radius).is_some();
        if !fits {
            return Err(GeometryError::Overflow);
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> Coord {
        self.radius
    }
}

impl FromStr for Circle {
    type Err = GeometryError;

    /// Parse circle in `cx,cy r` format
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let [x, y, radius] = parse_coords(text)?;
        Circle::new((x, y), radius)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CircleRaw {
    center: Point,
    radius: Coord,
}

#[cfg(feature = "serde")]
impl TryFrom<CircleRaw> for Circle {
    type Error = GeometryError;

    fn try_from(raw: CircleRaw) -> Result<Self, Self::Error> {
        Circle::new(raw.center, raw.radius)
    }
}

#[cfg(feature = "serde")]
impl From<Circle> for CircleRaw {
    fn from(circle: Circle) -> Self {
        CircleRaw {
            center: circle.center,
            radius: circle.radius,
        }
    }
}

/// Parse exactly `N` integers separated by commas and/or whitespace
fn parse_coords<const N: usize>(text: &str) -> Result<[Coord; N], GeometryError> {
    let mut result = [0; N];
    let mut found = 0;
    for item in text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
    {
        if found < N {
            result[found] = item.parse()?;
        }
        found += 1;
    }
    if found != N {
        return Err(GeometryError::InvalidArity { expected: N, found });
    }
    Ok(result)
}

/// Size of the target canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// How a shape fits into the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Shape is fully visible
    Inside,
    /// Shape extends past the canvas edges and will be clipped
    Clipped,
}

impl Size {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if the point lies inside `[0, width) x [0, height)`
    pub fn contains(&self, point: Point) -> bool {
        let Point([x, y]) = point;
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Both endpoints of the line must lie inside the canvas
    pub fn check_line(&self, line: &LineSegment) -> Result<(), GeometryError> {
        for point in line.points() {
            if !self.contains(point) {
                return Err(GeometryError::OutOfBounds(point));
            }
        }
        Ok(())
    }

    /// Center of the circle must lie inside the canvas, the boundary may
    /// extend past the edges in which case it is reported as clipped.
    pub fn check_circle(&self, circle: &Circle) -> Result<Fit, GeometryError> {
        let center = circle.center();
        if !self.contains(center) {
            return Err(GeometryError::OutOfBounds(center));
        }
        let Point([x, y]) = center;
        let r = circle.radius();
        let corners = [Point::new(x - r, y - r), Point::new(x + r, y + r)];
        if corners.iter().all(|corner| self.contains(*corner)) {
            Ok(Fit::Inside)
        } else {
            tracing::warn!(
                ?circle,
                width = self.width,
                height = self.height,
                "circle extends beyond canvas and will be clipped"
            );
            Ok(Fit::Clipped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_parse() -> Result<(), GeometryError> {
        assert_eq!("3,-4".parse::<Point>()?, Point::new(3, -4));
        assert_eq!(" 10 20 ".parse::<Point>()?, Point::new(10, 20));
        assert!(matches!(
            "1,2,3".parse::<Point>(),
            Err(GeometryError::InvalidArity {
                expected: 2,
                found: 3
            })
        ));
        assert!(matches!(
            "1,x".parse::<Point>(),
            Err(GeometryError::InvalidInteger(_))
        ));
        Ok(())
    }

    #[test]
    fn test_line_parse() -> Result<(), GeometryError> {
        let line: LineSegment = "0,0 4,2".parse()?;
        assert_eq!(line, LineSegment::new((0, 0), (4, 2)));
        assert_eq!(format!("{:?}", line), "Line 0,0 4,2");
        assert_eq!(line.reverse().start(), Point::new(4, 2));
        assert!(!line.is_degenerate());
        assert!(LineSegment::new((1, 1), (1, 1)).is_degenerate());
        Ok(())
    }

    #[test]
    fn test_circle_new() -> Result<(), GeometryError> {
        let circle: Circle = "5,6 3".parse()?;
        assert_eq!(circle.center(), Point::new(5, 6));
        assert_eq!(circle.radius(), 3);
        assert!(matches!(
            Circle::new((0, 0), 0),
            Err(GeometryError::InvalidRadius(0))
        ));
        assert!(matches!(
            Circle::new((0, 0), -5),
            Err(GeometryError::InvalidRadius(-5))
        ));
        assert!(matches!(
            Circle::new((i32::MAX - 1, 0), 2),
            Err(GeometryError::Overflow)
        ));
        Ok(())
    }

    #[test]
    fn test_bounds() -> Result<(), GeometryError> {
        let size = Size::new(800, 600);
        assert!(size.contains(Point::new(0, 0)));
        assert!(size.contains(Point::new(799, 599)));
        assert!(!size.contains(Point::new(800, 0)));
        assert!(!size.contains(Point::new(0, -1)));

        size.check_line(&LineSegment::new((0, 0), (799, 599)))?;
        assert!(matches!(
            size.check_line(&LineSegment::new((0, 0), (0, 600))),
            Err(GeometryError::OutOfBounds(Point([0, 600])))
        ));

        assert_eq!(size.check_circle(&Circle::new((400, 300), 100)?)?, Fit::Inside);
        assert_eq!(size.check_circle(&Circle::new((10, 300), 100)?)?, Fit::Clipped);
        assert!(size.check_circle(&Circle::new((-1, 300), 1)?).is_err());
        Ok(())
    }

    #[test]
    fn test_point_ops() {
        let p = Point::new(2, 7);
        assert_eq!(p + Point::new(1, -1), Point::new(3, 6));
        assert_eq!(p - Point::new(2, 7), Point::default());
        assert_eq!(p.transpose(), Point::new(7, 2));
        assert_eq!(p.dist_sq(Point::new(5, 3)), 25);
        assert!(p.is_adjacent(Point::new(3, 8)));
        assert!(!p.is_adjacent(Point::new(4, 7)));
    }
}
