use crate::{Coord, GeometryError, PixelSink, Point, Rgb, Size};
use std::io::Write;

/// Memory layout of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
    /// How many elements we need to skip to get to the next row.
    pub row_stride: usize,
    /// How many elements we need to skip to get to the next column.
    pub col_stride: usize,
}

impl Shape {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.row_stride + col * self.col_stride
    }

    /// Offset of the pixel, `None` if the point is outside of the image
    #[inline]
    pub fn point_offset(&self, point: Point) -> Option<usize> {
        let Point([x, y]) = point;
        if x < 0 || y < 0 {
            return None;
        }
        let (row, col) = (y as usize, x as usize);
        (row < self.height && col < self.width).then(|| self.offset(row, col))
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

/// Owned RGB raster, row-major with the origin in the top-left corner
///
/// Acts as a `PixelSink` painting with the current pen color, points outside
/// of the canvas are silently ignored.
#[derive(Clone)]
pub struct Canvas {
    shape: Shape,
    data: Vec<Rgb>,
    pen: Rgb,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.shape.width)
            .field("height", &self.shape.height)
            .field("pen", &self.pen)
            .finish()
    }
}

impl Canvas {
    /// Create canvas filled with the background color, pen is black
    pub fn new(size: Size, background: Rgb) -> Self {
        Self {
            shape: Shape {
                width: size.width,
                height: size.height,
                row_stride: size.width,
                col_stride: 1,
            },
            data: vec![background; size.width * size.height],
            pen: Rgb::BLACK,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn size(&self) -> Size {
        self.shape.size()
    }

    pub fn width(&self) -> usize {
        self.shape.width
    }

    pub fn height(&self) -> usize {
        self.shape.height
    }

    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    /// Raw RGB bytes of the canvas
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        if row >= self.shape.height || col >= self.shape.width {
            return None;
        }
        self.data.get(self.shape.offset(row, col)).copied()
    }

    /// Color at the point, `None` if the point is outside of the canvas
    pub fn at(&self, point: Point) -> Option<Rgb> {
        let offset = self.shape.point_offset(point)?;
        self.data.get(offset).copied()
    }

    /// Set pixel color, returns `false` if the point was clipped
    pub fn set(&mut self, point: Point, color: Rgb) -> bool {
        match self.shape.point_offset(point) {
            Some(offset) => {
                self.data[offset] = color;
                true
            }
            None => false,
        }
    }

    pub fn pen(&self) -> Rgb {
        self.pen
    }

    /// Change color used by `plot`
    pub fn set_pen(&mut self, pen: Rgb) -> &mut Self {
        self.pen = pen;
        self
    }

    pub fn clear(&mut self, color: Rgb) {
        self.data.fill(color);
    }

    /// Number of pixels of the given color
    pub fn count(&self, color: Rgb) -> usize {
        self.data.iter().filter(|pixel| **pixel == color).count()
    }

    /// Fill disc of the given radius with the pen color, non-positive radius
    /// plots only the center
    pub fn fill_disc(&mut self, center: Point, radius: Coord) {
        let Point([cx, cy]) = center;
        let radius = radius.max(0);
        let r2 = radius as i64 * radius as i64;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if (dx as i64).pow(2) + (dy as i64).pow(2) <= r2 {
                    self.plot(cx.saturating_add(dx), cy.saturating_add(dy));
                }
            }
        }
    }

    /// Draw axis aligned cross with arms of the given length using the pen color
    pub fn cross(&mut self, center: Point, arm: Coord) {
        let Point([cx, cy]) = center;
        let arm = arm.max(0);
        for offset in -arm..=arm {
            self.plot(cx.saturating_add(offset), cy);
            self.plot(cx, cy.saturating_add(offset));
        }
    }

    /// Write canvas as binary PPM (`P6`)
    pub fn write_ppm(&self, mut out: impl Write) -> Result<(), GeometryError> {
        write!(out, "P6\n{} {}\n255\n", self.shape.width, self.shape.height)?;
        out.write_all(self.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Write canvas as PNG
    #[cfg(feature = "png")]
    pub fn write_png(&self, out: impl Write) -> Result<(), GeometryError> {
        let mut encoder = png::Encoder::new(out, self.shape.width as u32, self.shape.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.as_bytes())?;
        writer.finish()?;
        Ok(())
    }
}

impl PixelSink for Canvas {
    fn plot(&mut self, x: Coord, y: Coord) {
        let pen = self.pen;
        self.set(Point::new(x, y), pen);
    }
}
