use crate::{
    BresenhamCircleRasterizer, BresenhamLineRasterizer, Canvas, Circle, DdaLineRasterizer,
    LineRasterizer, LineSegment, Rgb, Size,
};

/// Primitive together with the algorithm used to rasterize it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "kebab-case")
)]
pub enum Primitive {
    DdaLine { line: LineSegment },
    BresenhamLine { line: LineSegment },
    Circle { circle: Circle },
}

/// Colored primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub color: Rgb,
    pub shape: Primitive,
}

/// Collection of primitives rendered onto a canvas of a fixed size
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub size: Size,
    pub background: Rgb,
    /// Mark line endpoints with discs and circle centers with crosses
    #[cfg_attr(feature = "serde", serde(default))]
    pub markers: bool,
    pub items: Vec<Item>,
}

/// Marker colors used for line start, line end and circle center
const START_MARKER: Rgb = Rgb::RED;
const END_MARKER: Rgb = Rgb::GREEN;
const CENTER_MARKER: Rgb = Rgb::BLUE;

impl Scene {
    pub fn new(size: Size, background: Rgb) -> Self {
        Self {
            size,
            background,
            markers: false,
            items: Vec::new(),
        }
    }

    /// Seven colored DDA lines covering horizontal, vertical, steep and shallow slopes
    pub fn demo() -> Self {
        let lines = [
            (Rgb::RED, (100, 100), (700, 100)),
            (Rgb::GREEN, (400, 50), (400, 550)),
            (Rgb::BLUE, (100, 150), (700, 500)),
            (Rgb::MAGENTA, (100, 500), (700, 150)),
            (Rgb::CYAN, (50, 300), (750, 350)),
            (Rgb::YELLOW, (200, 50), (250, 550)),
            (Rgb::BLACK, (50, 50), (750, 550)),
        ];
        let mut scene = Scene::new(Size::new(800, 600), Rgb::WHITE);
        for (color, start, end) in lines {
            scene.push(
                color,
                Primitive::DdaLine {
                    line: LineSegment::new(start, end),
                },
            );
        }
        scene
    }

    pub fn push(&mut self, color: Rgb, shape: Primitive) -> &mut Self {
        self.items.push(Item { color, shape });
        self
    }

    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    /// Load scene from JSON
    #[cfg(feature = "serde")]
    pub fn from_json(reader: impl std::io::Read) -> Result<Self, crate::GeometryError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Render all items in order, later items are drawn on top
    pub fn render(&self) -> Canvas {
        tracing::debug_span!("[render]", items = self.items.len()).in_scope(|| {
            let mut canvas = Canvas::new(self.size, self.background);
            for item in self.items.iter() {
                canvas.set_pen(item.color);
                let pixels = match item.shape {
                    Primitive::DdaLine { line } => DdaLineRasterizer.rasterize(line, &mut canvas),
                    Primitive::BresenhamLine { line } => {
                        BresenhamLineRasterizer.rasterize(line, &mut canvas)
                    }
                    Primitive::Circle { circle } => {
                        if let Err(error) = self.size.check_circle(&circle) {
                            tracing::warn!(%error, "[circle]");
                        }
                        BresenhamCircleRasterizer.rasterize(circle, &mut canvas)
                    }
                };
                tracing::debug!(?item, pixels, "[item]");
            }
            if self.markers {
                self.render_markers(&mut canvas);
            }
            canvas
        })
    }

    fn render_markers(&self, canvas: &mut Canvas) {
        for item in self.items.iter() {
            match item.shape {
                Primitive::DdaLine { line } | Primitive::BresenhamLine { line } => {
                    canvas.set_pen(START_MARKER).fill_disc(line.start(), 4);
                    canvas.set_pen(END_MARKER).fill_disc(line.end(), 4);
                }
                Primitive::Circle { circle } => {
                    canvas.set_pen(CENTER_MARKER).cross(circle.center(), 5);
                    canvas.fill_disc(circle.center(), 2);
                }
            }
        }
    }
}
