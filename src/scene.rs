//! A declarative description of a Skew-T diagram.
//!
//! The layout code produces a [`RenderScene`], a flat list of primitives in paint order (back to
//! front). Turning it into pixels is left to the consumer.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Create a color from its components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Background and margin fill.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Isotherms, axes, text and the temperature trace.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Dew point trace.
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// Saturated adiabats.
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    /// Isobars.
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Mixing ratio lines.
    pub const TEAL: Color = Color::rgb(0, 128, 128);
    /// Dry adiabats.
    pub const BROWN: Color = Color::rgb(127, 95, 63);
}

/// A point in canvas coordinates, origin at the top left and y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// How to draw a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Line color
    pub color: Color,
    /// Line width in pixels
    pub width: f64,
    /// Alternating on/off lengths in pixels, empty for a solid line.
    pub dash: Vec<f64>,
}

impl Stroke {
    /// A solid line.
    #[inline]
    pub fn solid(color: Color, width: f64) -> Self {
        Stroke {
            color,
            width,
            dash: vec![],
        }
    }

    /// A dashed line.
    #[inline]
    pub fn dashed(color: Color, width: f64, dash: Vec<f64>) -> Self {
        Stroke { color, width, dash }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    /// Regular
    Normal,
    /// Bold
    Bold,
}

/// Font for a text primitive. The family is left to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Size in pixels
    pub size: f64,
    /// Weight
    pub weight: FontWeight,
    /// Italic style
    pub italic: bool,
}

impl Font {
    /// A regular font.
    #[inline]
    pub fn normal(size: f64) -> Self {
        Font {
            size,
            weight: FontWeight::Normal,
            italic: false,
        }
    }

    /// A bold font.
    #[inline]
    pub fn bold(size: f64) -> Self {
        Font {
            weight: FontWeight::Bold,
            ..Font::normal(size)
        }
    }

    /// An italic font.
    #[inline]
    pub fn italic(size: f64) -> Self {
        Font {
            italic: true,
            ..Font::normal(size)
        }
    }
}

/// Horizontal alignment of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    /// Anchor at the start of the text.
    Left,
    /// Anchor at the middle of the text.
    Center,
    /// Anchor at the end of the text.
    Right,
}

/// Vertical alignment of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextBaseline {
    /// Anchor at the top of the text.
    Top,
    /// Anchor at the vertical middle of the text.
    Middle,
    /// Anchor on the alphabetic baseline.
    Alphabetic,
}

/// A text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// The string to draw.
    pub content: String,
    /// Position of the text.
    pub anchor: Point,
    /// Horizontal alignment relative to the anchor.
    pub align: TextAlign,
    /// Vertical alignment relative to the anchor.
    pub baseline: TextBaseline,
    /// Rotation about the anchor in radians, positive is clockwise on the canvas.
    pub rotation: f64,
    /// Font
    pub font: Font,
    /// Text color
    pub color: Color,
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// A filled axis aligned rectangle.
    FillRect {
        /// Top left corner
        origin: Point,
        /// Width
        width: f64,
        /// Height
        height: f64,
        /// Fill color
        color: Color,
    },
    /// A connected series of line segments.
    Polyline {
        /// Vertices, at least two.
        points: Vec<Point>,
        /// Line style
        stroke: Stroke,
    },
    /// A single line segment.
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Line style
        stroke: Stroke,
    },
    /// A text label.
    Text(Text),
}

/// Logical group of a primitive in the diagram, in paint order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, Serialize, Deserialize,
)]
pub enum SceneLayer {
    /// Canvas background
    Background,
    /// Dry adiabats and their labels
    DryAdiabat,
    /// Saturated adiabats and their labels
    SaturatedAdiabat,
    /// Mixing ratio lines and their labels
    MixingRatio,
    /// Skewed isotherms
    Isotherm,
    /// Isobars
    Isobar,
    /// Temperature profile
    TemperatureTrace,
    /// Dew point profile
    DewPointTrace,
    /// Margins, axes, ticks and axis labels
    Frame,
    /// Summary text around the plot area
    Annotation,
}

/// A primitive tagged with the group it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    /// The group this primitive belongs to.
    pub layer: SceneLayer,
    /// What to draw.
    pub primitive: Primitive,
}

/// All the primitives of a diagram in paint order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderScene {
    width: f64,
    height: f64,
    elements: Vec<SceneElement>,
}

impl RenderScene {
    /// Create an empty scene for a canvas of the given size.
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        RenderScene {
            width,
            height,
            elements: vec![],
        }
    }

    /// Canvas width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// All elements, back to front.
    #[inline]
    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    /// Number of primitives.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` if nothing has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the primitives of one layer.
    pub fn layer(&self, layer: SceneLayer) -> impl Iterator<Item = &Primitive> {
        self.elements
            .iter()
            .filter(move |elem| elem.layer == layer)
            .map(|elem| &elem.primitive)
    }

    /// Append a primitive.
    #[inline]
    pub fn push(&mut self, layer: SceneLayer, primitive: Primitive) {
        self.elements.push(SceneElement { layer, primitive });
    }

    pub(crate) fn fill_rect(&mut self, layer: SceneLayer, origin: Point, w: f64, h: f64, c: Color) {
        self.push(
            layer,
            Primitive::FillRect {
                origin,
                width: w,
                height: h,
                color: c,
            },
        );
    }

    pub(crate) fn line(&mut self, layer: SceneLayer, from: Point, to: Point, stroke: Stroke) {
        self.push(layer, Primitive::Line { from, to, stroke });
    }

    /// Adds a polyline, or nothing if there are fewer than two points.
    pub(crate) fn polyline(&mut self, layer: SceneLayer, points: Vec<Point>, stroke: Stroke) {
        if points.len() >= 2 {
            self.push(layer, Primitive::Polyline { points, stroke });
        }
    }

    pub(crate) fn text(&mut self, layer: SceneLayer, text: Text) {
        self.push(layer, Primitive::Text(text));
    }
}
