use serde::{Deserialize, Serialize};

/// 1-based, row-major piece number.
pub type PieceIndex = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }

    /// True when either side has no extent (or is not a number).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// One of the four sides of a piece. The discriminant doubles as the
/// quarter-turn count used for arc angles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum PathCommand {
    MoveTo { to: Vec2 },
    LineTo { to: Vec2 },
    /// Circular arc in screen space: angle 0 points to +x, pi/2 to +y (down).
    /// `clockwise` sweeps toward increasing angles as seen on screen.
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of `MoveTo`-started contours.
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo { .. }))
            .count()
    }

    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::Arc { .. }))
            .count()
    }

    pub fn append(&mut self, other: Path) {
        self.commands.extend(other.commands);
    }
}

/// Opaque handle to an image the host has already decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u64);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ImageSource {
    Image(Option<ImageHandle>),
    Url(String),
}

/// Where an image currently stands for one image slot of the view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ImageSlot {
    #[default]
    Empty,
    Loading {
        url: String,
    },
    Ready {
        handle: ImageHandle,
    },
}
