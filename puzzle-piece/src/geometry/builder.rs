use crate::geometry::math::arc_point;
use crate::model::{Path, PathCommand, Vec2};

/// Incremental path construction that remembers the current point, the way
/// platform path APIs do.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    path: Path,
    current: Option<Vec2>,
    start: Option<Vec2>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_point(&self) -> Option<Vec2> {
        self.current
    }

    pub fn move_to(&mut self, to: Vec2) {
        self.path.commands.push(PathCommand::MoveTo { to });
        self.current = Some(to);
        self.start = Some(to);
    }

    pub fn line_to(&mut self, to: Vec2) {
        if self.current.is_none() {
            self.move_to(to);
            return;
        }
        self.path.commands.push(PathCommand::LineTo { to });
        self.current = Some(to);
    }

    pub fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32, clockwise: bool) {
        self.path.commands.push(PathCommand::Arc { center, radius, start_angle, end_angle, clockwise });
        self.current = Some(arc_point(center, radius, end_angle));
    }

    pub fn close(&mut self) {
        self.path.commands.push(PathCommand::Close);
        self.current = self.start;
    }

    pub fn build(self) -> Path {
        self.path
    }
}
