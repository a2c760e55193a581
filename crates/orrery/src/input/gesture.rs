//! Press-move-release tracking that separates clicks from drags.

use glam::Vec2;

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// Released without passing the drag threshold, at this position.
    Click(Vec2),
    /// The pointer travelled past the threshold at some point.
    Drag,
    /// Release without a matching press.
    Idle,
}

/// A single pointer gesture. Once the pointer strays farther than
/// `threshold` pixels from the press, the gesture is a drag for good.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    threshold: f32,
    start: Option<Vec2>,
    moved: bool,
}

impl DragGesture {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
            moved: false,
        }
    }

    pub fn press(&mut self, pos: Vec2) {
        self.start = Some(pos);
        self.moved = false;
    }

    /// Track a move. Returns true while the gesture is a drag.
    pub fn moved_to(&mut self, pos: Vec2) -> bool {
        if let Some(start) = self.start {
            if pos.distance(start) > self.threshold {
                self.moved = true;
            }
        }
        self.moved
    }

    pub fn release(&mut self, pos: Vec2) -> GestureEnd {
        let end = match self.start {
            None => GestureEnd::Idle,
            Some(_) if self.moved => GestureEnd::Drag,
            Some(_) => GestureEnd::Click(pos),
        };
        self.cancel();
        end
    }

    /// Abandon the gesture without a result (pointer left the canvas).
    pub fn cancel(&mut self) {
        self.start = None;
        self.moved = false;
    }

    pub fn is_pressed(&self) -> bool {
        self.start.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.moved
    }
}
