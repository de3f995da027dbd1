use serde::{Deserialize, Serialize};

use super::ControlId;
use crate::math::Vector;

/// Distinguishes segment endpoints from interior shape controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlKind {
    /// Interior control of a cubic segment.
    Middle,
    /// Segment endpoint, possibly shared with the adjacent segment.
    End {
        /// Robot heading at this endpoint, in degrees.
        heading: f64,
    },
}

/// A mutable 2D control point.
///
/// The first and last control of every segment are end controls; middle
/// controls never are. Controls live in the document arena and are
/// referenced by handle from segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub uid: ControlId,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
    pub kind: ControlKind,
}

impl Control {
    /// Creates a middle (interior) control.
    pub fn new(uid: ControlId, x: f64, y: f64) -> Self {
        Self {
            uid,
            x,
            y,
            visible: true,
            kind: ControlKind::Middle,
        }
    }

    /// Creates an end control with the given heading in degrees.
    pub fn end(uid: ControlId, x: f64, y: f64, heading: f64) -> Self {
        Self {
            uid,
            x,
            y,
            visible: true,
            kind: ControlKind::End { heading },
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, ControlKind::End { .. })
    }

    /// Heading in degrees, present only on end controls.
    pub fn heading(&self) -> Option<f64> {
        match self.kind {
            ControlKind::End { heading } => Some(heading),
            ControlKind::Middle => None,
        }
    }

    /// Sets the heading on an end control; ignored for middle controls.
    pub fn set_heading(&mut self, value: f64) {
        if let ControlKind::End { heading } = &mut self.kind {
            *heading = value;
        }
    }

    pub fn pos(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    pub fn set_pos(&mut self, pos: Vector) {
        self.x = pos.x;
        self.y = pos.y;
    }

    pub fn translate(&mut self, delta: Vector) {
        self.x += delta.x;
        self.y += delta.y;
    }
}
