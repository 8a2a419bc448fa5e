//! Pointer input events for touch, stylus and mouse

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pointer action of a single event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PointerAction {
    /// Pointer went down (touch started, button pressed)
    Down,
    /// Pointer moved while down
    Move,
    /// Pointer went up (touch ended, button released)
    Up,
    /// Gesture was cancelled by the system
    Cancel,
}

impl PointerAction {
    pub fn is_down(&self) -> bool {
        matches!(self, PointerAction::Down)
    }

    pub fn is_up(&self) -> bool {
        matches!(self, PointerAction::Up)
    }
}

/// Device class that produced a pointer event
///
/// Stylus input is treated differently by the wheel scroller: scrolling
/// only starts after a short delay so taps and strokes are not mistaken
/// for drags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ToolType {
    /// Platform did not report a tool
    Unknown,
    /// Finger on a touchscreen
    #[default]
    Finger,
    /// Stylus tip
    Stylus,
    /// Mouse or trackpad pointer
    Mouse,
    /// Stylus eraser end
    Eraser,
}

impl ToolType {
    /// Map an Android `MotionEvent.getToolType()` code
    pub fn from_android(code: i32) -> Self {
        match code {
            1 => ToolType::Finger,
            2 => ToolType::Stylus,
            3 => ToolType::Mouse,
            4 => ToolType::Eraser,
            _ => ToolType::Unknown,
        }
    }

    /// Returns true for stylus input (tip only, erasers scroll immediately)
    pub fn is_stylus(&self) -> bool {
        matches!(self, ToolType::Stylus)
    }
}

/// A single pointer sample
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointerEvent {
    /// What happened
    pub action: PointerAction,
    /// X position in view coordinates
    pub x: f32,
    /// Y position in view coordinates
    pub y: f32,
    /// Device class
    #[cfg_attr(feature = "serde", serde(default))]
    pub tool: ToolType,
    /// Event time in milliseconds
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(action: PointerAction, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            action,
            x,
            y,
            tool: ToolType::Finger,
            time_ms,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Down, x, y, time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Move, x, y, time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Up, x, y, time_ms)
    }

    pub fn cancel(time_ms: u64) -> Self {
        Self::new(PointerAction::Cancel, 0.0, 0.0, time_ms)
    }

    /// Set the tool that produced this event
    pub fn with_tool(mut self, tool: ToolType) -> Self {
        self.tool = tool;
        self
    }

    /// Position as an `(x, y)` pair
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}
