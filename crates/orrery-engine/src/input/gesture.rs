use glam::Vec2;

/// What a raw pointer event means for the camera and the picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Pointer pressed: the user may be starting to drag.
    Press,
    /// Pointer moved while pressed.
    Drag { delta: Vec2, button: u8 },
    /// Pointer released. `tap` carries the position when the press was
    /// short and still enough to count as a select.
    Release { tap: Option<Vec2> },
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Vec2,
    time_ms: f64,
    button: u8,
}

/// Splits pointer streams into drags and taps by travel and hold time.
#[derive(Debug, Clone)]
pub struct TapDetector {
    press: Option<Press>,
    last: Vec2,
    max_distance: f32,
    max_duration_ms: f64,
}

impl TapDetector {
    pub fn new(max_distance: f32, max_duration_ms: f64) -> Self {
        Self {
            press: None,
            last: Vec2::ZERO,
            max_distance,
            max_duration_ms,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn down(&mut self, pos: Vec2, button: u8, time_ms: f64) -> Gesture {
        self.press = Some(Press {
            origin: pos,
            time_ms,
            button,
        });
        self.last = pos;
        Gesture::Press
    }

    /// Moves without a press are hover and mean nothing.
    pub fn moved(&mut self, pos: Vec2) -> Option<Gesture> {
        let press = self.press?;
        let delta = pos - self.last;
        self.last = pos;
        Some(Gesture::Drag {
            delta,
            button: press.button,
        })
    }

    /// Forget the current press without producing a tap.
    pub fn cancel(&mut self) {
        self.press = None;
    }

    pub fn up(&mut self, pos: Vec2, time_ms: f64) -> Option<Gesture> {
        let press = self.press.take()?;
        let travelled = pos.distance(press.origin);
        let held = time_ms - press.time_ms;
        let tap = (travelled < self.max_distance && held < self.max_duration_ms).then_some(pos);
        Some(Gesture::Release { tap })
    }
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new(50.0, 500.0)
    }
}
