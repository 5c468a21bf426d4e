/// Input event types the engine understands.
/// Pointer coordinates are viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began. `button` 0 orbits the camera, 2 pans it.
    PointerDown { x: f32, y: f32, button: u8, time_ms: f64 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32, time_ms: f64 },
    /// A touch/cursor moved.
    PointerMove { x: f32, y: f32 },
    /// The press ended without a release (pointer left the canvas, touch
    /// interrupted, focus lost).
    PointerCancel,
    /// Wheel or pinch zoom. Positive moves away from the target.
    Wheel { delta: f32 },
    /// A select gesture already recognized by the host.
    Select { x: f32, y: f32 },
    /// A command from the UI layer (menu buttons, etc.).
    /// `kind` identifies the command; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Pending UI commands as `(kind, a, b, c)`.
    pub fn commands(&self) -> impl Iterator<Item = (u32, f32, f32, f32)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            InputEvent::Custom { kind, a, b, c } => Some((kind, a, b, c)),
            _ => None,
        })
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, button: 0, time_ms: 0.0 });
        q.push(InputEvent::Wheel { delta: 0.1 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn commands_filter_custom_events() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        let cmds: Vec<_> = q.commands().collect();
        assert_eq!(cmds, vec![(7, 1.5, 2.5, 3.5)]);
        assert_eq!(q.len(), 2);
    }
}
