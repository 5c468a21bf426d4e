//! The single authoritative animation clock.
//!
//! Time only advances while Running. Every orbit position in the scene is a
//! function of [`AnimationClock::time_ms`], so nothing else keeps its own time.

/// Where the session is in its one-way start-up sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadPhase {
    /// Waiting for textures. Only the loading ring animates.
    Loading,
    /// Everything resolved; the loading screen is hidden and the scene is
    /// revealed after a short delay.
    Revealing { remaining_ms: f64 },
    Running,
}

/// Transition reported by [`AnimationClock::poll_loading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTransition {
    /// The loading screen should be torn down.
    Hidden,
    /// The main loop starts. `forced` when the maximum wait ran out.
    Running { forced: bool },
}

#[derive(Debug, Clone)]
pub struct AnimationClock {
    phase: LoadPhase,
    time_ms: f64,
    /// Time spent outside Running, for the timeout.
    waited_ms: f64,
    frame: u64,
    timeout_ms: f64,
    reveal_ms: f64,
}

impl AnimationClock {
    pub fn new(timeout_ms: f64, reveal_ms: f64) -> Self {
        Self {
            phase: LoadPhase::Loading,
            time_ms: 0.0,
            waited_ms: 0.0,
            frame: 0,
            timeout_ms,
            reveal_ms,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Loading or revealing: body positions are frozen.
    pub fn is_loading(&self) -> bool {
        !self.is_running()
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoadPhase::Running
    }

    /// Monotonic animation time in milliseconds.
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Logical frames advanced while Running.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Step the start-up sequence by one logical frame.
    pub fn poll_loading(&mut self, dt_ms: f64, all_resolved: bool) -> Option<LoadTransition> {
        self.waited_ms += dt_ms;
        match self.phase {
            LoadPhase::Running => None,
            LoadPhase::Loading if all_resolved => {
                if self.reveal_ms <= 0.0 {
                    self.phase = LoadPhase::Running;
                    return Some(LoadTransition::Running { forced: false });
                }
                self.phase = LoadPhase::Revealing {
                    remaining_ms: self.reveal_ms,
                };
                Some(LoadTransition::Hidden)
            }
            LoadPhase::Loading | LoadPhase::Revealing { .. } if self.waited_ms >= self.timeout_ms => {
                self.phase = LoadPhase::Running;
                Some(LoadTransition::Running { forced: true })
            }
            LoadPhase::Loading => None,
            LoadPhase::Revealing { remaining_ms } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms <= 0.0 {
                    self.phase = LoadPhase::Running;
                    Some(LoadTransition::Running { forced: false })
                } else {
                    self.phase = LoadPhase::Revealing { remaining_ms };
                    None
                }
            }
        }
    }

    /// Advance the clock by one logical frame. No-op unless Running.
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        if self.is_running() {
            self.time_ms += dt_ms;
            self.frame += 1;
        }
        self.time_ms
    }

    /// Skip the start-up sequence (headless runs, tests).
    pub fn start_running(&mut self) {
        self.phase = LoadPhase::Running;
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(10_000.0, 1_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1000.0 / 60.0;

    #[test]
    fn time_frozen_while_loading() {
        let mut clock = AnimationClock::default();
        for _ in 0..10 {
            clock.poll_loading(FRAME, false);
            clock.advance(FRAME);
        }
        assert_eq!(clock.time_ms(), 0.0);
        assert!(clock.is_loading());
    }

    #[test]
    fn resolved_textures_reveal_then_run() {
        let mut clock = AnimationClock::default();
        assert_eq!(clock.poll_loading(FRAME, true), Some(LoadTransition::Hidden));
        let mut frames = 0;
        let outcome = loop {
            frames += 1;
            if let Some(t) = clock.poll_loading(FRAME, true) {
                break t;
            }
        };
        assert_eq!(outcome, LoadTransition::Running { forced: false });
        // 1000 ms reveal at 60 fps.
        assert!((60..=61).contains(&frames), "revealed after {} frames", frames);
        assert!(clock.is_running());
    }

    #[test]
    fn timeout_forces_running() {
        let mut clock = AnimationClock::default();
        let mut waited = 0.0;
        let outcome = loop {
            waited += FRAME;
            if let Some(t) = clock.poll_loading(FRAME, false) {
                break t;
            }
        };
        assert_eq!(outcome, LoadTransition::Running { forced: true });
        assert!((waited - 10_000.0).abs() < FRAME, "waited {}", waited);
    }

    #[test]
    fn transition_is_one_way() {
        let mut clock = AnimationClock::new(100.0, 0.0);
        assert_eq!(
            clock.poll_loading(FRAME, true),
            Some(LoadTransition::Running { forced: false })
        );
        assert_eq!(clock.poll_loading(FRAME, false), None);
        assert!(clock.is_running());
    }

    #[test]
    fn advance_counts_frames() {
        let mut clock = AnimationClock::default();
        clock.start_running();
        for _ in 0..3 {
            clock.advance(FRAME);
        }
        assert_eq!(clock.frame(), 3);
        assert!((clock.time_ms() - 3.0 * FRAME).abs() < 1e-9);
    }
}
