/// Velocity cap. Also guarantees the advancement gate fires at most once
/// per tick, since the fractional counter gains at most 1.0 per tick.
pub const MAX_SPEED: f64 = 1.0;
/// Acceleration added on a tick that saw input.
pub const ACCEL_STEP: f64 = 0.02;
/// Acceleration bled off on a tick without input while still moving.
pub const DECEL_STEP: f64 = 0.005;
/// Damping applied to velocity each integration step, in (0, 1).
pub const FRICTION: f64 = 0.8;

/// Scroll physics: discrete input activity in, continuous speed out.
/// Sustained typing ramps velocity up toward the cap; silence coasts it
/// back down on an exponential decay until it hard-stops at exactly zero.
/// Fully deterministic, so velocity traces are reproducible bit-for-bit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Motion {
    velocity: f64,
    accel: f64,
}

impl Motion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn accel(&self) -> f64 {
        self.accel
    }

    /// Advance one tick. `input` is the edge-triggered "a key fired since
    /// the last tick" flag, already folded by the engine.
    pub fn step(&mut self, input: bool) {
        if input {
            self.accel += ACCEL_STEP;
        } else if self.velocity > 0.0 {
            self.accel -= DECEL_STEP;
        } else {
            // Hard stop: no negative creep while idle.
            self.accel = 0.0;
            self.velocity = 0.0;
        }

        self.velocity += self.accel - self.velocity * FRICTION;
        self.velocity = self.velocity.clamp(0.0, MAX_SPEED);
        if self.velocity == 0.0 {
            // The loop suspends as soon as velocity hits zero, so this is
            // the last step before the next keystroke; leftover negative
            // accel must not survive into that keystroke's ramp-up.
            self.accel = 0.0;
        }
    }

    /// True once velocity has decayed to exactly zero. The engine loop
    /// suspends on this instead of spin-polling.
    pub fn is_stopped(&self) -> bool {
        self.velocity == 0.0
    }
}
