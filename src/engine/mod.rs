pub mod keys;
pub mod lane;
pub mod motion;
pub mod world;
pub mod wpm;

use std::time::Instant;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use thiserror::Error;

use lane::{Glyph, Lane};
use motion::Motion;
use world::GlyphSet;
use wpm::WpmTracker;

/// Engine tunables. Defaults reproduce the observed feel; anything user
/// facing flows in from `Config` and is validated here at construction.
#[derive(Clone, Copy, Debug)]
pub struct EngineParams {
    /// Display width in world slots.
    pub width: usize,
    /// Fixed viewport slot the rider marker occupies.
    pub player_position: usize,
    /// Render ticks per second; also sets the tree spawn odds.
    pub fps: u32,
    /// Keystrokes per WPM round.
    pub round_size: usize,
    /// Archived rounds kept before ring eviction.
    pub history_rounds: usize,
    /// Background advances once per this many gated advances.
    pub para_cadence: u32,
    /// Cap on concurrently visible clouds.
    pub max_clouds: usize,
    /// Odometer increment per gated advance.
    pub km_per_advance: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            width: 14,
            player_position: 3,
            fps: 30,
            round_size: 200,
            history_rounds: 5,
            para_cadence: 9,
            max_clouds: 3,
            km_per_advance: 0.01,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineParamsError {
    #[error("display width must be at least 4, got {0}")]
    WidthTooSmall(usize),
    #[error("player position {position} does not fit in width {width}")]
    PlayerOutOfBounds { position: usize, width: usize },
    #[error("fps must be non-zero")]
    ZeroFps,
    #[error("round size must be non-zero")]
    ZeroRound,
    #[error("background cadence must be non-zero")]
    ZeroCadence,
}

impl EngineParams {
    pub fn validate(&self) -> Result<(), EngineParamsError> {
        if self.width < 4 {
            return Err(EngineParamsError::WidthTooSmall(self.width));
        }
        if self.player_position >= self.width {
            return Err(EngineParamsError::PlayerOutOfBounds {
                position: self.player_position,
                width: self.width,
            });
        }
        if self.fps == 0 {
            return Err(EngineParamsError::ZeroFps);
        }
        if self.round_size == 0 {
            return Err(EngineParamsError::ZeroRound);
        }
        if self.para_cadence == 0 {
            return Err(EngineParamsError::ZeroCadence);
        }
        Ok(())
    }
}

/// Read-only render contract produced once per tick. The presenter owns
/// all formatting; the engine never writes output.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub world: Vec<Glyph>,
    pub paused: bool,
    pub total_km: f64,
    pub current_wpm: f64,
    pub keys_in_round: usize,
    pub round_size: usize,
    pub last_key_glyph: Option<Glyph>,
    pub debug_text: Option<String>,
}

/// The frame engine: sole owner of all scroll, motion, and WPM state.
///
/// Two timing sources drive it. Key events arrive asynchronously through
/// `key_event`, which only sets an edge-triggered flag and appends to the
/// keystroke window. The render loop calls `tick` at a fixed rate; each
/// tick folds at most one pending key into the velocity model, runs the
/// advancement gate, updates WPM accounting, and emits a `Snapshot`.
pub struct FrameEngine {
    params: EngineParams,
    glyphs: GlyphSet,
    foreground: Lane,
    background: Lane,
    motion: Motion,
    advance_counter: f64,
    para_counter: u32,
    cloud_count: usize,
    trail_phase: u64,
    total_km: f64,
    wpm: WpmTracker,
    key_pending: bool,
    last_key_glyph: Option<Glyph>,
    paused: bool,
    debug_text: Option<String>,
    rng: SmallRng,
}

impl FrameEngine {
    pub fn new(params: EngineParams, glyphs: GlyphSet) -> Result<Self, EngineParamsError> {
        Self::with_rng(params, glyphs, SmallRng::from_entropy())
    }

    /// Deterministic construction for scenario tests.
    pub fn seeded(
        params: EngineParams,
        glyphs: GlyphSet,
        seed: u64,
    ) -> Result<Self, EngineParamsError> {
        Self::with_rng(params, glyphs, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(
        params: EngineParams,
        glyphs: GlyphSet,
        rng: SmallRng,
    ) -> Result<Self, EngineParamsError> {
        params.validate()?;
        Ok(Self {
            foreground: Lane::new(params.width),
            background: Lane::new(params.width),
            motion: Motion::new(),
            advance_counter: 0.0,
            para_counter: 0,
            cloud_count: 0,
            trail_phase: 0,
            total_km: 0.0,
            wpm: WpmTracker::new(params.round_size, params.history_rounds),
            key_pending: false,
            last_key_glyph: None,
            paused: false,
            debug_text: None,
            rng,
            params,
            glyphs,
        })
    }

    /// Input callback: one call per key event from the listener. Sets the
    /// edge-triggered flag and records the keystroke unconditionally; the
    /// pause flag never suppresses accounting, only the visual world.
    pub fn key_event(&mut self, label: &str, now: Instant) {
        self.key_pending = true;
        self.last_key_glyph = Some(keys::display_glyph(label).to_string());
        self.wpm.record(label.to_string(), now);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True when the loop may suspend: velocity decayed to exactly zero
    /// and no key event is waiting to be folded.
    pub fn is_idle(&self) -> bool {
        self.motion.is_stopped() && !self.key_pending
    }

    pub fn velocity(&self) -> f64 {
        self.motion.velocity()
    }

    pub fn total_km(&self) -> f64 {
        self.total_km
    }

    pub fn keys_in_round(&self) -> usize {
        self.wpm.keys_in_round()
    }

    pub fn current_wpm(&self) -> f64 {
        self.wpm.current_wpm()
    }

    pub fn cloud_count(&self) -> usize {
        self.cloud_count
    }

    /// Free-form diagnostic line surfaced through the snapshot.
    pub fn debug(&mut self, text: impl Into<String>) {
        self.debug_text = Some(text.into());
    }

    /// One fixed-rate frame: fold input, advance physics, run the
    /// advancement gate, update WPM, compose the world.
    pub fn tick(&mut self, now: Instant) -> Snapshot {
        // Edge-triggered: the flag is cleared the moment it is read, so a
        // single key event accelerates exactly one tick.
        let input = std::mem::take(&mut self.key_pending);

        self.motion.step(input && !self.paused);

        self.advance_counter += self.motion.velocity();
        if self.advance_counter >= 1.0 {
            self.advance_counter -= 1.0;
            self.advance_lanes();
            self.total_km += self.params.km_per_advance;
        }

        if self.motion.velocity() > world::TRAIL_THRESHOLD {
            self.trail_phase += 1;
        }

        self.wpm.update(now);

        self.snapshot()
    }

    /// One gated advance: the foreground always scrolls; the background
    /// scrolls on its slower sub-cadence with the cloud cap enforced via
    /// the evicted cell.
    fn advance_lanes(&mut self) {
        let tree_odds = self.params.fps / 2;
        let cell = (self.rng.gen_range(0..=tree_odds) == 1).then(|| self.glyphs.tree.clone());
        self.foreground.advance(cell);

        if self.para_counter == 0 {
            let drew = self.rng.gen_range(0..3) == 1;
            let spawn = drew && self.cloud_count < self.params.max_clouds;
            let cell = spawn.then(|| self.glyphs.cloud.clone());
            let evicted = self.background.advance(cell);
            if evicted.as_deref() == Some(self.glyphs.cloud.as_str()) {
                self.cloud_count -= 1;
            }
            if spawn {
                self.cloud_count += 1;
            }
        }
        self.para_counter = (self.para_counter + 1) % self.params.para_cadence;
    }

    fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            world: world::compose(
                &self.foreground,
                &self.background,
                &self.glyphs,
                self.params.player_position,
                self.motion.velocity(),
                self.trail_phase,
            ),
            paused: self.paused,
            total_km: self.total_km,
            current_wpm: self.wpm.current_wpm(),
            keys_in_round: self.wpm.keys_in_round(),
            round_size: self.wpm.round_size(),
            last_key_glyph: self.last_key_glyph.clone(),
            debug_text: self.debug_text.take(),
        }
    }
}
