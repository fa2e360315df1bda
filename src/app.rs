//! Frame-to-tick scheduling.
//!
//! The simulation runs at a fixed logical tick rate regardless of how often
//! the caller gets around to driving it. Wall-clock time is accumulated and
//! converted into whole ticks; a long frame catches up with several ticks in
//! a row and the remainder carries over.

use crate::model::config::AppConfig;
use crate::model::observer::WorldHooks;
use crate::model::stats::PopulationStats;
use crate::model::world::{LiveEvent, World};
use anyhow::Result;

pub struct Simulation {
    world: World,
    running: bool,
    /// Wall-clock milliseconds accumulated toward the next tick.
    elapsed_ms: f64,
}

impl Simulation {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            world: World::new(config)?,
            running: false,
            elapsed_ms: 0.0,
        })
    }

    pub fn with_hooks(config: AppConfig, hooks: Box<dyn WorldHooks>) -> Result<Self> {
        Ok(Self {
            world: World::with_hooks(config, hooks)?,
            running: false,
            elapsed_ms: 0.0,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts (or resumes) ticking. The accumulator is cleared so that time
    /// spent paused never converts into catch-up ticks.
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed_ms = 0.0;
    }

    /// Pauses ticking. World state is left exactly as it was.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Discards the current run and reseeds the world from the config.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed_ms = 0.0;
        self.world.reset();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &AppConfig {
        &self.world.config
    }

    /// Mutable access for runtime tuning. Initial counts, the seed, and the
    /// world dimensions only take effect on the next [`Self::reset`].
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.world.config
    }

    pub fn stats(&self) -> &PopulationStats {
        &self.world.stats
    }

    /// Toggles the vision-cone debug overlay on the render hooks.
    pub fn set_overlay_visibility(&mut self, visible: bool) {
        self.world.set_overlay_visibility(visible);
    }

    /// Feeds `frame_delta_ms` of wall-clock time into the accumulator and
    /// runs every tick that fits. Returns the events from all ticks run, in
    /// order. Does nothing while paused.
    pub fn advance(&mut self, frame_delta_ms: f64) -> Vec<LiveEvent> {
        if !self.running {
            return Vec::new();
        }
        self.elapsed_ms += frame_delta_ms;
        let tick_duration = self.world.config.simulation.tick_duration_ms;
        let mut events = Vec::new();
        if self.elapsed_ms > tick_duration {
            let ticks = (self.elapsed_ms / tick_duration).floor() as u64;
            for _ in 0..ticks {
                events.extend(self.world.update());
            }
            self.elapsed_ms %= tick_duration;
        }
        events
    }
}
