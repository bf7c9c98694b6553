#![warn(clippy::all, clippy::pedantic)]

//! The mode controller: a timer-driven alternator that flips the game
//! between its normal and chaotic personalities, independent of anything the
//! player does.

use bevy_ecs::prelude::*;

use crate::game::CHAOTIC_MODE_FACTOR;

/// Top-level game personality, alternated on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobalMode {
    #[default]
    Normal,
    Chaotic,
}

impl GlobalMode {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Normal => Self::Chaotic,
            Self::Chaotic => Self::Normal,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Chaotic => "CHAOTIC",
        }
    }
}

/// Input perturbation active only while the global mode is chaotic. At most
/// one at a time, enforced by this being an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    #[default]
    None,
    Inverted,
    Reroll,
    Double,
}

impl ControlMode {
    /// Uniform roll over the three chaotic perturbations.
    #[must_use]
    pub fn roll(rng: &mut fastrand::Rng) -> Self {
        match rng.usize(0..3) {
            0 => Self::Inverted,
            1 => Self::Reroll,
            _ => Self::Double,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Inverted => "inverted controls",
            Self::Reroll => "rotation rerolls the piece",
            Self::Double => "every input fires twice",
        }
    }
}

/// Owns the recurring single-shot mode timer. The timer only advances while
/// armed; pause and game over disarm it, so a resume always starts a fresh
/// interval with no carried-over progress. `generation` is bumped on every
/// arm/disarm so a deadline computed under an old schedule can never fire.
#[derive(Resource, Debug)]
pub struct ModeController {
    pub global: GlobalMode,
    pub control: ControlMode,
    normal_duration_ms: u64,
    timer_ms: f64,
    armed: bool,
    generation: u64,
}

impl ModeController {
    #[must_use]
    pub fn new(normal_duration_ms: u64) -> Self {
        Self {
            global: GlobalMode::Normal,
            control: ControlMode::None,
            normal_duration_ms,
            timer_ms: 0.0,
            armed: false,
            generation: 0,
        }
    }

    /// Duration of the interval currently being waited out. Chaotic
    /// stretches run exactly twice as long as normal ones.
    #[must_use]
    pub fn current_duration_ms(&self) -> u64 {
        match self.global {
            GlobalMode::Normal => self.normal_duration_ms,
            GlobalMode::Chaotic => self.normal_duration_ms * CHAOTIC_MODE_FACTOR,
        }
    }

    /// Starts a fresh interval for the current mode.
    pub fn arm(&mut self) {
        self.generation += 1;
        self.timer_ms = 0.0;
        self.armed = true;
    }

    /// Cancels the pending firing. Any elapsed progress is discarded.
    pub fn disarm(&mut self) {
        self.generation += 1;
        self.armed = false;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Back to normal mode with no perturbation and no pending firing.
    pub fn reset(&mut self) {
        self.global = GlobalMode::Normal;
        self.control = ControlMode::None;
        self.disarm();
    }

    /// Advances the timer; returns true when the current interval has
    /// elapsed and the mode should flip. A disarmed controller never fires.
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        if !self.armed {
            return false;
        }
        self.timer_ms += delta_ms;
        self.timer_ms >= self.current_duration_ms() as f64
    }

    /// Flips the global mode and reschedules using the new mode's duration.
    /// Entering normal clears the control perturbation; entering chaotic
    /// leaves the roll to the caller, which owns the randomness source.
    pub fn flip(&mut self) {
        self.global = self.global.flipped();
        if self.global == GlobalMode::Normal {
            self.control = ControlMode::None;
        }
        self.timer_ms = 0.0;
    }

    #[must_use]
    pub fn is_chaotic(&self) -> bool {
        self.global == GlobalMode::Chaotic
    }

    /// True when `control` is in force, i.e. set and the game is chaotic.
    #[must_use]
    pub fn control_active(&self, control: ControlMode) -> bool {
        self.is_chaotic() && self.control == control
    }
}
