use std::time::Duration;

use log::{debug, info};

use crate::config::{LoadingConfig, ResetPolicy};
use crate::steps::{self, GenerationStep};

/// Progress callback for generation
pub trait ProgressCallback: Send {
    /// Called with authoritative progress percentage (0.0 to 100.0, 0.0 = unknown)
    fn update(&mut self, progress: f64, message: &str);

    /// Check if generation should be cancelled
    fn should_cancel(&self) -> bool {
        false
    }
}

pub const DEFAULT_EXPECTED_DURATION: f64 = 90.0;

/// Simulated progress never climbs past this while the real operation runs.
pub const SIMULATED_CEILING: f64 = 95.0;

/// Fraction of the expected duration used as the curve's time constant.
const CURVE_TIME_CONSTANT: f64 = 0.4;

/// Rounded progress at which the loading screen asks the user to hang tight.
pub const PATIENCE_THRESHOLD: u8 = 90;

pub const TICK_INTERVAL: Duration = Duration::from_millis(200);
pub const FACT_INTERVAL: Duration = Duration::from_secs(8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressMode {
    Simulated,
    Real,
}

/// Display state of one entry in the step-dot row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepState {
    Done,
    Active,
    Pending,
}

/// Exponential-approach curve: `min(95, (1 - e^(-t / (d * 0.4))) * 100)`.
pub fn progress_target(elapsed_secs: f64, expected_duration_secs: f64) -> f64 {
    let elapsed = elapsed_secs.max(0.0);
    let tau = expected_duration_secs * CURVE_TIME_CONSTANT;
    ((1.0 - (-elapsed / tau).exp()) * 100.0).min(SIMULATED_CEILING)
}

/// Index of the first step whose cumulative percentage boundary exceeds `target`.
pub fn step_index_for(target: f64, steps: &[GenerationStep]) -> Option<usize> {
    let total = steps::total_weight(steps);
    let mut cumulative = 0.0;
    for (i, step) in steps.iter().enumerate() {
        cumulative += step.weight / total * 100.0;
        if target < cumulative {
            return Some(i);
        }
    }
    None
}

/// `"Xm Ys"` when at least a minute has passed, `"Ys"` otherwise. Both parts floor.
pub fn format_elapsed(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Drives the loading screen while a cookbook is being generated.
///
/// Until the generator reports real progress, the displayed percentage follows
/// [`progress_target`] and can never reach 100. Once a positive real value
/// arrives the simulator mirrors it and stops advancing on its own.
#[derive(Clone, Debug)]
pub struct ProgressSimulator {
    expected_duration: f64,
    steps: Vec<GenerationStep>,
    facts: Vec<String>,
    reset_policy: ResetPolicy,

    // None until the first tick after a restart
    start_time: Option<f64>,
    elapsed: f64,
    displayed_progress: f64,
    active_step: usize,
    fact_index: usize,
    mode: ProgressMode,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_EXPECTED_DURATION, steps::default_steps(), steps::default_facts())
    }
}

impl ProgressSimulator {
    /// Builds a simulator whose clock starts at `0.0`.
    ///
    /// Degenerate inputs fall back to defaults: a non-positive duration becomes
    /// 90 seconds, invalid steps are dropped, and an empty step list or fact pool
    /// is replaced by the built-in one.
    pub fn new(expected_duration_secs: f64, steps: Vec<GenerationStep>, facts: Vec<String>) -> Self {
        let expected_duration = if expected_duration_secs.is_finite() && expected_duration_secs > 0.0 {
            expected_duration_secs
        } else {
            DEFAULT_EXPECTED_DURATION
        };

        let mut steps: Vec<_> = steps.into_iter().filter(GenerationStep::is_valid).collect();
        if steps.is_empty() {
            steps = steps::default_steps();
        }

        let facts = if facts.is_empty() { steps::default_facts() } else { facts };

        Self {
            expected_duration,
            steps,
            facts,
            reset_policy: ResetPolicy::default(),
            start_time: Some(0.0),
            elapsed: 0.0,
            displayed_progress: 0.0,
            active_step: 0,
            fact_index: 0,
            mode: ProgressMode::Simulated,
        }
    }

    pub fn from_config(config: &LoadingConfig, reset_policy: ResetPolicy) -> Self {
        let facts = config.messages.clone().unwrap_or_default();
        let mut sim = Self::new(config.expected_duration, steps::default_steps(), facts)
            .with_reset_policy(reset_policy);
        if let Some(progress) = config.progress {
            sim.set_real_progress(progress);
        }
        sim
    }

    /// Anchors the simulation clock at `now_secs`.
    pub fn started_at(mut self, now_secs: f64) -> Self {
        self.start_time = Some(now_secs);
        self
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    pub fn with_fact_index(mut self, index: usize) -> Self {
        self.fact_index = index % self.facts.len();
        self
    }

    /// Advances the simulated curve. Does nothing once real progress took over.
    pub fn tick(&mut self, now_secs: f64) {
        if self.mode == ProgressMode::Real {
            return;
        }

        let start = *self.start_time.get_or_insert(now_secs);
        self.elapsed = (now_secs - start).max(0.0);

        let target = progress_target(self.elapsed, self.expected_duration);
        self.displayed_progress = target;

        if let Some(index) = step_index_for(target, &self.steps) {
            if index > self.active_step {
                debug!("Step {} -> {}: {}", self.active_step, index, self.steps[index].label);
                self.active_step = index;
            }
        }
    }

    /// Feeds authoritative progress from the generator.
    ///
    /// A positive value switches to real mode. A zero value only matters in real
    /// mode, where the reset policy decides whether the curve restarts.
    pub fn set_real_progress(&mut self, value: f64) {
        let value = if value.is_finite() { value.clamp(0.0, 100.0) } else { 0.0 };

        if value > 0.0 {
            if self.mode == ProgressMode::Simulated {
                info!("Real progress reported ({:.1}%), simulation disengaged", value);
                self.mode = ProgressMode::Real;
            }
            self.displayed_progress = value;
            return;
        }

        if self.mode == ProgressMode::Real && self.reset_policy == ResetPolicy::Restart {
            info!("Real progress dropped to zero, restarting simulated curve");
            self.mode = ProgressMode::Simulated;
            self.start_time = None;
            self.elapsed = 0.0;
            self.displayed_progress = 0.0;
            self.active_step = 0;
        }
    }

    /// Moves to the next fact, wrapping around the pool.
    pub fn rotate_fact(&mut self) {
        self.fact_index = (self.fact_index + 1) % self.facts.len();
    }

    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    pub fn displayed_progress(&self) -> f64 {
        self.displayed_progress
    }

    pub fn displayed_progress_rounded(&self) -> u8 {
        self.displayed_progress.round().clamp(0.0, 100.0) as u8
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    pub fn expected_duration(&self) -> f64 {
        self.expected_duration
    }

    pub fn active_step_index(&self) -> usize {
        self.active_step
    }

    pub fn fact_index(&self) -> usize {
        self.fact_index
    }

    pub fn steps(&self) -> &[GenerationStep] {
        &self.steps
    }

    pub fn facts(&self) -> &[String] {
        &self.facts
    }

    pub fn current_step(&self) -> &GenerationStep {
        &self.steps[self.active_step]
    }

    pub fn current_fact(&self) -> &str {
        &self.facts[self.fact_index]
    }

    pub fn formatted_elapsed(&self) -> String {
        format_elapsed(self.elapsed)
    }

    pub fn elapsed_label(&self) -> String {
        if self.elapsed > 0.0 {
            format!("{} elapsed", self.formatted_elapsed())
        } else {
            "Starting...".into()
        }
    }

    pub fn show_patience_hint(&self) -> bool {
        self.displayed_progress_rounded() >= PATIENCE_THRESHOLD
    }

    pub fn step_states(&self) -> Vec<StepState> {
        (0..self.steps.len())
            .map(|i| match i.cmp(&self.active_step) {
                std::cmp::Ordering::Less => StepState::Done,
                std::cmp::Ordering::Equal => StepState::Active,
                std::cmp::Ordering::Greater => StepState::Pending,
            })
            .collect()
    }
}

impl ProgressCallback for ProgressSimulator {
    fn update(&mut self, progress: f64, _message: &str) {
        self.set_real_progress(progress);
    }
}
