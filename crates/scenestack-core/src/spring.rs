#![forbid(unsafe_code)]

//! Spring integration.
//!
//! The navigator treats its progress value as a physical spring: a mass on a
//! damped spring pulled toward an end value. [`Spring`] is the contract the
//! navigator drives; [`ReboundSpring`] implements it with a fixed-step RK4
//! integrator, which is enough for any host that has no integrator of its own.
//!
//! # Contract
//!
//! - `set_current_value(v)` jumps the value to `v` and leaves the spring at
//!   rest there (end value = `v`, velocity = 0). It reports nothing; callers
//!   that mirror the value into a view must do so themselves.
//! - `set_end_value(v)` starts the spring moving toward `v` unless it is
//!   already at rest at `v`.
//! - `advance(dt)` integrates `dt` of simulated time and reports whether the
//!   value moved and whether the spring came to rest during this step.
//!   A spring that comes to rest snaps to exactly its end value.
//! - With overshoot clamping enabled, crossing the end value counts as
//!   coming to rest.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `dt` larger than 64ms | Clamped to 64ms to keep the solver stable |
//! | `dt` of zero | Accumulates nothing, reports the current state |
//! | Zero tension | Comes to rest wherever friction stops it |

use web_time::Duration;

/// Fixed integration step for the RK4 solver, in seconds.
const SOLVER_TIMESTEP_SEC: f64 = 0.001;

/// Largest `dt` honored in one `advance` call, in seconds.
const MAX_DELTA_TIME_SEC: f64 = 0.064;

/// Default displacement below which a slow spring counts as settled.
const DEFAULT_REST_DISPLACEMENT: f64 = 0.001;

/// Default speed below which a close spring counts as settled.
const DEFAULT_REST_SPEED: f64 = 0.001;

/// Spring constants.
///
/// Values are in integrator units, not Origami units; use
/// [`SpringConfig::from_origami`] to convert designer-facing values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    /// Damping coefficient.
    pub friction: f64,
    /// Stiffness coefficient.
    pub tension: f64,
}

impl SpringConfig {
    /// Create a config from integrator-unit friction and tension.
    #[must_use]
    pub const fn new(friction: f64, tension: f64) -> Self {
        Self { friction, tension }
    }

    /// Convert Origami-style tension and friction into integrator units.
    #[must_use]
    pub fn from_origami(tension: f64, friction: f64) -> Self {
        Self {
            friction: (friction - 8.0) * 3.0 + 25.0,
            tension: (tension - 30.0) * 3.62 + 194.0,
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(26.0, 200.0)
    }
}

/// Outcome of one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpringTick {
    /// The value was integrated during this step.
    pub moved: bool,
    /// The spring settled during this step.
    pub came_to_rest: bool,
}

/// Scalar spring integrator driven by the navigator.
///
/// See the module documentation for the behavioral contract.
pub trait Spring {
    /// Current value.
    fn current_value(&self) -> f64;

    /// Value the spring is moving toward.
    fn end_value(&self) -> f64;

    /// Current velocity.
    fn velocity(&self) -> f64;

    /// Jump to `value` and come to rest there.
    fn set_current_value(&mut self, value: f64);

    /// Stop at the current value.
    fn set_at_rest(&mut self);

    /// Start moving toward `value`.
    fn set_end_value(&mut self, value: f64);

    /// Set the velocity, waking the spring.
    fn set_velocity(&mut self, velocity: f64);

    /// Treat crossing the end value as settling.
    fn set_overshoot_clamping_enabled(&mut self, enabled: bool);

    /// Mutable access to friction and tension.
    fn config_mut(&mut self) -> &mut SpringConfig;

    /// Speed below which the spring may settle.
    fn set_rest_speed_threshold(&mut self, threshold: f64);

    /// Distance from the end value within which the spring may settle.
    fn set_rest_displacement_threshold(&mut self, threshold: f64);

    /// Whether the spring is settled.
    fn is_at_rest(&self) -> bool;

    /// Integrate `dt` of simulated time.
    fn advance(&mut self, dt: Duration) -> SpringTick;
}

/// RK4 spring integrator with rest detection and overshoot clamping.
#[derive(Debug, Clone)]
pub struct ReboundSpring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    start_value: f64,
    end_value: f64,
    overshoot_clamping: bool,
    rest_speed_threshold: f64,
    rest_displacement_threshold: f64,
    time_accumulator: f64,
    was_at_rest: bool,
}

impl Default for ReboundSpring {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}

impl ReboundSpring {
    /// Create a spring at rest at zero.
    #[must_use]
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            position: 0.0,
            velocity: 0.0,
            start_value: 0.0,
            end_value: 0.0,
            overshoot_clamping: false,
            rest_speed_threshold: DEFAULT_REST_SPEED,
            rest_displacement_threshold: DEFAULT_REST_DISPLACEMENT,
            time_accumulator: 0.0,
            was_at_rest: true,
        }
    }

    /// Set the displacement below which a slow spring counts as settled.
    #[must_use]
    pub fn with_rest_displacement_threshold(mut self, threshold: f64) -> Self {
        self.rest_displacement_threshold = threshold;
        self
    }

    /// Whether the spring has crossed its end value.
    #[must_use]
    pub fn is_overshooting(&self) -> bool {
        self.config.tension > 0.0
            && ((self.start_value < self.end_value && self.position > self.end_value)
                || (self.start_value > self.end_value && self.position < self.end_value))
    }

    fn is_settled(&self) -> bool {
        self.velocity.abs() < self.rest_speed_threshold
            && ((self.end_value - self.position).abs() <= self.rest_displacement_threshold
                || self.config.tension == 0.0)
    }

    fn acceleration(&self, position: f64, velocity: f64) -> f64 {
        self.config.tension * (self.end_value - position) - self.config.friction * velocity
    }

    fn step(&mut self, h: f64) {
        let (x, v) = (self.position, self.velocity);

        let a_v = v;
        let a_a = self.acceleration(x, v);

        let b_v = v + a_a * h * 0.5;
        let b_a = self.acceleration(x + a_v * h * 0.5, b_v);

        let c_v = v + b_a * h * 0.5;
        let c_a = self.acceleration(x + b_v * h * 0.5, c_v);

        let d_v = v + c_a * h;
        let d_a = self.acceleration(x + c_v * h, d_v);

        let dxdt = (a_v + 2.0 * (b_v + c_v) + d_v) / 6.0;
        let dvdt = (a_a + 2.0 * (b_a + c_a) + d_a) / 6.0;

        self.position += dxdt * h;
        self.velocity += dvdt * h;
    }
}

impl Spring for ReboundSpring {
    fn current_value(&self) -> f64 {
        self.position
    }

    fn end_value(&self) -> f64 {
        self.end_value
    }

    fn velocity(&self) -> f64 {
        self.velocity
    }

    fn set_current_value(&mut self, value: f64) {
        self.start_value = value;
        self.position = value;
        self.set_at_rest();
    }

    fn set_at_rest(&mut self) {
        self.end_value = self.position;
        self.velocity = 0.0;
        self.time_accumulator = 0.0;
        self.was_at_rest = true;
    }

    fn set_end_value(&mut self, value: f64) {
        if self.end_value == value && self.is_settled() {
            return;
        }
        self.start_value = self.position;
        self.end_value = value;
        self.was_at_rest = false;
    }

    fn set_velocity(&mut self, velocity: f64) {
        if velocity == self.velocity {
            return;
        }
        self.velocity = velocity;
        self.was_at_rest = false;
    }

    fn set_overshoot_clamping_enabled(&mut self, enabled: bool) {
        self.overshoot_clamping = enabled;
    }

    fn config_mut(&mut self) -> &mut SpringConfig {
        &mut self.config
    }

    fn set_rest_speed_threshold(&mut self, threshold: f64) {
        self.rest_speed_threshold = threshold;
    }

    fn set_rest_displacement_threshold(&mut self, threshold: f64) {
        self.rest_displacement_threshold = threshold;
    }

    fn is_at_rest(&self) -> bool {
        self.was_at_rest
    }

    fn advance(&mut self, dt: Duration) -> SpringTick {
        if self.was_at_rest && self.is_settled() {
            return SpringTick::default();
        }

        self.time_accumulator += dt.as_secs_f64().min(MAX_DELTA_TIME_SEC);
        while self.time_accumulator >= SOLVER_TIMESTEP_SEC {
            self.time_accumulator -= SOLVER_TIMESTEP_SEC;
            self.step(SOLVER_TIMESTEP_SEC);
        }

        let settled = self.is_settled() || (self.overshoot_clamping && self.is_overshooting());
        if settled {
            if self.config.tension > 0.0 {
                self.start_value = self.end_value;
                self.position = self.end_value;
            } else {
                self.end_value = self.position;
                self.start_value = self.end_value;
            }
            self.velocity = 0.0;
            self.time_accumulator = 0.0;
        }

        let came_to_rest = settled && !self.was_at_rest;
        self.was_at_rest = settled;
        SpringTick {
            moved: true,
            came_to_rest,
        }
    }
}
