use crate::ConfigError;

/// Configuration for step-halving refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineConfig {
    t_end: f64,
    initial_steps: usize,
    target_time: f64,
    tolerance: f64,
    max_refinements: usize,
}

impl RefineConfig {
    pub const DEFAULT_TOLERANCE: f64 = 0.01;
    pub const DEFAULT_MAX_REFINEMENTS: usize = 20;

    /// Creates a config that integrates over `t_end` starting with
    /// `initial_steps` steps and watches the observable at `target_time`.
    ///
    /// Times are measured from the initial state's time.
    ///
    /// # Errors
    ///
    /// Returns an error if `t_end` is not finite and positive,
    /// `initial_steps` is zero, or `target_time` is outside `[0, t_end]`.
    pub fn new(t_end: f64, initial_steps: usize, target_time: f64) -> Result<Self, ConfigError> {
        if !t_end.is_finite() || t_end <= 0.0 {
            return Err(ConfigError::EndTime);
        }
        if initial_steps == 0 {
            return Err(ConfigError::InitialSteps);
        }
        if !(0.0..=t_end).contains(&target_time) {
            return Err(ConfigError::TargetTime);
        }

        Ok(Self {
            t_end,
            initial_steps,
            target_time,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_refinements: Self::DEFAULT_MAX_REFINEMENTS,
        })
    }

    /// Sets the absolute change below which successive estimates agree.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is not finite and positive.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    /// Sets how many times the step may be halved.
    #[must_use]
    pub fn with_max_refinements(mut self, max_refinements: usize) -> Self {
        self.max_refinements = max_refinements;
        self
    }

    /// Returns the duration of every run.
    #[must_use]
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// Returns the step count of the coarsest run.
    #[must_use]
    pub fn initial_steps(&self) -> usize {
        self.initial_steps
    }

    /// Returns the time at which the observable is read.
    #[must_use]
    pub fn target_time(&self) -> f64 {
        self.target_time
    }

    /// Returns the change between estimates that counts as converged.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the maximum number of halvings.
    #[must_use]
    pub fn max_refinements(&self) -> usize {
        self.max_refinements
    }
}
