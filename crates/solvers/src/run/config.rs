use thiserror::Error;

/// Step size and step limit for a single run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    dt: f64,
    max_steps: usize,
}

/// Errors detected before any stepping takes place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dt must be finite and positive")]
    TimeStep,

    #[error("max_steps must be at least 1")]
    MaxSteps,

    #[error("unknown component: {0}")]
    UnknownComponent(String),

    #[error("initial value of {component} is not finite")]
    NonFiniteInitial { component: String },

    #[error("initial time is not finite")]
    NonFiniteStartTime,

    #[error("event threshold must be finite")]
    Threshold,

    #[error("tolerance must be finite and positive")]
    Tolerance,

    #[error("end time must be finite and positive")]
    EndTime,

    #[error("initial_steps must be at least 1")]
    InitialSteps,

    #[error("target time must lie within the run")]
    TargetTime,
}

impl Config {
    /// Creates a config with a validated step.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` is not finite and positive or `max_steps` is
    /// zero.
    pub fn new(dt: f64, max_steps: usize) -> Result<Self, ConfigError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ConfigError::TimeStep);
        }
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }

        Ok(Self { dt, max_steps })
    }

    /// Creates a config that covers `duration` in `steps` equal steps.
    ///
    /// # Errors
    ///
    /// Returns an error if `duration` is not finite and positive or `steps`
    /// is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn spanning(duration: f64, steps: usize) -> Result<Self, ConfigError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ConfigError::EndTime);
        }
        if steps == 0 {
            return Err(ConfigError::MaxSteps);
        }
        Self::new(duration / steps as f64, steps)
    }

    /// Returns the fixed step size.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the maximum number of accepted steps.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rejects_bad_steps() {
        assert_eq!(Config::new(0.0, 10), Err(ConfigError::TimeStep));
        assert_eq!(Config::new(-0.1, 10), Err(ConfigError::TimeStep));
        assert_eq!(Config::new(f64::NAN, 10), Err(ConfigError::TimeStep));
        assert_eq!(Config::new(0.1, 0), Err(ConfigError::MaxSteps));
    }

    #[test]
    fn spanning_divides_the_duration() {
        let config = Config::spanning(10.0, 1000).unwrap();

        assert_relative_eq!(config.dt(), 0.01);
        assert_eq!(config.max_steps(), 1000);
        assert_eq!(Config::spanning(0.0, 10), Err(ConfigError::EndTime));
    }
}
