use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Config, ConfigError, Crossing, Direction, SchemeKind, ThresholdMonitor};

/// File-friendly description of a run.
///
/// Keys are snake_case, with camelCase aliases accepted. Unknown keys are
/// rejected.
///
/// ```toml
/// scheme = "euler-cromer"
/// dt = 0.01
/// max_steps = 10000
/// event_component = "height"
/// event_threshold = 0.0
/// event_direction = "below"
/// event_crossing = "discard"
/// track_invariants = true
/// ```
///
/// An event is configured only when both `event_component` and
/// `event_threshold` are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub scheme: SchemeKind,

    pub dt: f64,

    #[serde(alias = "maxSteps")]
    pub max_steps: usize,

    #[serde(
        default,
        alias = "eventComponent",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_component: Option<String>,

    #[serde(
        default,
        alias = "eventThreshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_threshold: Option<f64>,

    #[serde(default, alias = "eventDirection")]
    pub event_direction: Direction,

    #[serde(default, alias = "eventCrossing")]
    pub event_crossing: Crossing,

    #[serde(default, alias = "trackInvariants")]
    pub track_invariants: bool,
}

/// Errors that can occur when loading or applying [`Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("event_component and event_threshold must be given together")]
    IncompleteEvent,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Settings {
    /// Settings for a plain run with no event and no tracking.
    #[must_use]
    pub fn new(scheme: SchemeKind, dt: f64, max_steps: usize) -> Self {
        Self {
            scheme,
            dt,
            max_steps,
            event_component: None,
            event_threshold: None,
            event_direction: Direction::default(),
            event_crossing: Crossing::default(),
            track_invariants: false,
        }
    }

    /// Adds a threshold event.
    #[must_use]
    pub fn with_event(
        mut self,
        component: impl Into<String>,
        threshold: f64,
        direction: Direction,
    ) -> Self {
        self.event_component = Some(component.into());
        self.event_threshold = Some(threshold);
        self.event_direction = direction;
        self
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_owned(),
            source,
        })?;
        text.parse()
    }

    /// Builds the validated step configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` or `max_steps` is out of range.
    pub fn config(&self) -> Result<Config, ConfigError> {
        Config::new(self.dt, self.max_steps)
    }

    /// Builds the threshold monitor, if an event is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::IncompleteEvent`] if only one of the
    /// component and threshold is set.
    pub fn monitor(&self) -> Result<Option<ThresholdMonitor>, SettingsError> {
        match (&self.event_component, self.event_threshold) {
            (Some(component), Some(threshold)) => Ok(Some(ThresholdMonitor::new(
                component.clone(),
                threshold,
                self.event_direction,
                self.event_crossing,
            ))),
            (None, None) => Ok(None),
            _ => Err(SettingsError::IncompleteEvent),
        }
    }
}

impl FromStr for Settings {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
