use std::sync::Arc;

use crate::{Diagnostics, Schema, StateVector};

/// One accepted point of a [`Trajectory`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub state: StateVector,
    pub diagnostics: Option<Diagnostics>,
}

impl Sample {
    #[must_use]
    pub fn new(state: StateVector, diagnostics: Option<Diagnostics>) -> Self {
        Self { state, diagnostics }
    }
}

/// The ordered, append-only record of a run.
///
/// The first sample is always the initial condition, so a trajectory is never
/// empty. Each accepted step appends one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    /// Starts a trajectory at its initial sample.
    #[must_use]
    pub fn new(initial: Sample) -> Self {
        Self::with_capacity(initial, 1)
    }

    /// Starts a trajectory with room for `capacity` samples.
    #[must_use]
    pub fn with_capacity(initial: Sample, capacity: usize) -> Self {
        let mut samples = Vec::with_capacity(capacity.max(1));
        samples.push(initial);
        Self { samples }
    }

    /// Appends an accepted sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Returns the number of samples, including the initial one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a trajectory holds at least its initial sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the initial sample.
    #[must_use]
    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    /// Returns the most recently accepted sample.
    #[must_use]
    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    /// Returns every sample in order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterates over the samples in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Returns the schema shared by every sample.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        self.first().state.schema()
    }

    /// Iterates over the states in order.
    pub fn states(&self) -> impl Iterator<Item = &StateVector> {
        self.samples.iter().map(|sample| &sample.state)
    }

    /// Returns the time of every sample.
    #[must_use]
    pub fn times(&self) -> Vec<f64> {
        self.states().map(StateVector::time).collect()
    }

    /// Returns the values of a component over time.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.schema().index_of(name)?;
        Some(self.states().map(|state| state.value(index)).collect())
    }

    /// Returns the values of a diagnostic over time.
    ///
    /// Returns `None` unless every sample carries the diagnostic.
    #[must_use]
    pub fn diagnostic_series(&self, name: &str) -> Option<Vec<f64>> {
        self.samples
            .iter()
            .map(|sample| sample.diagnostics.as_ref()?.get(name))
            .collect()
    }

    /// Linearly interpolates a component at `time`.
    ///
    /// Times before the first sample or after the last clamp to the end
    /// values. Returns `None` if the component is not in the schema or
    /// `time` is NaN.
    #[must_use]
    pub fn interpolate(&self, name: &str, time: f64) -> Option<f64> {
        let index = self.schema().index_of(name)?;
        if time.is_nan() {
            return None;
        }
        let first = &self.first().state;
        let last = &self.last().state;

        if time <= first.time() {
            return Some(first.value(index));
        }
        if time >= last.time() {
            return Some(last.value(index));
        }

        // Times increase monotonically, so the first sample past `time` bounds it.
        let upper = self.samples.partition_point(|s| s.state.time() <= time);
        let a = &self.samples[upper - 1].state;
        let b = &self.samples[upper].state;

        let span = b.time() - a.time();
        if span <= 0.0 {
            return Some(a.value(index));
        }
        let fraction = (time - a.time()) / span;
        Some(a.value(index) + fraction * (b.value(index) - a.value(index)))
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::TOTAL_ENERGY;

    fn line() -> Trajectory {
        let schema = Schema::builder().free("temperature").build().unwrap();
        let state = |t: f64, v: f64| StateVector::new(Arc::clone(&schema), t, vec![v]).unwrap();

        let mut trajectory = Trajectory::new(Sample::new(state(0.0, 10.0), None));
        trajectory.push(Sample::new(state(1.0, 20.0), None));
        trajectory.push(Sample::new(state(2.0, 40.0), None));
        trajectory
    }

    #[test]
    fn series_follow_samples() {
        let trajectory = line();
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.times(), vec![0.0, 1.0, 2.0]);
        assert_eq!(
            trajectory.series("temperature"),
            Some(vec![10.0, 20.0, 40.0])
        );
        assert_eq!(trajectory.series("pressure"), None);
    }

    #[test]
    fn interpolates_between_samples() {
        let trajectory = line();
        assert_relative_eq!(trajectory.interpolate("temperature", 0.5).unwrap(), 15.0);
        assert_relative_eq!(trajectory.interpolate("temperature", 1.0).unwrap(), 20.0);
        assert_relative_eq!(trajectory.interpolate("temperature", 1.75).unwrap(), 35.0);
    }

    #[test]
    fn nan_time_has_no_interpolant() {
        let trajectory = line();
        assert_eq!(trajectory.interpolate("temperature", f64::NAN), None);
        assert_relative_eq!(
            trajectory.interpolate("temperature", f64::INFINITY).unwrap(),
            40.0
        );
    }

    #[test]
    fn interpolation_clamps_outside_range() {
        let trajectory = line();
        assert_relative_eq!(trajectory.interpolate("temperature", -3.0).unwrap(), 10.0);
        assert_relative_eq!(trajectory.interpolate("temperature", 9.0).unwrap(), 40.0);
    }

    #[test]
    fn diagnostic_series_needs_every_sample() {
        let schema = Schema::builder().free("x").build().unwrap();
        let state = |t: f64| StateVector::new(Arc::clone(&schema), t, vec![t]).unwrap();
        let energy = |e: f64| Some(Diagnostics::new().with(TOTAL_ENERGY, e));

        let mut trajectory = Trajectory::new(Sample::new(state(0.0), energy(1.0)));
        trajectory.push(Sample::new(state(1.0), energy(2.0)));
        assert_eq!(
            trajectory.diagnostic_series(TOTAL_ENERGY),
            Some(vec![1.0, 2.0])
        );

        trajectory.push(Sample::new(state(2.0), None));
        assert_eq!(trajectory.diagnostic_series(TOTAL_ENERGY), None);
    }
}
