use crate::StateVector;

pub const KINETIC_ENERGY: &str = "kinetic_energy";
pub const POTENTIAL_ENERGY: &str = "potential_energy";
pub const TOTAL_ENERGY: &str = "total_energy";
pub const ANGULAR_MOMENTUM: &str = "angular_momentum";

/// Named scalar diagnostics computed from a single state.
///
/// Entries keep their insertion order so tables and plots list them
/// predictably. Diagnostics are built once and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<(String, f64)>,
}

impl Diagnostics {
    /// Creates empty diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates diagnostics holding kinetic, potential, and total energy.
    #[must_use]
    pub fn energy(kinetic: f64, potential: f64) -> Self {
        Self::new()
            .with(KINETIC_ENERGY, kinetic)
            .with(POTENTIAL_ENERGY, potential)
            .with(TOTAL_ENERGY, kinetic + potential)
    }

    /// Returns these diagnostics with one more entry.
    ///
    /// An existing entry with the same name is replaced in place.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Returns the named entry.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    /// Returns the total energy entry, if present.
    #[must_use]
    pub fn total_energy(&self) -> Option<f64> {
        self.get(TOTAL_ENERGY)
    }

    /// Iterates over entry names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(name, value)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes conserved or otherwise diagnostic quantities from a state.
///
/// Trackers capture their physical constants at construction and are pure
/// reads: they never influence integration.
pub trait InvariantTracker {
    fn record(&self, state: &StateVector) -> Diagnostics;
}

/// Blanket implementation for tracker closures.
impl<F> InvariantTracker for F
where
    F: Fn(&StateVector) -> Diagnostics,
{
    fn record(&self, state: &StateVector) -> Diagnostics {
        self(state)
    }
}

/// A no-op tracker that records nothing.
impl InvariantTracker for () {
    fn record(&self, _state: &StateVector) -> Diagnostics {
        Diagnostics::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn energy_includes_total() {
        let diagnostics = Diagnostics::energy(3.0, -5.0);

        assert_relative_eq!(diagnostics.get(KINETIC_ENERGY).unwrap(), 3.0);
        assert_relative_eq!(diagnostics.total_energy().unwrap(), -2.0);
        assert_eq!(
            diagnostics.names().collect::<Vec<_>>(),
            vec![KINETIC_ENERGY, POTENTIAL_ENERGY, TOTAL_ENERGY]
        );
    }

    #[test]
    fn with_replaces_existing_entries() {
        let diagnostics = Diagnostics::new()
            .with(ANGULAR_MOMENTUM, 1.0)
            .with("spin", 2.0)
            .with(ANGULAR_MOMENTUM, 4.0);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.get(ANGULAR_MOMENTUM), Some(4.0));
        assert_eq!(diagnostics.get("missing"), None);
    }
}
