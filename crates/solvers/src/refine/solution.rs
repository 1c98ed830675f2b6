use crate::Solution;

/// Indicates whether refinement converged or ran out of halvings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefineStatus {
    /// Two successive estimates agreed within the tolerance.
    Converged,

    /// Reached the refinement limit without converging.
    MaxRefinementsReached,
}

/// The observable's value from one complete run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub dt: f64,
    pub value: f64,
}

/// The result of step-halving refinement.
#[derive(Debug, Clone)]
pub struct Refined {
    /// Final refinement status.
    pub status: RefineStatus,

    /// Estimate from the finest run.
    pub value: f64,

    /// Absolute change from the previous estimate, infinite after one run.
    pub change: f64,

    /// Number of times the step was halved.
    pub refinements: usize,

    /// Every estimate, coarsest first.
    pub history: Vec<Estimate>,

    /// The finest run.
    pub solution: Solution,
}

impl Refined {
    /// Step size of the finest run.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.history.last().map_or(f64::NAN, |estimate| estimate.dt)
    }
}
