use std::fmt;

use strand_core::Trajectory;

use crate::axis::{self, UnknownColumn};

const DEFAULT_PRECISION: usize = 4;
const GAP: &str = "  ";

/// A trajectory laid out as rows of named columns.
///
/// Each row is one sample. [`Display`](fmt::Display) renders a right-aligned
/// text table with a header and a rule:
///
/// ```text
/// time  temperature
/// ----  -----------
///  0.0         10.0
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<(String, Vec<f64>)>,
    every: usize,
    precision: usize,
}

impl Table {
    /// Creates a table with `time`, every component, and every diagnostic
    /// recorded on all samples.
    #[must_use]
    pub fn new(trajectory: &Trajectory) -> Self {
        let columns = axis::all_columns(trajectory)
            .into_iter()
            .filter_map(|name| {
                let values = axis::values(trajectory, &name).ok()?;
                Some((name, values))
            })
            .collect();
        Self::from_columns(columns)
    }

    /// Creates a table with only the named columns, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] for the first name the trajectory cannot
    /// supply.
    pub fn with_columns(trajectory: &Trajectory, names: &[&str]) -> Result<Self, UnknownColumn> {
        let columns = names
            .iter()
            .map(|&name| axis::values(trajectory, name).map(|values| (name.to_owned(), values)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_columns(columns))
    }

    fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Self {
        Self {
            columns,
            every: 1,
            precision: DEFAULT_PRECISION,
        }
    }

    /// Keeps every `n`th sample, plus the last one.
    ///
    /// `n = 0` is treated as 1.
    #[must_use]
    pub fn every(mut self, n: usize) -> Self {
        self.every = n.max(1);
        self
    }

    /// Sets the number of digits after the decimal point.
    #[must_use]
    pub fn precision(mut self, digits: usize) -> Self {
        self.precision = digits;
        self
    }

    /// Returns the column names in display order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Number of rows after decimation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.row_indices().count()
    }

    /// Returns whether no rows are kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the kept rows, one value per column.
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        self.row_indices()
            .map(|row| self.columns.iter().map(|(_, values)| values[row]).collect())
    }

    fn sample_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    fn row_indices(&self) -> impl Iterator<Item = usize> + '_ {
        let count = self.sample_count();
        (0..count).filter(move |&row| row % self.every == 0 || row + 1 == count)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.precision;
        let cells: Vec<Vec<String>> = self
            .rows()
            .map(|row| row.iter().map(|v| format!("{v:.precision$}")).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(col, (name, _))| {
                cells
                    .iter()
                    .map(|row| row[col].len())
                    .fold(name.len(), usize::max)
            })
            .collect();

        write_line(f, self.headers().map(str::to_owned), &widths)?;
        write_line(f, widths.iter().map(|&width| "-".repeat(width)), &widths)?;
        for row in cells {
            write_line(f, row.into_iter(), &widths)?;
        }
        Ok(())
    }
}

fn write_line(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = String>,
    widths: &[usize],
) -> fmt::Result {
    let padded: Vec<String> = items
        .zip(widths)
        .map(|(item, &width)| format!("{item:>width$}"))
        .collect();
    writeln!(f, "{}", padded.join(GAP))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use strand_core::{Diagnostics, Sample, Schema, StateVector};

    fn cooling() -> Trajectory {
        let schema = Schema::builder().free("temperature").build().unwrap();
        let state = |t: f64, v: f64| StateVector::new(Arc::clone(&schema), t, vec![v]).unwrap();

        let mut trajectory = Trajectory::new(Sample::new(state(0.0, 10.0), None));
        trajectory.push(Sample::new(state(1.0, 20.0), None));
        trajectory.push(Sample::new(state(2.0, 40.0), None));
        trajectory
    }

    #[test]
    fn renders_an_aligned_table() {
        let table = Table::new(&cooling()).precision(1);

        let expected = "\
time  temperature
----  -----------
 0.0         10.0
 1.0         20.0
 2.0         40.0
";
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn decimation_keeps_the_last_row() {
        let schema = Schema::builder().free("x").build().unwrap();
        let state = |t: f64| StateVector::new(Arc::clone(&schema), t, vec![t]).unwrap();
        let mut trajectory = Trajectory::new(Sample::new(state(0.0), None));
        for i in 1..=10 {
            trajectory.push(Sample::new(state(f64::from(i)), None));
        }

        let table = Table::with_columns(&trajectory, &["x"]).unwrap().every(4);

        let kept: Vec<f64> = table.rows().map(|row| row[0]).collect();
        assert_eq!(kept, vec![0.0, 4.0, 8.0, 10.0]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn includes_diagnostics_recorded_on_every_sample() {
        let schema = Schema::builder().pair("x", "v").build().unwrap();
        let sample = |t: f64| {
            let state = StateVector::new(Arc::clone(&schema), t, vec![t, 1.0]).unwrap();
            Sample::new(state, Some(Diagnostics::energy(0.5, t)))
        };
        let mut trajectory = Trajectory::new(sample(0.0));
        trajectory.push(sample(0.5));

        let table = Table::new(&trajectory);

        let headers: Vec<&str> = table.headers().collect();
        assert_eq!(
            headers,
            [
                "time",
                "x",
                "v",
                "kinetic_energy",
                "potential_energy",
                "total_energy"
            ]
        );
        assert_eq!(table.rows().last().unwrap(), vec![0.5, 0.5, 1.0, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn selected_columns_keep_their_order() {
        let table = Table::with_columns(&cooling(), &["temperature", "time"]).unwrap();
        assert_eq!(table.headers().collect::<Vec<_>>(), ["temperature", "time"]);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = Table::with_columns(&cooling(), &["time", "pressure"]).unwrap_err();
        assert_eq!(err, UnknownColumn("pressure".into()));
    }
}
