//! Shared fixtures for the cross-crate tests.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use strand_core::{DerivativeLaw, DomainError, Rates, Schema, SchemaError, StateError, StateVector};

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

/// A settings file in the temp directory, removed on drop.
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// Writes `contents` to a fresh file.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn new(contents: &str) -> Self {
        let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("strand-{}-{n}.toml", std::process::id()));
        fs::write(&path, contents).expect("temp dir should be writable");
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SettingsFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// `dx/dt = x²`, which blows up at `t = 1 / x0`.
pub struct Blowup {
    schema: Arc<Schema>,
}

impl Blowup {
    /// # Errors
    ///
    /// Never fails for this law's single component.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            schema: Schema::builder().free("x").build()?,
        })
    }

    /// # Errors
    ///
    /// Never fails for this law's schema.
    pub fn state(&self, x0: f64) -> Result<StateVector, StateError> {
        StateVector::new(Arc::clone(&self.schema), 0.0, vec![x0])
    }
}

impl DerivativeLaw for Blowup {
    fn rates(&self, state: &StateVector, _time: f64) -> Result<Rates, DomainError> {
        let x = state.value(0);
        Ok(Rates::from([x * x]))
    }
}
