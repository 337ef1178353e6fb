//! Fixture loading.
//!
//! A fixture is a static, pre-recorded payload substituted for a live
//! network response. Fixtures live as plain files under `fixtures/`.

use crate::result::{VitrinaError, VitrinaResult};
use crate::stub::StubResponse;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Directory of fixture files
#[derive(Debug, Clone)]
pub struct FixtureDir {
    root: PathBuf,
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self {
            root: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures")),
        }
    }
}

impl FixtureDir {
    /// Use the crate's `fixtures/` directory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom root directory
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a fixture file's raw bytes
    pub fn read(&self, name: &str) -> VitrinaResult<Vec<u8>> {
        let path = self.root.join(name);
        std::fs::read(&path).map_err(|e| VitrinaError::Fixture {
            name: name.to_string(),
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Load and deserialize a JSON fixture
    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> VitrinaResult<T> {
        let bytes = self.read(name)?;
        serde_json::from_slice(&bytes).map_err(|e| VitrinaError::Fixture {
            name: name.to_string(),
            message: format!("invalid JSON: {e}"),
        })
    }

    /// Build a 200 JSON stub response from a fixture file
    pub fn stub_response(&self, name: &str) -> VitrinaResult<StubResponse> {
        Ok(StubResponse::json_bytes(self.read(name)?))
    }
}
