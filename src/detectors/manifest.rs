use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::utils::read_optional;
use crate::error::DetectError;

pub const PACKAGE_JSON: &str = "package.json";

/// The parts of `package.json` the detectors look at.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageManifest {
    pub dependencies: BTreeMap<String, serde_json::Value>,
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
    pub scripts: BTreeMap<String, serde_json::Value>,
}

impl PackageManifest {
    /// Loads `package.json` from `root`. Missing file is `Ok(None)`; a file
    /// that does not parse is treated like one with no dependencies.
    pub fn load(root: &Path) -> Result<Option<Self>, DetectError> {
        let Some(content) = read_optional(&root.join(PACKAGE_JSON))? else {
            return Ok(None);
        };
        Ok(Some(Self::parse(&content)))
    }

    pub fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }

    /// True if `name` is a regular or development dependency.
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }
}
