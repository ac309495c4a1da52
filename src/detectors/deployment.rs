use std::path::Path;

use super::manifest::PackageManifest;
use super::utils::{contains_ci, read_optional};
use super::{Detector, Signals};
use crate::error::DetectError;

/// Well-known paths and the deployment tag each implies.
pub const DEPLOYMENT_MARKERS: &[(&str, &str)] = &[
    ("Dockerfile", "docker"),
    ("docker-compose.yml", "docker-compose"),
    ("docker-compose.yaml", "docker-compose"),
    ("Procfile", "heroku"),
    ("fly.toml", "fly.io"),
    ("vercel.json", "vercel"),
    ("netlify.toml", "netlify"),
    ("app.yaml", "gcp"),
    ("serverless.yml", "serverless"),
    ("serverless.yaml", "serverless"),
    ("bin/deploy", "deploy-script"),
    (".github/workflows", "github-actions"),
    (".circleci", "circleci"),
];

pub struct DeploymentDetector;

impl Detector for DeploymentDetector {
    fn name(&self) -> &'static str {
        "deployment"
    }

    fn detect(&self, root: &Path, signals: &mut Signals) -> Result<(), DetectError> {
        signals.deployment = detect_deployment(root)?;
        Ok(())
    }
}

pub fn detect_deployment(root: &Path) -> Result<Vec<String>, DetectError> {
    let mut tags: Vec<&str> = Vec::new();
    let mut add = |tag: &'static str| {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    };

    for &(marker, tag) in DEPLOYMENT_MARKERS {
        if root.join(marker).exists() {
            add(tag);
        }
    }

    if PackageManifest::load(root)?.is_some_and(|m| m.has_script("deploy")) {
        add("npm-deploy");
    }

    if read_optional(&root.join("README.md"))?.is_some_and(|readme| contains_ci(&readme, "deploy")) {
        add("readme-deploy");
    }

    Ok(tags.into_iter().map(str::to_string).collect())
}
