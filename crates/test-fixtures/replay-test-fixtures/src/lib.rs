use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "keyframe-sets")]
    keyframe_sets: HashMap<String, FixtureEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FixtureEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default, rename = "expectError")]
        expect_error: Option<String>,
    },
}

impl FixtureEntry {
    fn as_path(&self) -> &str {
        match self {
            FixtureEntry::Path(path) => path,
            FixtureEntry::Detailed { path, .. } => path,
        }
    }

    fn expected_error(&self) -> Option<&str> {
        match self {
            FixtureEntry::Path(_) => None,
            FixtureEntry::Detailed { expect_error, .. } => expect_error.as_deref(),
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Legacy keyframe-set documents.
pub mod keyframe_sets {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.keyframe_sets.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.keyframe_sets, "keyframe set", name)?;
        read_to_string(entry.as_path())
    }

    /// Raw JSON tree of the fixture, for comparing against decoded output.
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.keyframe_sets, "keyframe set", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.keyframe_sets, "keyframe set", name)?;
        Ok(resolve_path(entry.as_path()))
    }

    /// Error category the fixture is expected to fail with, if any.
    pub fn expected_error(name: &str) -> Result<Option<String>> {
        let entry = lookup(&MANIFEST.keyframe_sets, "keyframe set", name)?;
        Ok(entry.expected_error().map(str::to_string))
    }
}
