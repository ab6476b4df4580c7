//! Pipeline configuration, loaded from environment variables.

use std::path::{Path, PathBuf};

const DEFAULT_RUST_IMAGE: &str = "rust:1-bookworm";
const DEFAULT_EXCLUDE: &str = "target/,.git/";

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Base image the toolchain is installed into.
    pub rust_image: String,
    /// Host paths left out of the uploaded source tree.
    pub exclude: Vec<String>,
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let rust_image =
            std::env::var("CI_RUST_IMAGE").unwrap_or_else(|_| DEFAULT_RUST_IMAGE.to_string());
        let exclude = std::env::var("CI_SOURCE_EXCLUDE")
            .map(|s| parse_list(&s))
            .unwrap_or_else(|_| parse_list(DEFAULT_EXCLUDE));

        if rust_image.trim().is_empty() {
            tracing::warn!("CI_RUST_IMAGE is empty -- falling back to {DEFAULT_RUST_IMAGE}");
            return Self {
                rust_image: DEFAULT_RUST_IMAGE.to_string(),
                exclude,
            };
        }

        Self { rust_image, exclude }
    }
}

/// Nearest ancestor of `start` (inclusive) containing `.git`, or `start` itself.
pub fn repo_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .unwrap_or(start)
        .to_path_buf()
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
