//! `rust-toolchain.toml` parsing.
//!
//! The descriptor pins the compiler/formatter version; the provisioner
//! installs exactly that toolchain before any stage runs.

use serde::Deserialize;

use crate::error::ProvisionError;

/// Default descriptor name, resolved relative to the source directory.
pub const DEFAULT_TOOLCHAIN_FILE: &str = "rust-toolchain.toml";

#[derive(Debug, Deserialize)]
struct ToolchainFile {
    toolchain: Option<Toolchain>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Toolchain {
    pub channel: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub targets: Vec<String>,
    pub profile: Option<String>,
}

impl Toolchain {
    /// Parse descriptor contents. `path` is used only for error messages.
    pub fn parse(path: &str, contents: &str) -> Result<Self, ProvisionError> {
        let file: ToolchainFile =
            toml::from_str(contents).map_err(|source| ProvisionError::InvalidToolchain {
                path: path.to_string(),
                source,
            })?;

        let toolchain = file
            .toolchain
            .filter(|t| t.channel.as_deref().is_some_and(|c| !c.trim().is_empty()))
            .ok_or_else(|| ProvisionError::MissingChannel {
                path: path.to_string(),
            })?;

        Ok(toolchain)
    }

    pub fn channel(&self) -> &str {
        self.channel.as_deref().unwrap_or_default().trim()
    }

    /// `rustup toolchain install` invocation for this descriptor.
    ///
    /// rustfmt is always requested since the fmt stage needs it.
    pub fn install_command(&self) -> Vec<String> {
        let mut cmd = vec![
            "rustup".to_string(),
            "toolchain".to_string(),
            "install".to_string(),
            self.channel().to_string(),
            "--profile".to_string(),
            self.profile.clone().unwrap_or_else(|| "minimal".to_string()),
        ];

        let mut components = self.components.clone();
        if !components.iter().any(|c| c == "rustfmt") {
            components.push("rustfmt".to_string());
        }
        for component in components {
            cmd.push("--component".to_string());
            cmd.push(component);
        }
        for target in &self.targets {
            cmd.push("--target".to_string());
            cmd.push(target.clone());
        }
        cmd
    }
}
