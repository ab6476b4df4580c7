//! Error taxonomy for the lint pipeline.

use std::fmt;

/// The build environment could not be constructed.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// The toolchain descriptor is absent or unreadable in the source tree.
    #[error("toolchain file '{path}' could not be read: {reason}")]
    MissingToolchainFile { path: String, reason: String },

    /// The toolchain descriptor is not valid TOML.
    #[error("toolchain file '{path}' is invalid: {source}")]
    InvalidToolchain {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// The descriptor parsed but pins no channel.
    #[error("toolchain file '{path}' does not pin a channel")]
    MissingChannel { path: String },

    /// The container engine rejected the environment.
    #[error("container engine: {0}")]
    Engine(String),
}

/// The container engine failed to run a stage at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct EngineError(pub String);

/// Why a stage did not pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The stage ran and reported problems.
    ExitCode(i32),
    /// The stage could not be executed.
    Engine(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExitCode(code) => write!(f, "exit code {code}"),
            Self::Engine(msg) => write!(f, "engine error: {msg}"),
        }
    }
}

/// Errors returned by [`crate::lint::lint`].
///
/// Each variant carries the textual output produced before the failure so
/// the caller can surface it verbatim.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("failed to provision build environment: {0}")]
    Provisioning(#[from] ProvisionError),

    #[error("static check failed ({reason})")]
    StaticCheck {
        output: String,
        reason: FailureReason,
    },

    #[error("format check failed ({reason})")]
    FormatCheck {
        output: String,
        reason: FailureReason,
    },

    /// `during` names the provisioning step or the stage that was in flight.
    #[error("{during} cancelled")]
    Cancelled {
        during: &'static str,
        output: String,
    },
}

impl LintError {
    /// Diagnostic text gathered before the error. Empty when provisioning failed.
    pub fn output(&self) -> &str {
        match self {
            Self::Provisioning(_) => "",
            Self::StaticCheck { output, .. }
            | Self::FormatCheck { output, .. }
            | Self::Cancelled { output, .. } => output,
        }
    }

    /// Prepend output from stages that already completed.
    pub(crate) fn after(mut self, earlier: &str) -> Self {
        match &mut self {
            Self::Provisioning(_) => {}
            Self::StaticCheck { output, .. }
            | Self::FormatCheck { output, .. }
            | Self::Cancelled { output, .. } => output.insert_str(0, earlier),
        }
        self
    }
}
