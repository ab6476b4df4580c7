pub mod check;
pub mod fmt;

use std::future::Future;

use crate::cancel::CancelToken;
use crate::error::{EngineError, FailureReason, LintError};

/// The two checks a lint run performs, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Check,
    Fmt,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Fmt => "fmt",
        }
    }

    /// Cargo invocation run inside the environment.
    pub fn command(self) -> &'static [&'static str] {
        match self {
            Self::Check => check::COMMAND,
            Self::Fmt => fmt::COMMAND,
        }
    }

    fn failure(self, output: String, reason: FailureReason) -> LintError {
        match self {
            Self::Check => LintError::StaticCheck { output, reason },
            Self::Fmt => LintError::FormatCheck { output, reason },
        }
    }
}

/// Textual output and exit status of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub output: String,
    pub exit_code: i32,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }
}

/// Start `op` unless `cancel` already fired, then race it against cancellation.
pub(crate) async fn guarded<T, F>(
    during: &'static str,
    cancel: &CancelToken,
    op: impl FnOnce() -> F,
) -> Result<T, LintError>
where
    F: Future<Output = T>,
{
    let cancelled = || LintError::Cancelled {
        during,
        output: String::new(),
    };

    if cancel.is_cancelled() {
        return Err(cancelled());
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(cancelled()),
        out = op() => Ok(out),
    }
}

/// Shared tail of every stage: cancellation, logging, and error mapping.
async fn run_stage<F>(
    stage: Stage,
    cancel: &CancelToken,
    op: impl FnOnce() -> F,
) -> Result<String, LintError>
where
    F: Future<Output = Result<CheckResult, EngineError>>,
{
    let start = || {
        tracing::info!(stage = stage.name(), command = ?stage.command(), "stage started");
        op()
    };

    match guarded(stage.name(), cancel, start).await? {
        Ok(result) if result.passed() => {
            tracing::info!(stage = stage.name(), "stage passed");
            Ok(result.output)
        }
        Ok(result) => {
            tracing::warn!(stage = stage.name(), exit_code = result.exit_code, "stage failed");
            Err(stage.failure(result.output, FailureReason::ExitCode(result.exit_code)))
        }
        Err(EngineError(msg)) => {
            tracing::error!(stage = stage.name(), error = %msg, "stage could not run");
            Err(stage.failure(String::new(), FailureReason::Engine(msg)))
        }
    }
}
