//! Lint orchestration: provision once, run check then fmt, merge the output.

use async_trait::async_trait;

use crate::cancel::CancelToken;
use crate::error::{EngineError, LintError, ProvisionError};
use crate::stages::{self, CheckResult, Stage};

/// Builds an environment able to run both checks against a source tree.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Handle to the caller's source directory.
    type Source: Send + Sync;
    type Env: Environment;

    async fn build_environment(
        &self,
        toolchain_file: &str,
        source: &Self::Source,
    ) -> Result<Self::Env, ProvisionError>;
}

/// A provisioned, immutable build environment.
#[async_trait]
pub trait Environment: Send + Sync {
    async fn run_static_check(&self) -> Result<CheckResult, EngineError>;
    async fn run_format_check(&self) -> Result<CheckResult, EngineError>;
}

/// Run the static check, then the format check, in one environment.
///
/// A failed static check returns immediately with its own output and the
/// format check is never started. Otherwise the result carries both outputs
/// concatenated and reflects only the format check outcome.
pub async fn lint<P>(
    provisioner: &P,
    source: &P::Source,
    toolchain_file: &str,
    cancel: &CancelToken,
) -> Result<String, LintError>
where
    P: Provisioner,
{
    tracing::info!(toolchain_file, "provisioning build environment");
    let env = stages::guarded("provisioning", cancel, || {
        provisioner.build_environment(toolchain_file, source)
    })
    .await??;

    let check_out = stages::check::run(&env, cancel).await?;
    let fmt_out = stages::fmt::run(&env, cancel)
        .await
        .map_err(|err| err.after(&check_out))?;

    Ok(check_out + &fmt_out)
}

/// Provision an environment and run a single stage in it.
pub async fn run_single<P>(
    provisioner: &P,
    source: &P::Source,
    toolchain_file: &str,
    stage: Stage,
    cancel: &CancelToken,
) -> Result<String, LintError>
where
    P: Provisioner,
{
    tracing::info!(toolchain_file, stage = stage.name(), "provisioning build environment");
    let env = stages::guarded("provisioning", cancel, || {
        provisioner.build_environment(toolchain_file, source)
    })
    .await??;

    match stage {
        Stage::Check => stages::check::run(&env, cancel).await,
        Stage::Fmt => stages::fmt::run(&env, cancel).await,
    }
}
