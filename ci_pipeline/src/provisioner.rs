//! Dagger-backed [`Provisioner`] and [`Environment`].

use async_trait::async_trait;
use dagger_sdk::{Container, Directory, Query};

use crate::config::PipelineConfig;
use crate::containers;
use crate::error::{EngineError, ProvisionError};
use crate::lint::{Environment, Provisioner};
use crate::stages::{CheckResult, Stage};
use crate::toolchain::Toolchain;

const STATUS_FILE: &str = "/tmp/hubdash-ci.status";

pub struct DaggerProvisioner {
    client: Query,
    config: PipelineConfig,
}

impl DaggerProvisioner {
    pub fn new(client: Query, config: PipelineConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Provisioner for DaggerProvisioner {
    type Source = Directory;
    type Env = DaggerEnvironment;

    async fn build_environment(
        &self,
        toolchain_file: &str,
        source: &Directory,
    ) -> Result<DaggerEnvironment, ProvisionError> {
        let contents = source
            .file(toolchain_file)
            .contents()
            .await
            .map_err(|e| ProvisionError::MissingToolchainFile {
                path: toolchain_file.to_string(),
                reason: e.to_string(),
            })?;
        let toolchain = Toolchain::parse(toolchain_file, &contents)?;
        tracing::info!(channel = toolchain.channel(), image = %self.config.rust_image, "installing toolchain");

        let container =
            containers::rust_dev_container(&self.client, &self.config, &toolchain, source.clone());
        container
            .sync()
            .await
            .map_err(|e| ProvisionError::Engine(e.to_string()))?;

        Ok(DaggerEnvironment { container })
    }
}

/// Provisioned container. Each stage execs on a derived container, never on this one.
pub struct DaggerEnvironment {
    container: Container,
}

impl DaggerEnvironment {
    async fn exec(&self, stage: Stage) -> Result<CheckResult, EngineError> {
        let script = stage_script(stage);
        let ran = self.container.with_exec(vec!["sh", "-c", script.as_str()]);

        let output = ran.stdout().await.map_err(|e| EngineError(e.to_string()))?;
        let status = ran
            .file(STATUS_FILE)
            .contents()
            .await
            .map_err(|e| EngineError(e.to_string()))?;
        let exit_code = parse_status(&status)?;

        Ok(CheckResult { output, exit_code })
    }
}

#[async_trait]
impl Environment for DaggerEnvironment {
    async fn run_static_check(&self) -> Result<CheckResult, EngineError> {
        self.exec(Stage::Check).await
    }

    async fn run_format_check(&self) -> Result<CheckResult, EngineError> {
        self.exec(Stage::Fmt).await
    }
}

/// Shell line for `stage`: stdout and stderr merged, exit status written to
/// [`STATUS_FILE`] so the exec itself succeeds and failing stages keep their text.
fn stage_script(stage: Stage) -> String {
    capture_line(&stage.command().join(" "), STATUS_FILE)
}

fn capture_line(command: &str, status_file: &str) -> String {
    format!("{command} 2>&1; echo $? > {status_file}")
}

fn parse_status(status: &str) -> Result<i32, EngineError> {
    status
        .trim()
        .parse()
        .map_err(|_| EngineError(format!("unreadable exit status {status:?}")))
}
