use crate::cancel::CancelToken;
use crate::error::LintError;
use crate::lint::Environment;

use super::Stage;

pub const COMMAND: &[&str] = &["cargo", "fmt", "--all", "--check"];

/// Run `cargo fmt --check` to verify formatting without rewriting files.
pub async fn run<E>(env: &E, cancel: &CancelToken) -> Result<String, LintError>
where
    E: Environment + ?Sized,
{
    super::run_stage(Stage::Fmt, cancel, || env.run_format_check()).await
}
