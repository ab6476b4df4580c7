use crate::cancel::CancelToken;
use crate::error::LintError;
use crate::lint::Environment;

use super::Stage;

pub const COMMAND: &[&str] = &["cargo", "check", "--workspace", "--all-targets"];

/// Run `cargo check` to verify compilation.
pub async fn run<E>(env: &E, cancel: &CancelToken) -> Result<String, LintError>
where
    E: Environment + ?Sized,
{
    super::run_stage(Stage::Check, cancel, || env.run_static_check()).await
}
