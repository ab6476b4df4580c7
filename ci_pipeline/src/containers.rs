use dagger_sdk::{Container, Directory, HostDirectoryOpts, Query};

use crate::config::PipelineConfig;
use crate::toolchain::Toolchain;

/// Source tree from the host, minus build output and VCS metadata.
pub fn host_directory(client: &Query, config: &PipelineConfig, source: &str) -> Directory {
    client.host().directory_opts(
        source,
        HostDirectoryOpts {
            exclude: Some(config.exclude.iter().map(String::as_str).collect()),
            include: None,
            gitignore: None,
            no_cache: None,
        },
    )
}

/// Rust container pinned to the descriptor's toolchain, with cargo registry caches.
///
/// The target directory is not cached: every run compiles from scratch.
pub fn rust_dev_container(
    client: &Query,
    config: &PipelineConfig,
    toolchain: &Toolchain,
    source: Directory,
) -> Container {
    client
        .container()
        .from(config.rust_image.as_str())
        .with_mounted_cache(
            "/usr/local/cargo/registry",
            client.cache_volume("cargo-registry"),
        )
        .with_mounted_cache(
            "/usr/local/cargo/git",
            client.cache_volume("cargo-git"),
        )
        .with_exec(toolchain.install_command())
        .with_workdir("/app")
        .with_directory("/app", source)
        .with_env_variable("RUSTUP_TOOLCHAIN", toolchain.channel())
        .with_env_variable("CARGO_TERM_COLOR", "never")
        .with_env_variable("RUST_BACKTRACE", "1")
}
