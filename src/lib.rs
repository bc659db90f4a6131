mod build_error;
mod command_runner;
mod cross_compile;
mod export_names;
mod generate_constants;
mod native_build;
mod platform;
mod target_arch;

pub use build_error::BuildError;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser as ClapParser;
use log::info;

use command_runner::{CommandRunner, CommandSpec, SystemRunner};
use generate_constants::CONSTANTS_FILE_NAME;
use platform::HostPlatform;
use target_arch::TargetRequest;

#[derive(ClapParser, Debug)]
#[command(about = "Compiles the Capstone engine to a JavaScript module via Emscripten")]
pub struct Cli {
    /// Architecture back-ends to include, case-insensitive (e.g. arm x86).
    /// All back-ends are built when none are given
    targets: Vec<String>,

    /// Path to the Capstone submodule checkout
    #[arg(long, default_value = "capstone")]
    capstone_dir: PathBuf,

    /// Directory the generated JavaScript artifacts are written to
    #[arg(long, default_value = "src")]
    out_dir: PathBuf,
}

pub fn run(cli: Cli) -> Result<(), BuildError> {
    let emscripten = env::var("EMSCRIPTEN").ok();
    run_pipeline(
        &cli,
        HostPlatform::detect(),
        emscripten.as_deref(),
        &SystemRunner,
    )
}

/// The two build stages hard-depend on each other's outputs, so the first
/// failure aborts the whole run. An unsupported host is not a failure; it
/// gets guidance text and a clean exit.
fn run_pipeline(
    cli: &Cli,
    platform: Option<HostPlatform>,
    emscripten_root: Option<&str>,
    runner: &dyn CommandRunner,
) -> Result<(), BuildError> {
    init_capstone_checkout(&cli.capstone_dir, runner)?;

    let Some(platform) = platform else {
        println!("Your operating system is not supported by this script:");
        println!(
            "Please, use Emscripten to compile Capstone manually to {}",
            cli.out_dir.join("libcapstone.out.js").display()
        );
        return Ok(());
    };

    let emscripten_root = emscripten_root.ok_or(BuildError::EmscriptenNotSet)?;
    let request = TargetRequest::parse(&cli.targets);

    generate_constants::generate_constants(
        &cli.capstone_dir,
        &cli.out_dir.join(CONSTANTS_FILE_NAME),
    )?;
    native_build::compile_native(
        runner,
        platform,
        &request,
        &cli.capstone_dir,
        emscripten_root,
    )?;
    cross_compile::compile_to_js(
        runner,
        &request,
        &cli.capstone_dir,
        &cli.out_dir,
        emscripten_root,
    )?;
    Ok(())
}

/// Fetch the Capstone sources on first run; the submodule directory stays
/// empty until `git submodule update --init` has populated it
fn init_capstone_checkout(
    capstone_dir: &Path,
    runner: &dyn CommandRunner,
) -> Result<(), BuildError> {
    let populated = match fs::read_dir(capstone_dir) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    };

    if !populated {
        info!(
            "Capstone checkout at {} is empty, fetching the submodule",
            capstone_dir.display()
        );
        runner.run(
            &CommandSpec::new("Git submodule", "git").args(["submodule", "update", "--init"]),
        )?;
    }
    Ok(())
}
