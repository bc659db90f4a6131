use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};

use crate::build_error::BuildError;
use crate::command_runner::{CommandRunner, CommandSpec};
use crate::platform::HostPlatform;
use crate::target_arch::{TargetArch, TargetRequest};

/// Produces `libcapstone.a` in the Capstone checkout, restricted to the
/// requested architecture set (all architectures when the request is empty).
/// Configure and build failures are both fatal.
pub fn compile_native(
    runner: &dyn CommandRunner,
    platform: HostPlatform,
    request: &TargetRequest,
    capstone_dir: &Path,
    emscripten_root: &str,
) -> Result<(), BuildError> {
    info!("Configuring native Capstone build");
    clear_cmake_cache(capstone_dir)?;
    runner.run(&configure_command(
        platform,
        request,
        capstone_dir,
        emscripten_root,
    ))?;

    info!("Building native Capstone library");
    runner.run(&make_command(platform, capstone_dir))
}

/// A stale cache would pin the architecture flags of a previous run.
/// A cache that was never created is not an error.
fn clear_cmake_cache(capstone_dir: &Path) -> Result<(), BuildError> {
    let cache = capstone_dir.join("CMakeCache.txt");
    match fs::remove_file(&cache) {
        Ok(()) => {
            debug!("Removed {}", cache.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BuildError::RemoveCmakeCache(cache, e)),
    }
}

fn configure_command(
    platform: HostPlatform,
    request: &TargetRequest,
    capstone_dir: &Path,
    emscripten_root: &str,
) -> CommandSpec {
    let mut spec = CommandSpec::new("CMake", "cmake")
        .arg(format!(
            "-DCMAKE_TOOLCHAIN_FILE={}/cmake/Modules/Platform/Emscripten.cmake",
            emscripten_root
        ))
        .arg("-DCMAKE_BUILD_TYPE=Release")
        .arg("-DCMAKE_C_FLAGS=-Wno-warn-absolute-paths")
        .arg("-DCAPSTONE_BUILD_TESTS=OFF")
        .arg("-DCAPSTONE_BUILD_SHARED=OFF");

    // An empty request means every architecture stays enabled. A non-empty
    // request disables each architecture it does not include; unrecognised
    // words include nothing, so they disable every back-end.
    if !request.is_empty() {
        for arch in TargetArch::ALL {
            if !request.includes(arch) {
                spec = spec.arg(format!("-DCAPSTONE_{}_SUPPORT=0", arch.cmake_token()));
            }
        }
    }

    spec.args(["-G", platform.cmake_generator()])
        .arg(capstone_dir.join("CMakeLists.txt").to_string_lossy())
}

fn make_command(platform: HostPlatform, capstone_dir: &Path) -> CommandSpec {
    CommandSpec::new("Make", platform.make_program()).current_dir(capstone_dir)
}
