use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::build_error::BuildError;
use crate::command_runner::{CommandRunner, CommandSpec};
use crate::export_names::{EXPORTED_FUNCTIONS, RUNTIME_METHODS};
use crate::target_arch::TargetRequest;

/// The static library produced by the native build stage
const STATIC_LIB_FILE: &str = "libcapstone.a";

/// Line prepended to the generated module so downstream linting skips it
const ESLINT_DISABLE_LINE: &str = "/* eslint-disable */\n";

/// Translates the compiled static library into a single JavaScript module
/// exposing exactly the whitelisted symbols, then prepends the linter
/// suppression line. Returns the path of the finished module.
pub fn compile_to_js(
    runner: &dyn CommandRunner,
    request: &TargetRequest,
    capstone_dir: &Path,
    out_dir: &Path,
    emscripten_root: &str,
) -> Result<PathBuf, BuildError> {
    let out_path = output_path(out_dir, request);
    let spec = emcc_command(capstone_dir, &out_path, emscripten_root);

    // Echoed before launch so a hung cross-compilation can still be
    // diagnosed from the printed command
    println!("{}", spec);
    runner.run(&spec)?;

    prepend_eslint_disable(&out_path)?;
    info!("Wrote {}", out_path.display());
    Ok(out_path)
}

/// The output filename carries the requested words, or is generic when
/// every architecture was built
fn output_path(out_dir: &Path, request: &TargetRequest) -> PathBuf {
    if request.is_empty() {
        out_dir.join("libcapstone.out.js")
    } else {
        out_dir.join(format!("libcapstone-{}.out.js", request.file_tag()))
    }
}

fn quoted_list(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

fn emcc_command(capstone_dir: &Path, out_path: &Path, emscripten_root: &str) -> CommandSpec {
    CommandSpec::new("Emscripten", format!("{}/emcc", emscripten_root))
        .arg("-Os")
        .args(["--memory-init-file", "0"])
        .arg(capstone_dir.join(STATIC_LIB_FILE).to_string_lossy())
        .arg("-s")
        .arg(format!(
            "EXPORTED_FUNCTIONS={}",
            quoted_list(&EXPORTED_FUNCTIONS)
        ))
        .arg("-s")
        .arg(format!(
            "EXTRA_EXPORTED_RUNTIME_METHODS={}",
            quoted_list(&RUNTIME_METHODS)
        ))
        .args(["-s", "ALLOW_MEMORY_GROWTH=1"])
        .args(["-s", "MODULARIZE=1"])
        .args(["-s", "WASM=0"])
        .args(["-s", "EXPORT_ES6=1"])
        .args(["-s", "USE_ES6_IMPORT_META=0"])
        .arg("-o")
        .arg(out_path.to_string_lossy())
}

/// Read-then-rewrite through a temporary sibling file, renamed over the
/// output so a crash mid-write cannot lose the module
fn prepend_eslint_disable(path: &Path) -> Result<(), BuildError> {
    let original =
        fs::read_to_string(path).map_err(|e| BuildError::ReadArtifact(path.to_owned(), e))?;

    let mut patched = String::with_capacity(ESLINT_DISABLE_LINE.len() + original.len());
    patched.push_str(ESLINT_DISABLE_LINE);
    patched.push_str(&original);

    let tmp = match path.file_name() {
        Some(name) => path.with_file_name(format!("{}.tmp", name.to_string_lossy())),
        None => {
            return Err(BuildError::WriteArtifact(
                path.to_owned(),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file path"),
            ))
        }
    };
    fs::write(&tmp, &patched).map_err(|e| BuildError::WriteArtifact(tmp.clone(), e))?;
    fs::rename(&tmp, path).map_err(|e| BuildError::WriteArtifact(path.to_owned(), e))
}

#[cfg(test)]
mod cross_compile_tests {
    use super::*;
    use crate::command_runner::scripted::ScriptedRunner;

    fn request(words: &[&str]) -> TargetRequest {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        TargetRequest::parse(&words)
    }

    fn emcc_line(request: &TargetRequest) -> String {
        let out = output_path(Path::new("src"), request);
        emcc_command(Path::new("capstone"), &out, "/opt/emsdk").to_command_line()
    }

    #[test]
    fn generic_output_name_when_all_architectures_built() {
        assert_eq!(
            output_path(Path::new("src"), &request(&[])),
            PathBuf::from("src/libcapstone.out.js")
        );
    }

    #[test]
    fn output_name_encodes_target_subset() {
        assert_eq!(
            output_path(Path::new("src"), &request(&["x86", "arm"])),
            PathBuf::from("src/libcapstone-arm-x86.out.js")
        );
    }

    #[test]
    fn output_name_keeps_unrecognised_words() {
        // an unrecognised word still names the output, like any other
        // non-empty request
        assert_eq!(
            output_path(Path::new("src"), &request(&["foo"])),
            PathBuf::from("src/libcapstone-foo.out.js")
        );
    }

    #[test]
    fn every_whitelisted_function_is_exported() {
        let line = emcc_line(&request(&[]));
        for name in EXPORTED_FUNCTIONS {
            assert!(line.contains(&format!("'{}'", name)), "{}", name);
        }
        for name in RUNTIME_METHODS {
            assert!(line.contains(&format!("'{}'", name)), "{}", name);
        }
        // explicit whitelist only, no wildcard exports
        assert!(!line.contains('*'));
    }

    #[test]
    fn emcc_flags_match_the_module_contract() {
        let line = emcc_line(&request(&[]));
        assert!(line.contains("-Os"));
        assert!(line.contains("--memory-init-file 0"));
        assert!(line.contains("capstone/libcapstone.a"));
        assert!(line.contains("ALLOW_MEMORY_GROWTH=1"));
        assert!(line.contains("MODULARIZE=1"));
        assert!(line.contains("WASM=0"));
        assert!(line.contains("EXPORT_ES6=1"));
        assert!(line.contains("USE_ES6_IMPORT_META=0"));
        assert!(line.contains("-o src/libcapstone.out.js"));
    }

    #[test]
    fn failed_emcc_leaves_no_postprocessing() {
        let runner = ScriptedRunner::failing_at(0);
        let result = compile_to_js(
            &runner,
            &request(&[]),
            Path::new("capstone"),
            Path::new("src"),
            "/opt/emsdk",
        );
        assert!(result.is_err());
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn prepends_suppression_line_with_trailing_newline() {
        let dir = std::env::temp_dir().join("capstone_js_build_prepend_nl");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("libcapstone.out.js");
        fs::write(&path, "var Module = {};\n").unwrap();

        prepend_eslint_disable(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "/* eslint-disable */\nvar Module = {};\n"
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn prepends_suppression_line_without_trailing_newline() {
        let dir = std::env::temp_dir().join("capstone_js_build_prepend_no_nl");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("libcapstone.out.js");
        fs::write(&path, "var Module = {};").unwrap();

        prepend_eslint_disable(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "/* eslint-disable */\nvar Module = {};"
        );
        // the temporary file must not be left behind
        assert!(!dir.join("libcapstone.out.js.tmp").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn prepend_fails_on_missing_module() {
        let dir = std::env::temp_dir().join("capstone_js_build_prepend_missing");
        fs::create_dir_all(&dir).unwrap();
        let result = prepend_eslint_disable(&dir.join("nope.out.js"));
        assert!(result.is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
