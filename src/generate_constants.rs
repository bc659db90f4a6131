use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::build_error::BuildError;
use crate::export_names::CONSTANT_SOURCES;

/// The combined constants file, written under the output directory
pub const CONSTANTS_FILE_NAME: &str = "capstone-constants.js";

/// Namespace object every top-level constant is assigned onto
const NAMESPACE: &str = "cs";

/// The shapes a line of a Python constant file can take. Processing is
/// strictly line-at-a-time: a constant expression spanning continuation
/// lines is not supported.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum LineKind {
    /// Blank line, comment, or indented continuation; passes through
    /// with only the comment-marker swap
    Passthrough,
    /// `<ident> = <IDENT>`: a derived or duplicate definition, emitted as
    /// a comment since only the primitive assignments are wanted verbatim
    DerivedAssignment,
    /// Any other statement-starting top-level line; gains the namespace
    /// qualifier
    TopLevelStatement,
}

fn classify(line: &str) -> LineKind {
    lazy_static! {
        static ref DERIVED_RE: Regex =
            Regex::new(r"^[A-Za-z_][A-Za-z0-9_]* = [A-Za-z_]").unwrap();
    }

    match line.chars().next() {
        None | Some('#') | Some(' ') | Some('\t') | Some('\r') => LineKind::Passthrough,
        _ if DERIVED_RE.is_match(line) => LineKind::DerivedAssignment,
        _ => LineKind::TopLevelStatement,
    }
}

fn transliterate_line(line: &str) -> String {
    let rewritten = match classify(line) {
        LineKind::Passthrough => line.to_owned(),
        LineKind::DerivedAssignment => format!("# {}.{}", NAMESPACE, line),
        LineKind::TopLevelStatement => format!("{}.{}", NAMESPACE, line),
    };
    // Python comment markers become JavaScript line comments
    rewritten.replace('#', "//")
}

/// Rewrites every listed Python constant file into one combined JavaScript
/// file under `out_path`, in the fixed source order. Any previous output is
/// overwritten. A missing or unreadable source aborts the run; the combined
/// file is order-and-completeness dependent, so partial output is useless.
pub fn generate_constants(capstone_dir: &Path, out_path: &Path) -> Result<(), BuildError> {
    info!("Generating JavaScript constants at {}", out_path.display());

    let mut output = String::new();
    for relative in CONSTANT_SOURCES {
        let path = capstone_dir.join(relative);
        debug!("Transliterating {}", path.display());

        let code = fs::read_to_string(&path)
            .map_err(|e| BuildError::ReadConstantSource(path.clone(), e))?;
        for line in code.lines() {
            output.push_str(&transliterate_line(line));
            output.push('\n');
        }
    }

    fs::write(out_path, &output).map_err(|e| BuildError::WriteArtifact(out_path.to_owned(), e))
}
