use log::warn;

/// The architecture back-ends Capstone can be built with. Each one maps to
/// a `CAPSTONE_<ARCH>_SUPPORT` cmake option on the native build.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TargetArch {
    Arm,
    Arm64,
    Mips,
    Ppc,
    Sparc,
    Sysz,
    Xcore,
    X86,
}

impl TargetArch {
    pub const ALL: [TargetArch; 8] = [
        TargetArch::Arm,
        TargetArch::Arm64,
        TargetArch::Mips,
        TargetArch::Ppc,
        TargetArch::Sparc,
        TargetArch::Sysz,
        TargetArch::Xcore,
        TargetArch::X86,
    ];

    /// Case-insensitive lookup of an architecture by its Capstone name
    pub fn from_name(name: &str) -> Option<TargetArch> {
        let name = name.to_lowercase();
        TargetArch::ALL.into_iter().find(|arch| arch.name() == name)
    }

    /// The uppercase token used in the cmake support flags
    pub fn cmake_token(&self) -> &'static str {
        match self {
            TargetArch::Arm => "ARM",
            TargetArch::Arm64 => "ARM64",
            TargetArch::Mips => "MIPS",
            TargetArch::Ppc => "PPC",
            TargetArch::Sparc => "SPARC",
            TargetArch::Sysz => "SYSZ",
            TargetArch::Xcore => "XCORE",
            TargetArch::X86 => "X86",
        }
    }

    /// The lowercase name used on the command line and in filenames
    pub fn name(&self) -> &'static str {
        match self {
            TargetArch::Arm => "arm",
            TargetArch::Arm64 => "arm64",
            TargetArch::Mips => "mips",
            TargetArch::Ppc => "ppc",
            TargetArch::Sparc => "sparc",
            TargetArch::Sysz => "sysz",
            TargetArch::Xcore => "xcore",
            TargetArch::X86 => "x86",
        }
    }
}

/// The architecture subset requested on the command line. The raw words
/// decide whether the request is empty and what the output file is called;
/// only recognised words suppress a disable flag on the native build, so a
/// request made up entirely of unrecognised words still disables every
/// back-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRequest {
    names: Vec<String>,
    recognised: Vec<TargetArch>,
}

impl TargetRequest {
    /// Normalises the words to a sorted, deduplicated, lowercase request.
    /// Unrecognised words stay in the request but match no architecture.
    pub fn parse(words: &[String]) -> TargetRequest {
        let mut names: Vec<String> = Vec::new();
        let mut recognised: Vec<TargetArch> = Vec::new();

        for word in words {
            let name = word.to_lowercase();
            if names.contains(&name) {
                continue;
            }
            match TargetArch::from_name(&name) {
                Some(arch) => recognised.push(arch),
                None => {
                    warn!(
                        "\"{}\" is not a recognised architecture; no support flag matches it",
                        word
                    );
                }
            }
            names.push(name);
        }

        names.sort();
        TargetRequest { names, recognised }
    }

    /// An empty request means every architecture stays enabled
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn includes(&self, arch: TargetArch) -> bool {
        self.recognised.contains(&arch)
    }

    /// The `<targets>` portion of the output filename: the requested words
    /// joined by `-`
    pub fn file_tag(&self) -> String {
        self.names.join("-")
    }
}
