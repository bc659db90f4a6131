/// Host platforms the build can run on. Anything else gets guidance text
/// and a graceful exit instead of a build attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HostPlatform {
    Windows,
    Posix,
}

impl HostPlatform {
    pub fn detect() -> Option<HostPlatform> {
        if cfg!(windows) {
            Some(HostPlatform::Windows)
        } else if cfg!(unix) {
            Some(HostPlatform::Posix)
        } else {
            None
        }
    }

    pub fn cmake_generator(&self) -> &'static str {
        match self {
            HostPlatform::Windows => "MinGW Makefiles",
            HostPlatform::Posix => "Unix Makefiles",
        }
    }

    pub fn make_program(&self) -> &'static str {
        match self {
            HostPlatform::Windows => "mingw32-make",
            HostPlatform::Posix => "make",
        }
    }
}
