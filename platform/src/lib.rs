//! OS-backed implementations of the core capability traits.

#[derive(Debug, Default, Clone)]
pub struct Platform;

impl Platform {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(not(target_os = "windows"))]
pub mod unsupported;
