//! Capability seams over the OS keyboard subsystem.
//!
//! Everything the algorithms need from Windows comes in through these three
//! traits, so the platform crate supplies the real calls and tests supply
//! scripted fakes.

use winlayout_shared_types::RawHandle;

/// Activate the loaded layout immediately.
pub const KLF_ACTIVATE: u32 = 0x0000_0001;
/// Allow the OS to substitute a compatible layout if the exact one is
/// unavailable.
pub const KLF_SUBSTITUTE_OK: u32 = 0x0000_0002;

pub trait KeyboardOps {
    /// Handles of all installed layouts, in OS enumeration order.
    fn list_handles(&self) -> Vec<RawHandle>;

    /// Thread owning the current foreground window.
    fn foreground_thread_id(&self) -> u32;

    /// Active layout handle for the given thread.
    fn current_handle(&self, thread_id: u32) -> RawHandle;

    /// Load a layout by its 8-hex-digit identifier.
    fn load(&self, layout_id: &str, flags: u32) -> RawHandle;

    /// Post an input-language-change request to all top-level windows.
    /// Returns whether the OS accepted the post; delivery is not verified.
    fn broadcast_language_change(&self, handle: RawHandle) -> bool;
}

pub trait RegistryOps {
    /// `(subkey name, "Layout Id" value)` pairs under the keyboard-layouts
    /// registry key, for subkeys that carry a Layout Id at all. Empty when
    /// the key cannot be read; the decoder degrades gracefully.
    fn layout_entries(&self) -> Vec<(String, String)>;
}

pub trait LocaleOps {
    /// Locale name ("en-US") for a 16-bit input language identifier, or
    /// `None` when the OS does not know the locale.
    fn locale_name(&self, language_id: u16) -> Option<String>;
}
