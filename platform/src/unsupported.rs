//! Inert fallbacks for non-Windows targets so the workspace builds
//! everywhere. Every query reports an empty system and every mutation is
//! rejected.

use tracing::warn;
use winlayout_core::sys::{KeyboardOps, LocaleOps, RegistryOps};
use winlayout_shared_types::RawHandle;

use crate::Platform;

impl KeyboardOps for Platform {
    fn list_handles(&self) -> Vec<RawHandle> {
        Vec::new()
    }

    fn foreground_thread_id(&self) -> u32 {
        0
    }

    fn current_handle(&self, _thread_id: u32) -> RawHandle {
        RawHandle(0)
    }

    fn load(&self, layout_id: &str, _flags: u32) -> RawHandle {
        warn!(layout_id, "keyboard layout control is only supported on Windows");
        RawHandle(0)
    }

    fn broadcast_language_change(&self, _handle: RawHandle) -> bool {
        false
    }
}

impl RegistryOps for Platform {
    fn layout_entries(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

impl LocaleOps for Platform {
    fn locale_name(&self, _language_id: u16) -> Option<String> {
        None
    }
}
