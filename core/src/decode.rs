//! Layout handle to stable identifier.
//!
//! Windows has no documented way to ask for the KLID of a layout that is not
//! the active one; GetKeyboardLayoutName only answers for the current input
//! language, and activating a layout just to name it would fire spurious
//! input-language-changed events system-wide. The identifier is instead
//! reconstructed from the handle's undocumented bit layout plus a registry
//! cross-reference.

use tracing::debug;
use winlayout_shared_types::RawHandle;

use crate::sys::RegistryOps;

/// Decode a raw layout handle into its stable 8-hex-digit identifier.
///
/// The device half of the handle carries a legacy layout identifier for older
/// layouts. Newer layouts set the top nibble to 0xF and store a special
/// layout id in the low 12 bits, which has to be matched against the
/// "Layout Id" values under the keyboard-layouts registry key. This may break
/// in future Windows versions since none of it is documented.
pub fn handle_to_layout_id<R: RegistryOps + ?Sized>(handle: RawHandle, registry: &R) -> String {
    let mut device = handle.device();

    if device & 0xF000 == 0xF000 {
        let special_id = device & 0x0FFF;

        for (key_name, stored_id) in registry.layout_entries() {
            let matches = u16::from_str_radix(&stored_id, 16)
                .map(|id| id == special_id)
                .unwrap_or(false);
            if matches {
                debug_assert!(
                    key_name.len() == 8,
                    "unexpected key length in registry: {key_name}"
                );
                return key_name.to_ascii_uppercase();
            }
        }

        // No registry match: fall through and format the raw device half
        // rather than failing the whole operation.
        debug!(special_id, "no registry entry for special layout id");
    } else if device == 0 {
        // The device half carries no information, so use the input language
        // instead. Crucial when a keyboard is installed more than once or
        // under a different language: a French keyboard installed under US
        // input language must still resolve to the French identifier, and
        // only a zero device half means that information is absent.
        device = handle.language();
    }

    format!("{device:08X}")
}
