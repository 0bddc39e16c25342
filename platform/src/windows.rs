//! Windows implementation of the keyboard, registry, and locale capabilities.

use std::ptr::{null, null_mut};

use tracing::{debug, warn};
use windows_sys::Win32::{
    Foundation::ERROR_SUCCESS,
    Globalization::{LCIDToLocaleName, LOCALE_NAME_MAX_LENGTH},
    System::Registry::{
        HKEY, HKEY_LOCAL_MACHINE, KEY_READ, RRF_RT_REG_SZ, RegCloseKey, RegEnumKeyExW,
        RegGetValueW, RegOpenKeyExW,
    },
    UI::Input::KeyboardAndMouse::{
        GetKeyboardLayout, GetKeyboardLayoutList, HKL, LoadKeyboardLayoutW,
    },
    UI::WindowsAndMessaging::{
        GetForegroundWindow, GetWindowThreadProcessId, HWND_BROADCAST, PostMessageW,
        WM_INPUTLANGCHANGEREQUEST,
    },
};
use winlayout_core::sys::{KeyboardOps, LocaleOps, RegistryOps};
use winlayout_shared_types::RawHandle;

use crate::Platform;

const KEYBOARD_LAYOUTS_KEY: &str = r"SYSTEM\CurrentControlSet\Control\Keyboard Layouts";
const LAYOUT_ID_VALUE: &str = "Layout Id";

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

impl KeyboardOps for Platform {
    fn list_handles(&self) -> Vec<RawHandle> {
        unsafe {
            let count = GetKeyboardLayoutList(0, null_mut());
            if count <= 0 {
                return Vec::new();
            }
            let mut handles: Vec<HKL> = vec![null_mut(); count as usize];
            let written = GetKeyboardLayoutList(count, handles.as_mut_ptr());
            handles.truncate(written.max(0) as usize);
            handles
                .into_iter()
                .map(|hkl| RawHandle(hkl as isize))
                .collect()
        }
    }

    fn foreground_thread_id(&self) -> u32 {
        unsafe { GetWindowThreadProcessId(GetForegroundWindow(), null_mut()) }
    }

    fn current_handle(&self, thread_id: u32) -> RawHandle {
        RawHandle(unsafe { GetKeyboardLayout(thread_id) } as isize)
    }

    fn load(&self, layout_id: &str, flags: u32) -> RawHandle {
        let klid = wide(layout_id);
        let hkl = unsafe { LoadKeyboardLayoutW(klid.as_ptr(), flags) };
        if hkl.is_null() {
            warn!(layout_id, "LoadKeyboardLayoutW returned no handle");
        }
        RawHandle(hkl as isize)
    }

    fn broadcast_language_change(&self, handle: RawHandle) -> bool {
        let posted = unsafe {
            PostMessageW(HWND_BROADCAST, WM_INPUTLANGCHANGEREQUEST, 0, handle.0)
        };
        posted != 0
    }
}

impl RegistryOps for Platform {
    fn layout_entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        let path = wide(KEYBOARD_LAYOUTS_KEY);
        let value_name = wide(LAYOUT_ID_VALUE);

        unsafe {
            let mut key: HKEY = null_mut();
            let rc = RegOpenKeyExW(HKEY_LOCAL_MACHINE, path.as_ptr(), 0, KEY_READ, &mut key);
            if rc != ERROR_SUCCESS {
                warn!(rc, "cannot open keyboard layouts registry key");
                return entries;
            }

            let mut index = 0u32;
            loop {
                let mut name_buf = [0u16; 256];
                let mut name_len = name_buf.len() as u32;
                let rc = RegEnumKeyExW(
                    key,
                    index,
                    name_buf.as_mut_ptr(),
                    &mut name_len,
                    null(),
                    null_mut(),
                    null_mut(),
                    null_mut(),
                );
                if rc != ERROR_SUCCESS {
                    break;
                }
                index += 1;

                let sub_key = String::from_utf16_lossy(&name_buf[..name_len as usize]);
                let sub_key_w = wide(&sub_key);

                // Only a minority of layouts carry a "Layout Id" value; the
                // rest are addressed by their key name directly.
                let mut data = [0u16; 16];
                let mut data_bytes = (data.len() * 2) as u32;
                let rc = RegGetValueW(
                    key,
                    sub_key_w.as_ptr(),
                    value_name.as_ptr(),
                    RRF_RT_REG_SZ,
                    null_mut(),
                    data.as_mut_ptr().cast(),
                    &mut data_bytes,
                );
                if rc != ERROR_SUCCESS {
                    continue;
                }

                let chars = (data_bytes as usize / 2).min(data.len());
                let layout_id = String::from_utf16_lossy(&data[..chars])
                    .trim_end_matches('\0')
                    .to_string();
                entries.push((sub_key, layout_id));
            }

            RegCloseKey(key);
        }

        debug!(count = entries.len(), "read layout ids from registry");
        entries
    }
}

impl LocaleOps for Platform {
    fn locale_name(&self, language_id: u16) -> Option<String> {
        let mut buf = [0u16; LOCALE_NAME_MAX_LENGTH as usize];
        let len = unsafe {
            LCIDToLocaleName(language_id as u32, buf.as_mut_ptr(), buf.len() as i32, 0)
        };
        // The returned length includes the terminating nul; an empty name
        // means the LCID is unknown.
        if len <= 1 {
            return None;
        }
        Some(String::from_utf16_lossy(&buf[..(len - 1) as usize]))
    }
}
