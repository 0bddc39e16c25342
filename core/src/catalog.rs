//! Enumeration of installed layouts.

use winlayout_shared_types::{LayoutEntry, RawHandle};

use crate::decode::handle_to_layout_id;
use crate::error::LayoutError;
use crate::sys::{KeyboardOps, LocaleOps, RegistryOps};

/// Build the catalog of installed layouts, in OS enumeration order.
///
/// Entries are derived fresh from the handles on every call; nothing is
/// cached, so the catalog reflects layouts added or removed since the last
/// invocation. An entry whose input language the OS cannot name fails the
/// whole enumeration: that is an installation problem the caller should see,
/// not something to skip silently.
pub fn enumerate<S>(sys: &S) -> Result<Vec<LayoutEntry>, LayoutError>
where
    S: KeyboardOps + RegistryOps + LocaleOps,
{
    sys.list_handles()
        .into_iter()
        .map(|handle| entry_for(sys, handle))
        .collect()
}

fn entry_for<S>(sys: &S, handle: RawHandle) -> Result<LayoutEntry, LayoutError>
where
    S: RegistryOps + LocaleOps,
{
    let language_id = handle.language();
    let name = sys
        .locale_name(language_id)
        .ok_or(LayoutError::LocaleResolution { language_id })?;
    let short_name = short_name_of(&name, language_id)?;

    Ok(LayoutEntry {
        handle,
        layout_id: handle_to_layout_id(handle, sys),
        name,
        short_name,
    })
}

/// Second dash-separated component of a locale name, lowercased.
///
/// Locale names without a region subtag ("en", or neutral locales) cannot
/// yield a short tag; that is reported as a locale resolution failure rather
/// than indexing past the end of the split.
pub fn short_name_of(name: &str, language_id: u16) -> Result<String, LayoutError> {
    name.split('-')
        .nth(1)
        .map(|subtag| subtag.to_ascii_lowercase())
        .ok_or(LayoutError::LocaleResolution { language_id })
}
