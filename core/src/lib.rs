use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};
use winlayout_shared_types::{Config, LayoutEntry, RawHandle};

pub mod catalog;
pub mod decode;
pub mod error;
pub mod resolver;
pub mod sys;

pub use error::LayoutError;
use sys::{KLF_ACTIVATE, KLF_SUBSTITUTE_OK, KeyboardOps, LocaleOps, RegistryOps};

/// The six layout operations, over an injected OS capability set.
///
/// Every operation is synchronous and stateless: the OS is re-queried on each
/// call, so a layout switched externally between two invocations is simply
/// picked up by the next one. Nothing is cached across calls.
pub struct Switcher<S> {
    sys: S,
}

impl<S> Switcher<S>
where
    S: KeyboardOps + RegistryOps + LocaleOps,
{
    pub fn new(sys: S) -> Self {
        Self { sys }
    }

    fn foreground_handle(&self) -> RawHandle {
        self.sys.current_handle(self.sys.foreground_thread_id())
    }

    /// Locale name of the foreground window's active layout, e.g. "en-US".
    pub fn current_lang(&self) -> Result<String, LayoutError> {
        let language_id = self.foreground_handle().language();
        self.sys
            .locale_name(language_id)
            .ok_or(LayoutError::LocaleResolution { language_id })
    }

    /// All installed layouts as "name trimmed-id" pairs, comma-joined.
    pub fn list(&self) -> Result<String, LayoutError> {
        let entries = catalog::enumerate(&self.sys)?;
        Ok(resolver::format_list(&entries))
    }

    /// Resolve a token (locale name or identifier fragment), activate the
    /// matching layout, and return the re-queried current locale name. The
    /// activation broadcast is fire-and-forget, so the returned name may
    /// still be the old one if the foreground application has not processed
    /// the change yet.
    pub fn set_lang(&self, token: &str) -> Result<String, LayoutError> {
        let entries = catalog::enumerate(&self.sys)?;
        let selected = resolver::resolve(token, &entries)?;
        debug!(token, layout_id = %selected.layout_id, "activating layout");
        self.activate(&selected.layout_id);
        self.current_lang()
    }

    /// Short tags of all installed layouts, space-joined.
    pub fn short_list(&self) -> Result<String, LayoutError> {
        let entries = catalog::enumerate(&self.sys)?;
        Ok(entries
            .iter()
            .map(|entry| entry.short_name.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Short tag of the foreground window's active layout, e.g. "us".
    pub fn current_short(&self) -> Result<String, LayoutError> {
        let language_id = self.foreground_handle().language();
        let name = self
            .sys
            .locale_name(language_id)
            .ok_or(LayoutError::LocaleResolution { language_id })?;
        catalog::short_name_of(&name, language_id)
    }

    /// Activate the layout named by a short tag. The us/ru shortcuts skip
    /// catalog enumeration entirely.
    pub fn set_short(&self, tag: &str) -> Result<(), LayoutError> {
        if let Some(layout_id) = resolver::short_tag_fast_path(tag) {
            debug!(tag, layout_id, "activating layout via fast path");
            self.activate(layout_id);
            return Ok(());
        }

        let entries = catalog::enumerate(&self.sys)?;
        let selected = resolver::resolve_short(tag, &entries)?;
        debug!(tag, layout_id = %selected.layout_id, "activating layout");
        self.activate(&selected.layout_id);
        Ok(())
    }

    /// Load a layout by stable identifier and broadcast the change to all
    /// top-level windows. Returns whether the OS accepted the broadcast; a
    /// rejection is logged but never treated as fatal.
    pub fn activate(&self, layout_id: &str) -> bool {
        let handle = self.sys.load(layout_id, KLF_SUBSTITUTE_OK | KLF_ACTIVATE);
        let accepted = self.sys.broadcast_language_change(handle);
        if !accepted {
            warn!(layout_id, "input language change broadcast was rejected");
        }
        accepted
    }

    /// Full catalog, for callers that want the entries rather than the
    /// formatted listing.
    pub fn layouts(&self) -> Result<Vec<LayoutEntry>, LayoutError> {
        catalog::enumerate(&self.sys)
    }
}

/// Read the optional config file. A missing file is not an error; defaults
/// apply.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&raw).context("failed to parse config.toml")
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::*;

    /// Scripted stand-in for the whole OS capability set.
    struct FakeSystem {
        handles: Vec<RawHandle>,
        current: RawHandle,
        registry: Vec<(String, String)>,
        locales: HashMap<u16, String>,
        list_calls: Cell<u32>,
        loaded: RefCell<Vec<String>>,
        broadcasts: RefCell<Vec<RawHandle>>,
        accept_broadcast: bool,
    }

    impl FakeSystem {
        fn us_ru() -> Self {
            Self {
                handles: vec![RawHandle(0x0409_0409), RawHandle(0x0419_0419)],
                current: RawHandle(0x0409_0409),
                registry: Vec::new(),
                locales: HashMap::from([
                    (0x0409, "en-US".to_string()),
                    (0x0419, "ru-RU".to_string()),
                ]),
                list_calls: Cell::new(0),
                loaded: RefCell::new(Vec::new()),
                broadcasts: RefCell::new(Vec::new()),
                accept_broadcast: true,
            }
        }
    }

    impl KeyboardOps for FakeSystem {
        fn list_handles(&self) -> Vec<RawHandle> {
            self.list_calls.set(self.list_calls.get() + 1);
            self.handles.clone()
        }

        fn foreground_thread_id(&self) -> u32 {
            42
        }

        fn current_handle(&self, thread_id: u32) -> RawHandle {
            assert_eq!(thread_id, 42);
            self.current
        }

        fn load(&self, layout_id: &str, flags: u32) -> RawHandle {
            assert_eq!(flags, KLF_SUBSTITUTE_OK | KLF_ACTIVATE);
            self.loaded.borrow_mut().push(layout_id.to_string());
            RawHandle(isize::from_str_radix(layout_id, 16).unwrap_or(0))
        }

        fn broadcast_language_change(&self, handle: RawHandle) -> bool {
            self.broadcasts.borrow_mut().push(handle);
            self.accept_broadcast
        }
    }

    impl RegistryOps for FakeSystem {
        fn layout_entries(&self) -> Vec<(String, String)> {
            self.registry.clone()
        }
    }

    impl LocaleOps for FakeSystem {
        fn locale_name(&self, language_id: u16) -> Option<String> {
            self.locales.get(&language_id).cloned()
        }
    }

    #[test]
    fn current_lang_names_the_foreground_layout() {
        let switcher = Switcher::new(FakeSystem::us_ru());
        assert_eq!(switcher.current_lang().unwrap(), "en-US");
    }

    #[test]
    fn current_short_is_the_region_subtag() {
        let mut sys = FakeSystem::us_ru();
        sys.current = RawHandle(0x0419_0419);
        let switcher = Switcher::new(sys);
        assert_eq!(switcher.current_short().unwrap(), "ru");
    }

    #[test]
    fn list_formats_catalog_with_trimmed_identifiers() {
        let switcher = Switcher::new(FakeSystem::us_ru());
        assert_eq!(switcher.list().unwrap(), "en-US 409, ru-RU 419");
    }

    #[test]
    fn short_list_is_space_joined() {
        let switcher = Switcher::new(FakeSystem::us_ru());
        assert_eq!(switcher.short_list().unwrap(), "us ru");
    }

    #[test]
    fn enumeration_is_idempotent() {
        let switcher = Switcher::new(FakeSystem::us_ru());
        let ids = |entries: Vec<LayoutEntry>| {
            entries.into_iter().map(|e| e.layout_id).collect::<Vec<_>>()
        };
        assert_eq!(
            ids(switcher.layouts().unwrap()),
            ids(switcher.layouts().unwrap())
        );
    }

    #[test]
    fn set_lang_loads_and_broadcasts_the_resolved_layout() {
        let switcher = Switcher::new(FakeSystem::us_ru());
        let current = switcher.set_lang("0419").unwrap();
        assert_eq!(switcher.sys.loaded.borrow().as_slice(), ["00000419"]);
        assert_eq!(switcher.sys.broadcasts.borrow().len(), 1);
        // The broadcast is fire-and-forget; the fake's foreground layout
        // never changes, and set_lang reports whatever is current afterward.
        assert_eq!(current, "en-US");
    }

    #[test]
    fn set_lang_with_unknown_token_reports_the_catalog() {
        let switcher = Switcher::new(FakeSystem::us_ru());
        let err = switcher.set_lang("zz").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown language id zz \n use one of: en-US 409, ru-RU 419"
        );
        assert!(switcher.sys.loaded.borrow().is_empty());
    }

    #[test]
    fn set_short_fast_path_skips_enumeration() {
        let switcher = Switcher::new(FakeSystem::us_ru());
        switcher.set_short("us").unwrap();
        assert_eq!(switcher.sys.list_calls.get(), 0);
        assert_eq!(switcher.sys.loaded.borrow().as_slice(), ["00000409"]);
    }

    #[test]
    fn set_short_falls_back_to_catalog_for_other_tags() {
        let mut sys = FakeSystem::us_ru();
        sys.handles.push(RawHandle(0x0407_0407));
        sys.locales.insert(0x0407, "de-DE".to_string());
        let switcher = Switcher::new(sys);
        switcher.set_short("de").unwrap();
        assert_eq!(switcher.sys.list_calls.get(), 1);
        assert_eq!(switcher.sys.loaded.borrow().as_slice(), ["00000407"]);
    }

    #[test]
    fn set_short_unknown_tag_reports_the_catalog() {
        let switcher = Switcher::new(FakeSystem::us_ru());
        let err = switcher.set_short("zz").unwrap_err();
        assert_eq!(err.kind(), "UnknownLayoutError");
        assert!(err.to_string().contains("en-US 409, ru-RU 419"));
    }

    #[test]
    fn rejected_broadcast_is_reported_not_fatal() {
        let mut sys = FakeSystem::us_ru();
        sys.accept_broadcast = false;
        let switcher = Switcher::new(sys);
        assert!(!switcher.activate("00000409"));
    }

    #[test]
    fn unresolvable_locale_fails_enumeration() {
        let mut sys = FakeSystem::us_ru();
        sys.handles.push(RawHandle(0x1234_5678));
        let switcher = Switcher::new(sys);
        assert_eq!(
            switcher.list().unwrap_err(),
            LayoutError::LocaleResolution { language_id: 0x5678 }
        );
    }

    #[test]
    fn registry_backed_handles_enumerate_with_registry_identifier() {
        let mut sys = FakeSystem::us_ru();
        sys.handles = vec![RawHandle(((0xF002u16 as isize) << 16) | 0x0409)];
        sys.current = sys.handles[0];
        sys.registry = vec![("a0000409".to_string(), "2".to_string())];
        let switcher = Switcher::new(sys);
        let entries = switcher.layouts().unwrap();
        assert_eq!(entries[0].layout_id, "A0000409");
        assert_eq!(entries[0].name, "en-US");
    }
}
