//! Matching user-supplied tokens against the catalog.

use winlayout_shared_types::LayoutEntry;

use crate::error::LayoutError;

/// Find the layout a token refers to: the first entry, in enumeration order,
/// whose locale name equals the token or whose identifier contains it as a
/// substring.
pub fn resolve<'a>(token: &str, catalog: &'a [LayoutEntry]) -> Result<&'a LayoutEntry, LayoutError> {
    catalog
        .iter()
        .find(|entry| entry.name == token || entry.layout_id.contains(token))
        .ok_or_else(|| unknown(token, catalog))
}

/// Find the layout with the given short tag.
pub fn resolve_short<'a>(tag: &str, catalog: &'a [LayoutEntry]) -> Result<&'a LayoutEntry, LayoutError> {
    catalog
        .iter()
        .find(|entry| entry.short_name == tag)
        .ok_or_else(|| unknown(tag, catalog))
}

/// Pre-catalog shortcuts for the two tags the tool is most often asked for.
/// Hitting one skips layout enumeration and the registry entirely. Kept to
/// exactly these two; anything else goes through the catalog.
pub fn short_tag_fast_path(tag: &str) -> Option<&'static str> {
    match tag {
        "us" => Some("00000409"),
        "ru" => Some("00000419"),
        _ => None,
    }
}

/// Human-readable catalog listing: "name trimmed-id" pairs, comma-joined,
/// with the identifier's leading zeros dropped. Doubles as the help text in
/// unknown-layout errors.
pub fn format_list(catalog: &[LayoutEntry]) -> String {
    catalog
        .iter()
        .map(|entry| format!("{} {}", entry.name, entry.layout_id.trim_start_matches('0')))
        .collect::<Vec<_>>()
        .join(", ")
}

fn unknown(token: &str, catalog: &[LayoutEntry]) -> LayoutError {
    LayoutError::UnknownLayout {
        token: token.to_string(),
        available: format_list(catalog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winlayout_shared_types::RawHandle;

    fn catalog() -> Vec<LayoutEntry> {
        vec![
            LayoutEntry {
                handle: RawHandle(0x0409_0409),
                layout_id: "00000409".to_string(),
                name: "en-US".to_string(),
                short_name: "us".to_string(),
            },
            LayoutEntry {
                handle: RawHandle(0x0419_0419),
                layout_id: "00000419".to_string(),
                name: "ru-RU".to_string(),
                short_name: "ru".to_string(),
            },
        ]
    }

    #[test]
    fn resolves_exact_locale_name() {
        let catalog = catalog();
        assert_eq!(resolve("ru-RU", &catalog).unwrap().layout_id, "00000419");
    }

    #[test]
    fn resolves_identifier_substring() {
        let catalog = catalog();
        assert_eq!(resolve("0419", &catalog).unwrap().name, "ru-RU");
    }

    #[test]
    fn full_identifier_round_trips_to_its_own_entry() {
        let catalog = catalog();
        for entry in &catalog {
            assert_eq!(resolve(&entry.layout_id, &catalog).unwrap(), entry);
        }
    }

    #[test]
    fn first_enumerated_match_wins() {
        let catalog = catalog();
        // "0" is a substring of both identifiers.
        assert_eq!(resolve("0", &catalog).unwrap().name, "en-US");
    }

    #[test]
    fn unknown_token_lists_available_layouts() {
        let err = resolve("zz", &catalog()).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownLayout {
                token: "zz".to_string(),
                available: "en-US 409, ru-RU 419".to_string(),
            }
        );
        assert_eq!(err.kind(), "UnknownLayoutError");
    }

    #[test]
    fn short_tag_fast_path_covers_us_and_ru_only() {
        assert_eq!(short_tag_fast_path("us"), Some("00000409"));
        assert_eq!(short_tag_fast_path("ru"), Some("00000419"));
        assert_eq!(short_tag_fast_path("de"), None);
    }

    #[test]
    fn resolve_short_matches_short_name() {
        let catalog = catalog();
        assert_eq!(resolve_short("ru", &catalog).unwrap().name, "ru-RU");
        assert!(resolve_short("zz", &catalog).is_err());
    }
}
