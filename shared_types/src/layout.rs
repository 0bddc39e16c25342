/// Opaque keyboard layout handle (HKL) as returned by the OS.
///
/// Valid only for the lifetime of the query that produced it; the same
/// installed layout may come back as a different handle value in another
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(pub isize);

impl RawHandle {
    /// High 16 bits: the device half. Encodes either a legacy layout
    /// identifier or, when the top nibble is 0xF, a registry lookup key.
    pub fn device(self) -> u16 {
        ((self.0 >> 16) & 0xffff) as u16
    }

    /// Low 16 bits: the input language identifier.
    pub fn language(self) -> u16 {
        (self.0 & 0xffff) as u16
    }
}

/// One installed keyboard layout, rebuilt fresh on every enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub handle: RawHandle,
    /// Stable 8-hex-digit layout identifier (KLID), uppercase.
    pub layout_id: String,
    /// Locale name, e.g. "en-US".
    pub name: String,
    /// Lowercase locale subtag, e.g. "us".
    pub short_name: String,
}
