use thiserror::Error;

/// Recoverable failures surfaced to the command layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// No installed layout matched the user's token. `available` is the
    /// formatted catalog, printed verbatim as help text.
    #[error("unknown language id {token} \n use one of: {available}")]
    UnknownLayout { token: String, available: String },

    /// The OS returned a layout handle whose input language cannot be mapped
    /// to a usable locale name. Indicates a broken installation.
    #[error("cannot resolve locale name for input language {language_id:#06x}")]
    LocaleResolution { language_id: u16 },
}

impl LayoutError {
    /// Short kind label printed ahead of the message.
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutError::UnknownLayout { .. } => "UnknownLayoutError",
            LayoutError::LocaleResolution { .. } => "LocaleResolutionError",
        }
    }
}
