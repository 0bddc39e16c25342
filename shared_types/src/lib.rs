pub mod config;
pub mod layout;

pub use config::Config;
pub use layout::{LayoutEntry, RawHandle};
