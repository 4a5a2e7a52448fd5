//! # Persistence
//!
//! Two ways out of the running engine and two ways back in:
//!
//! * **Autosave** ([`autosave`]): incremental, debounced writes of the world
//!   into a [`KeyValueStore`](store::KeyValueStore), read back when the engine
//!   starts.
//! * **Export / import** ([`format`]): a single JSON snapshot of the whole
//!   world, written on request and parsed back in two phases so the host can
//!   confirm before anything changes.

use web_time::{SystemTime, UNIX_EPOCH};

pub mod autosave;
pub mod format;
pub mod store;

/// Extension of exported snapshot files.
pub const EXPORT_EXTENSION: &str = "world";

/// File name for an export taken now: `world-<unix millis>.world`.
pub fn export_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    format!("world-{}.{}", millis, EXPORT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_names_carry_a_timestamp() {
        let name = export_file_name();
        let stamp = name
            .strip_prefix("world-")
            .and_then(|rest| rest.strip_suffix(".world"))
            .unwrap();
        assert!(stamp.parse::<u128>().unwrap() > 0);
    }
}
