//! Compiled-in track table.
//!
//! Keys are card UIDs as printed by the "New card" log line. To program a new
//! card: put it on the reader, copy the key from the log, and add a row here
//! pointing at `NN/MMM.mp3` on the MP3 module's storage card.

use playback::{CatalogError, TrackCatalog, TrackEntry};

/// Catalog capacity.
pub const MAX_TRACKS: usize = 64;

/// Card → track rows.
pub const TRACK_TABLE: &[TrackEntry<'static>] = &[
    TrackEntry {
        key: "136:4:201:77",
        folder: 1,
        file: 1,
        name: "Morning Songs",
    },
    TrackEntry {
        key: "4:83:125:18",
        folder: 1,
        file: 2,
        name: "Animal Sounds",
    },
    TrackEntry {
        key: "211:9:44:160",
        folder: 2,
        file: 1,
        name: "Bedtime Story",
    },
    TrackEntry {
        key: "98:176:3:250",
        folder: 2,
        file: 2,
        name: "Lullabies",
    },
];

/// Build the catalog from [`TRACK_TABLE`].
pub fn load_catalog() -> Result<TrackCatalog<MAX_TRACKS>, CatalogError> {
    TrackCatalog::from_entries(TRACK_TABLE)
}
