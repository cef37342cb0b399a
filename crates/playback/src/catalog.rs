//! Track catalog: maps a card UID to the track it starts.
//!
//! The catalog is loaded once at boot and never changes afterwards. Keys use
//! the `a:b:c:d` form (four decimal UID bytes, reader order), both in the
//! compiled-in table and in `tracks.json`.

use core::fmt;
use core::str::FromStr;

use heapless::{LinearMap, String};
use platform::UID_LEN;
use thiserror_no_std::Error;

/// Separator between UID bytes in a catalog key.
pub const KEY_SEPARATOR: char = ':';

/// Longest track name kept in memory (bytes, UTF-8).
pub const NAME_CAPACITY: usize = 32;

/// Catalog construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Key is not four `:`-separated decimal bytes.
    #[error("catalog key is not four ':'-separated bytes")]
    MalformedKey,
    /// Two rows map the same card.
    #[error("card {0} appears twice in the catalog")]
    DuplicateKey(CardId),
    /// More rows than the catalog capacity.
    #[error("catalog capacity exceeded")]
    CatalogFull,
    /// `tracks.json` could not be parsed.
    #[error("invalid catalog JSON at line {line}, column {column}")]
    InvalidJson {
        /// 1-based line of the parse error.
        line: usize,
        /// 1-based column of the parse error.
        column: usize,
    },
}

// ── CardId ───────────────────────────────────────────────────────────────────

/// Card identifier: the first four UID bytes in reader order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId([u8; UID_LEN]);

impl CardId {
    /// Wrap raw UID bytes.
    pub const fn from_bytes(bytes: [u8; UID_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw UID bytes.
    pub const fn bytes(self) -> [u8; UID_LEN] {
        self.0
    }

    /// Parse a catalog key such as `"1:2:3:4"`.
    ///
    /// Exactly four decimal values in `0..=255` are accepted; signs are not.
    pub fn parse_key(key: &str) -> Result<Self, CatalogError> {
        let mut bytes = [0u8; UID_LEN];
        let mut parts = key.split(KEY_SEPARATOR);
        for slot in &mut bytes {
            let part = parts.next().ok_or(CatalogError::MalformedKey)?;
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CatalogError::MalformedKey);
            }
            *slot = part.parse().map_err(|_| CatalogError::MalformedKey)?;
        }
        if parts.next().is_some() {
            return Err(CatalogError::MalformedKey);
        }
        Ok(Self(bytes))
    }
}

impl From<[u8; UID_LEN]> for CardId {
    fn from(bytes: [u8; UID_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for CardId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_key(s)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}:{b}:{c}:{d}")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CardId {
    fn format(&self, f: defmt::Formatter<'_>) {
        let [a, b, c, d] = self.0;
        defmt::write!(f, "{=u8}:{=u8}:{=u8}:{=u8}", a, b, c, d);
    }
}

// ── TrackDescriptor ──────────────────────────────────────────────────────────

/// A track on the MP3 module's storage card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    folder: u8,
    file: u8,
    name: String<NAME_CAPACITY>,
}

impl TrackDescriptor {
    /// Describe `file` in `folder`, with a display name for logs.
    ///
    /// Names longer than [`NAME_CAPACITY`] bytes are cut at the last whole
    /// character that fits.
    pub fn new(folder: u8, file: u8, name: &str) -> Self {
        let mut owned = String::new();
        for ch in name.chars() {
            if owned.push(ch).is_err() {
                warn!("Track name truncated: {}", owned.as_str());
                break;
            }
        }
        Self {
            folder,
            file,
            name: owned,
        }
    }

    /// Folder number on the module's card.
    pub fn folder(&self) -> u8 {
        self.folder
    }

    /// File number inside the folder.
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// One row of a compiled-in track table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEntry<'a> {
    /// Card key, `a:b:c:d`.
    pub key: &'a str,
    /// Folder number.
    pub folder: u8,
    /// File number.
    pub file: u8,
    /// Display name.
    pub name: &'a str,
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// Read-only card → track lookup.
///
/// A miss is a normal outcome (an unprogrammed card), not an error.
pub trait Catalog {
    /// Track for `card`, if the card is known.
    fn lookup(&self, card: &CardId) -> Option<&TrackDescriptor>;
}

/// Fixed-capacity catalog.
pub struct TrackCatalog<const N: usize> {
    tracks: LinearMap<CardId, TrackDescriptor, N>,
}

impl<const N: usize> TrackCatalog<N> {
    /// Empty catalog.
    pub const fn new() -> Self {
        Self {
            tracks: LinearMap::new(),
        }
    }

    /// Build a catalog from table rows.
    pub fn from_entries(entries: &[TrackEntry<'_>]) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for entry in entries {
            let card = CardId::parse_key(entry.key)?;
            let track = TrackDescriptor::new(entry.folder, entry.file, entry.name);
            catalog.insert(card, track)?;
        }
        Ok(catalog)
    }

    /// Parse the `tracks.json` format:
    ///
    /// ```json
    /// { "1:2:3:4": { "file": 3, "folder": 1, "name": "Song" } }
    /// ```
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        #[derive(serde::Deserialize)]
        struct JsonTrack {
            file: u8,
            folder: u8,
            name: std::string::String,
        }

        let rows: std::collections::BTreeMap<std::string::String, JsonTrack> =
            serde_json::from_str(json).map_err(|e| CatalogError::InvalidJson {
                line: e.line(),
                column: e.column(),
            })?;

        let mut catalog = Self::new();
        for (key, row) in &rows {
            let card = CardId::parse_key(key)?;
            catalog.insert(card, TrackDescriptor::new(row.folder, row.file, &row.name))?;
        }
        Ok(catalog)
    }

    /// Add a track. Rejects duplicates and overflow.
    pub fn insert(&mut self, card: CardId, track: TrackDescriptor) -> Result<(), CatalogError> {
        if self.tracks.contains_key(&card) {
            return Err(CatalogError::DuplicateKey(card));
        }
        self.tracks
            .insert(card, track)
            .map(|_| ())
            .map_err(|_| CatalogError::CatalogFull)
    }

    /// Number of known cards.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns `true` if no card is known.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// All entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &TrackDescriptor)> {
        self.tracks.iter()
    }
}

impl<const N: usize> Default for TrackCatalog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Catalog for TrackCatalog<N> {
    fn lookup(&self, card: &CardId) -> Option<&TrackDescriptor> {
        self.tracks.get(card)
    }
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn lookup(&self, card: &CardId) -> Option<&TrackDescriptor> {
        (**self).lookup(card)
    }
}
