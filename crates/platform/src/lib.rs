//! Hardware Abstraction Layer (HAL) for the Tag Jukebox
//!
//! This crate provides trait-based abstractions for the three external
//! collaborators of the player, enabling development and testing without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Feature Layer (playback: catalog + controller)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (Embassy HAL + drivers)
//! ```
//!
//! # Abstractions
//!
//! - [`Mp3Player`] - Serial MP3 module commands
//! - [`CardScanner`] - RFID card presence and UID
//! - [`InputDevice`] - Debounced button clicks
//!
//! # Features
//!
//! - `std`: Expose [`mocks`] to downstream test code
//! - `hardware`: Physical hardware target marker
//! - `defmt`: Enable defmt formatting derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{Mp3Player, Volume};
//!
//! async fn example<P: Mp3Player>(player: &mut P) {
//!     let _ = player.set_volume(Volume::new(15)).await;
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // hardware accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod audio_types;
pub mod config;
pub mod input;
pub mod mocks;
pub mod peripheral;
pub mod player;
pub mod scanner;

// Re-export main high-level traits
pub use audio_types::{OutOfRangeError, Volume, VolumeLimits, PLAYER_VOLUME_CEILING};
pub use config::{ConfigError, PlayerConfig};
pub use input::{Button, InputDevice, InputEvent};
pub use player::{Mp3Player, PlayerCommand};
pub use scanner::{CardScanner, UID_LEN};

// Re-export peripheral types
pub use peripheral::{BitOrder, DataBits, Parity, SpiConfig, SpiMode, StopBits, UartConfig};
