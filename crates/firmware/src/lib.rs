//! Tag Jukebox Firmware
//!
//! RFID-card-driven music box for STM32H7: put a card on the reader and the
//! serial MP3 module plays the track mapped to it.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (main.rs, app)
//!         ↓
//! Playback core (playback crate: catalog + controller)
//!         ↓
//! Drivers (audio::dfplayer, rfid, input)
//!         ↓
//! Platform HAL (Embassy, STM32)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for STM32H7 target (embassy, defmt)
//! - `emulator` - Desktop simulator (tokio, tracing)
//! - `std` - Enable standard library (for emulator and testing)
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```
//!
//! ## Simulator
//!
//! ```bash
//! cargo run --example card_player_sim --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_async)]

#[macro_use]
mod fmt;

pub mod app;
pub mod audio;
pub mod boot;
pub mod input;
pub mod rfid;
pub mod scan;
pub mod tracks;

// Re-export key types
pub use app::{AppEvent, CardPlayer};
pub use audio::{DfPlayer, DfPlayerError};
pub use scan::{ScanOutcome, ScanScheduler, SchedulerState};
pub use tracks::{load_catalog, MAX_TRACKS, TRACK_TABLE};

#[cfg(feature = "hardware")]
pub use rfid::{Rc522Error, Rc522Scanner};
