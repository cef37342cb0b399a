//! Audio output: the serial MP3 module
//!
//! The device does no decoding of its own. Tracks live on the MP3 module's
//! storage card and playback is driven by serial commands.
//!
//! # Structure
//!
//! - `dfplayer/`: DFPlayer Mini frame codec and [`DfPlayer`] driver
//!
//! # Dependency Injection
//!
//! Application code targets the [`platform::Mp3Player`] trait:
//!
//! ```rust,ignore
//! // Hardware:
//! PlaybackController::new(DfPlayer::new(uart_tx), catalog, &config);
//! // Tests:
//! PlaybackController::new(MockPlayer::new(), catalog, &config);
//! ```

pub mod dfplayer;

pub use dfplayer::{DfPlayer, DfPlayerError};
