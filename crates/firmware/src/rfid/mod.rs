//! RFID card reader
//!
//! The MFRC522 adapter is hardware-only (`hardware` feature). Host builds use
//! [`platform::mocks::MockScanner`].

#[cfg(feature = "hardware")]
mod rc522;

#[cfg(feature = "hardware")]
pub use rc522::{Rc522Error, Rc522Scanner};
