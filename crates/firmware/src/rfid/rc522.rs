//! MFRC522 card scanner
//!
//! Adapts the `mfrc522` crate to [`platform::CardScanner`]. The reader sits on
//! SPI1 (see [`platform::SpiConfig::mfrc522`]) with a GPIO chip select wrapped
//! in an `embedded-hal-bus` device.
//!
//! | Signal | MCU pin |
//! |--------|---------|
//! | SCK    | PA5     |
//! | MISO   | PA6     |
//! | MOSI   | PB5     |
//! | NSS    | PD14    |
//!
//! A tick maps to reader operations as follows:
//!
//! - `reset` halts the card selected on the previous tick (HLTA)
//! - `find_card` sends WUPA, which also wakes halted cards, so a card left on
//!   the reader is found again on every tick
//! - `read_uid` runs anticollision/select and keeps the first four UID bytes

use mfrc522::comm::Interface;
use mfrc522::{Initialized, Mfrc522};
use platform::{CardScanner, UID_LEN};
use thiserror_no_std::Error;

/// MFRC522 adapter errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rc522Error {
    /// No card answered the WUPA issued by `find_card`.
    #[error("no card selected")]
    NoCard,
    /// Anticollision or select failed.
    #[error("UID select failed")]
    Select,
    /// The card reported fewer than four UID bytes.
    #[error("UID too short")]
    ShortUid,
}

/// MFRC522-backed [`CardScanner`]
pub struct Rc522Scanner<COMM: Interface> {
    reader: Mfrc522<COMM, Initialized>,
    atqa: Option<mfrc522::AtqA>,
}

impl<COMM: Interface> Rc522Scanner<COMM> {
    /// Wrap an initialised reader.
    pub fn new(reader: Mfrc522<COMM, Initialized>) -> Self {
        Self { reader, atqa: None }
    }
}

impl<COMM: Interface> CardScanner for Rc522Scanner<COMM> {
    type Error = Rc522Error;

    async fn reset(&mut self) -> Result<(), Self::Error> {
        if self.atqa.take().is_some() {
            // A card that already left the field cannot acknowledge; harmless.
            let _ = self.reader.hlta();
        }
        Ok(())
    }

    async fn find_card(&mut self) -> bool {
        self.atqa = self.reader.wupa().ok();
        self.atqa.is_some()
    }

    async fn read_uid(&mut self) -> Result<[u8; UID_LEN], Self::Error> {
        let atqa = self.atqa.as_ref().ok_or(Rc522Error::NoCard)?;
        let uid = self.reader.select(atqa).map_err(|_| Rc522Error::Select)?;
        match uid.as_bytes() {
            [a, b, c, d, ..] => Ok([*a, *b, *c, *d]),
            _ => Err(Rc522Error::ShortUid),
        }
    }
}
