//! DFPlayer Mini driver
//!
//! Sends one [`protocol`](super::protocol) frame per command over the UART TX
//! line. Replies from the module are ignored, so the driver only needs a
//! writer.

use embedded_io_async::Write;
use platform::{Mp3Player, PlayerCommand, Volume};
use thiserror_no_std::Error;

use super::protocol;

/// DFPlayer driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DfPlayerError {
    /// The UART rejected the frame.
    #[error("UART write failed")]
    Write,
}

/// DFPlayer Mini driver
pub struct DfPlayer<W> {
    uart: W,
}

impl<W: Write> DfPlayer<W> {
    /// Create a driver on a configured 9600 8N1 UART transmitter.
    ///
    /// See [`platform::UartConfig::dfplayer`].
    pub fn new(uart: W) -> Self {
        Self { uart }
    }

    /// Release the UART.
    pub fn release(self) -> W {
        self.uart
    }

    /// Encode and transmit one command.
    pub async fn send(&mut self, command: PlayerCommand) -> Result<(), DfPlayerError> {
        let frame = protocol::encode(command);
        self.uart
            .write_all(&frame)
            .await
            .map_err(|_| DfPlayerError::Write)?;
        self.uart.flush().await.map_err(|_| DfPlayerError::Write)
    }
}

impl<W: Write> Mp3Player for DfPlayer<W> {
    type Error = DfPlayerError;

    async fn reset(&mut self) -> Result<(), Self::Error> {
        self.send(PlayerCommand::Reset).await
    }

    async fn set_volume(&mut self, volume: Volume) -> Result<(), Self::Error> {
        self.send(PlayerCommand::SetVolume(volume)).await
    }

    async fn play(&mut self) -> Result<(), Self::Error> {
        self.send(PlayerCommand::Play).await
    }

    async fn pause(&mut self) -> Result<(), Self::Error> {
        self.send(PlayerCommand::Pause).await
    }

    async fn play_folder(&mut self, folder: u8, file: u8) -> Result<(), Self::Error> {
        self.send(PlayerCommand::PlayFolder { folder, file }).await
    }
}
