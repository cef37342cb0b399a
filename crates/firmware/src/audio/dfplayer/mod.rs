//! DFPlayer Mini MP3 module (DFRobot)
//!
//! Write-only UART driver. The frame codec is plain data and host-testable;
//! the driver is generic over `embedded_io_async::Write` so it runs on the
//! STM32 UART and on in-memory sinks alike.

pub mod protocol;

mod driver;

pub use driver::{DfPlayer, DfPlayerError};
