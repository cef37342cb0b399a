//! DFPlayer Mini serial protocol
//!
//! Every command is a fixed 10-byte frame at 9600 baud 8N1:
//!
//! | Byte | Value  | Meaning                                   |
//! |------|--------|-------------------------------------------|
//! | 0    | `0x7E` | Start                                     |
//! | 1    | `0xFF` | Version                                   |
//! | 2    | `0x06` | Length (bytes 1..=6)                      |
//! | 3    | CMD    | Command code                              |
//! | 4    | `0x00` | Feedback flag (no acknowledge requested)  |
//! | 5    | PH     | Parameter high byte                       |
//! | 6    | PL     | Parameter low byte                        |
//! | 7    | CH     | Checksum high byte                        |
//! | 8    | CL     | Checksum low byte                         |
//! | 9    | `0xEF` | End                                       |
//!
//! The checksum is the 16-bit two's complement of the sum of bytes 1..=6.

use platform::PlayerCommand;

// ---------------------------------------------------------------------------
// Framing
// ---------------------------------------------------------------------------

/// Frame length in bytes.
pub const FRAME_LEN: usize = 10;

/// Start byte.
pub const START: u8 = 0x7E;

/// Protocol version byte.
pub const VERSION: u8 = 0xFF;

/// Length field: version through parameter low byte.
pub const LENGTH: u8 = 0x06;

/// Feedback flag. The module's replies are not consumed, so none is requested.
pub const NO_FEEDBACK: u8 = 0x00;

/// End byte.
pub const END: u8 = 0xEF;

// ---------------------------------------------------------------------------
// Command codes
// ---------------------------------------------------------------------------

/// Set volume, parameter `0..=30`.
pub const CMD_SET_VOLUME: u8 = 0x06;

/// Soft reset of the module.
pub const CMD_RESET: u8 = 0x0C;

/// Resume playback.
pub const CMD_PLAY: u8 = 0x0D;

/// Pause playback.
pub const CMD_PAUSE: u8 = 0x0E;

/// Play file in folder: parameter high = folder, low = file.
pub const CMD_PLAY_FOLDER: u8 = 0x0F;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Command code and 16-bit parameter for `command`.
pub fn command_fields(command: PlayerCommand) -> (u8, u16) {
    match command {
        PlayerCommand::Reset => (CMD_RESET, 0),
        PlayerCommand::SetVolume(volume) => (CMD_SET_VOLUME, u16::from(volume.get())),
        PlayerCommand::Play => (CMD_PLAY, 0),
        PlayerCommand::Pause => (CMD_PAUSE, 0),
        PlayerCommand::PlayFolder { folder, file } => {
            (CMD_PLAY_FOLDER, u16::from_be_bytes([folder, file]))
        }
    }
}

/// Checksum over the version, length, command, feedback and parameter bytes.
pub fn checksum(body: &[u8]) -> u16 {
    let sum = body
        .iter()
        .fold(0u16, |acc, &byte| acc.wrapping_add(u16::from(byte)));
    0u16.wrapping_sub(sum)
}

/// Build the wire frame for `command`.
pub fn encode(command: PlayerCommand) -> [u8; FRAME_LEN] {
    let (cmd, param) = command_fields(command);
    let [ph, pl] = param.to_be_bytes();
    let body = [VERSION, LENGTH, cmd, NO_FEEDBACK, ph, pl];
    let [ch, cl] = checksum(&body).to_be_bytes();
    let [version, length, cmd, feedback, ph, pl] = body;
    [START, version, length, cmd, feedback, ph, pl, ch, cl, END]
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use platform::Volume;

    #[test]
    fn test_play_frame() {
        // 0xFF + 0x06 + 0x0D = 0x0112, two's complement 0xFEEE
        assert_eq!(
            encode(PlayerCommand::Play),
            [0x7E, 0xFF, 0x06, 0x0D, 0x00, 0x00, 0x00, 0xFE, 0xEE, 0xEF]
        );
    }

    #[test]
    fn test_volume_frame() {
        assert_eq!(
            encode(PlayerCommand::SetVolume(Volume::new(15))),
            [0x7E, 0xFF, 0x06, 0x06, 0x00, 0x00, 0x0F, 0xFE, 0xE6, 0xEF]
        );
    }

    #[test]
    fn test_folder_frame_packs_folder_high_file_low() {
        let frame = encode(PlayerCommand::PlayFolder { folder: 1, file: 3 });
        assert_eq!(&frame[3..7], &[0x0F, 0x00, 0x01, 0x03]);
        assert_eq!(&frame[7..9], &[0xFE, 0xE8]);
    }

    #[test]
    fn test_reset_and_pause_codes() {
        assert_eq!(encode(PlayerCommand::Reset)[3], CMD_RESET);
        assert_eq!(encode(PlayerCommand::Pause)[3], CMD_PAUSE);
    }

    #[test]
    fn test_checksum_makes_body_sum_zero() {
        for command in [
            PlayerCommand::Reset,
            PlayerCommand::Play,
            PlayerCommand::Pause,
            PlayerCommand::SetVolume(Volume::new(30)),
            PlayerCommand::PlayFolder { folder: 99, file: 255 },
        ] {
            let frame = encode(command);
            let sum = frame[1..9]
                .iter()
                .take(6)
                .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)));
            let check = u16::from_be_bytes([frame[7], frame[8]]);
            assert_eq!(sum.wrapping_add(check), 0, "{command:?}");
            assert_eq!(frame[0], START);
            assert_eq!(frame[9], END);
        }
    }
}
