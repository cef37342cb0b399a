//! RFID card reader abstraction

/// Number of UID bytes the application keys tracks on.
///
/// Cards with 7- or 10-byte UIDs are reduced to their first four bytes, in
/// the order the reader returns them.
pub const UID_LEN: usize = 4;

/// Card reader trait
///
/// One scan is `reset` → `find_card` → `read_uid`. Readers keep whatever
/// state they need between the calls of a single scan.
pub trait CardScanner {
    /// Error type
    type Error;

    /// Clear any latched error or selection state in the reader
    fn reset(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Returns `true` if a card is in the field
    fn find_card(&mut self) -> impl core::future::Future<Output = bool>;

    /// Read the UID of the card found by the last `find_card`
    fn read_uid(
        &mut self,
    ) -> impl core::future::Future<Output = Result<[u8; UID_LEN], Self::Error>>;
}
