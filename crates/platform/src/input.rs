//! Input device abstraction

/// Input device trait for the front-panel buttons
pub trait InputDevice {
    /// Wait for next input event (async, power-efficient)
    fn wait_for_event(&mut self) -> impl core::future::Future<Output = InputEvent>;

    /// Poll for event (non-blocking)
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Input events from buttons
///
/// Debouncing happens before an event is produced; one physical press is
/// exactly one `Click`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Button pressed and released
    Click(Button),
}

/// Physical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Play/Pause button
    PlayPause,
    /// Volume up
    VolumeUp,
    /// Volume down
    VolumeDown,
}

impl Button {
    /// Every button, in panel order.
    pub const ALL: [Self; 3] = [Self::PlayPause, Self::VolumeUp, Self::VolumeDown];

    /// Label for log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlayPause => "play/pause",
            Self::VolumeUp => "volume-up",
            Self::VolumeDown => "volume-down",
        }
    }
}
