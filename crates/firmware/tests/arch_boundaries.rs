//! Architecture boundary tests: run with `cargo test -p firmware --test arch_boundaries`
// Architecture test file: unwrap/indexing are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::indexing_slicing)]
//!
//! Layering rules:
//!   Rule 1: platform (HAL traits) must not depend on playback or firmware
//!   Rule 2: playback must not depend on firmware or on any HAL crate
//!   Rule 3: firmware drivers implement the platform traits
//!
//! Rules 1 and 2 are checked against the crate manifests, embedded at compile
//! time; rule 3 by trait bounds.

const PLATFORM_MANIFEST: &str = include_str!("../../platform/Cargo.toml");
const PLAYBACK_MANIFEST: &str = include_str!("../../playback/Cargo.toml");

/// Crates only the firmware layer may pull in.
const HAL_CRATES: &[&str] = &["embassy-stm32", "embassy-executor", "mfrc522", "embedded-hal-bus"];

/// Names declared in every `[*dependencies]` table of `manifest`.
fn dependency_names(manifest: &str) -> Vec<&str> {
    let mut in_deps = false;
    let mut names = Vec::new();
    for line in manifest.lines().map(str::trim) {
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_deps = header.ends_with("dependencies");
            // `[dependencies.defmt]` declares one crate as its own table
            if let Some((table, name)) = header.split_once('.') {
                if table.ends_with("dependencies") {
                    names.push(name);
                }
            }
            continue;
        }
        if !in_deps || line.is_empty() || line.starts_with('#') {
            continue;
        }
        // `name = ...` and dotted `name.workspace = true`
        if let Some((key, _)) = line.split_once('=') {
            names.extend(key.trim().split('.').next());
        }
    }
    names
}

#[test]
fn manifest_parser_sees_dependencies() {
    let names = dependency_names(PLAYBACK_MANIFEST);
    assert!(names.contains(&"platform"));
    assert!(names.contains(&"heapless"));
    assert!(!names.contains(&"name"), "package keys are not dependencies");

    let names = dependency_names(PLATFORM_MANIFEST);
    assert!(names.contains(&"embassy-time"));
    assert!(names.contains(&"defmt"));
    assert!(!names.contains(&"optional"));
}

/// Rule 1.
#[test]
fn platform_hal_is_independent() {
    let names = dependency_names(PLATFORM_MANIFEST);
    for banned in ["playback", "firmware"].iter().chain(HAL_CRATES) {
        assert!(!names.contains(banned), "platform must not depend on {banned}");
    }
}

/// Rule 2.
#[test]
fn playback_has_no_hal_or_firmware_dependency() {
    let names = dependency_names(PLAYBACK_MANIFEST);
    for banned in ["firmware"].iter().chain(HAL_CRATES) {
        assert!(!names.contains(banned), "playback must not depend on {banned}");
    }
}

/// The playback core runs against platform mocks alone.
#[test]
fn playback_core_needs_only_platform() {
    let catalog = playback::TrackCatalog::<1>::new();
    let controller = playback::PlaybackController::new(
        platform::mocks::MockPlayer::new(),
        catalog,
        &platform::PlayerConfig::DEFAULT,
    );
    assert!(!controller.state().is_playing());
}

/// The DFPlayer driver satisfies the player trait on any async writer.
#[test]
fn dfplayer_implements_mp3_player() {
    fn assert_player<T: platform::Mp3Player>() {}
    assert_player::<firmware::DfPlayer<NullUart>>();
}

/// Compiled-in track table is valid.
#[test]
fn track_table_loads() {
    let catalog = firmware::load_catalog().unwrap();
    assert_eq!(catalog.len(), firmware::TRACK_TABLE.len());
}

/// Boot documentation lists the player reset before the event loop.
#[test]
fn boot_steps_are_ordered() {
    let steps = firmware::boot::BOOT_SEQUENCE_STEPS;
    assert!(steps[0].starts_with("1."));
    assert!(steps.last().unwrap().contains("Event loop"));
}

struct NullUart;

impl embedded_io_async::ErrorType for NullUart {
    type Error = embedded_io_async::ErrorKind;
}

impl embedded_io_async::Write for NullUart {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }
}
