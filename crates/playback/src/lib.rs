//! Card playback core: track catalog and playback controller
//!
//! Pure coordination logic: no hardware, no timers. The firmware crate feeds
//! it scan results and button clicks; it answers with commands on the
//! [`platform::Mp3Player`] it owns.
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]

#[macro_use]
mod fmt;

pub mod catalog;
pub mod controller;

pub use catalog::{CardId, Catalog, CatalogError, TrackCatalog, TrackDescriptor, TrackEntry};
pub use controller::{PlaybackController, PlaybackState, SelectOutcome};

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    /// Catalog key and lookup tests
    mod catalog_tests {
        use crate::catalog::{
            CardId, Catalog, CatalogError, TrackCatalog, TrackDescriptor, TrackEntry, NAME_CAPACITY,
        };

        const TABLE: &[TrackEntry<'static>] = &[
            TrackEntry {
                key: "1:2:3:4",
                folder: 1,
                file: 3,
                name: "Song",
            },
            TrackEntry {
                key: "136:4:201:77",
                folder: 2,
                file: 1,
                name: "Bedtime story",
            },
        ];

        #[test]
        fn test_key_parses_in_reader_order() {
            let card: CardId = "136:4:201:77".parse().expect("valid key");
            assert_eq!(card.bytes(), [136, 4, 201, 77]);
        }

        #[test]
        fn test_key_display_round_trips() {
            let card = CardId::from_bytes([0, 255, 17, 9]);
            assert_eq!(format!("{card}"), "0:255:17:9");
        }

        #[test]
        fn test_key_rejects_wrong_shape() {
            for bad in ["", "1:2:3", "1:2:3:4:5", "1:2:3:256", "a:b:c:d", "1::3:4", "1-2-3-4", "+1:2:3:4", " 1:2:3:4"] {
                assert_eq!(
                    CardId::parse_key(bad),
                    Err(CatalogError::MalformedKey),
                    "{bad:?} must be rejected"
                );
            }
        }

        #[test]
        fn test_lookup_hit_and_miss() {
            let catalog: TrackCatalog<4> = TrackCatalog::from_entries(TABLE).unwrap();
            let track = catalog.lookup(&CardId::from_bytes([1, 2, 3, 4])).unwrap();
            assert_eq!((track.folder(), track.file(), track.name()), (1, 3, "Song"));
            assert!(catalog.lookup(&CardId::from_bytes([4, 3, 2, 1])).is_none());
        }

        #[test]
        fn test_duplicate_card_rejected() {
            let rows = [TABLE[0], TABLE[0]];
            let err = TrackCatalog::<4>::from_entries(&rows).err();
            assert_eq!(
                err,
                Some(CatalogError::DuplicateKey(CardId::from_bytes([1, 2, 3, 4])))
            );
        }

        #[test]
        fn test_capacity_exceeded_rejected() {
            let err = TrackCatalog::<1>::from_entries(TABLE).err();
            assert_eq!(err, Some(CatalogError::CatalogFull));
        }

        #[test]
        fn test_long_name_is_truncated_and_row_kept() {
            let rows = [
                TABLE[0],
                TrackEntry {
                    key: "5:6:7:8",
                    folder: 3,
                    file: 4,
                    name: "The Very Hungry Caterpillar (read aloud)",
                },
            ];
            let catalog: TrackCatalog<4> = TrackCatalog::from_entries(&rows).unwrap();
            assert_eq!(catalog.len(), 2);
            let track = catalog.lookup(&CardId::from_bytes([5, 6, 7, 8])).unwrap();
            assert_eq!((track.folder(), track.file()), (3, 4));
            assert_eq!(track.name(), "The Very Hungry Caterpillar (rea");
            assert_eq!(track.name().len(), NAME_CAPACITY);
        }

        #[test]
        fn test_truncation_keeps_whole_characters() {
            // 31 ASCII bytes then a 2-byte char that would straddle the limit
            let name = format!("{}é", "a".repeat(NAME_CAPACITY - 1));
            let track = TrackDescriptor::new(1, 1, &name);
            assert_eq!(track.name(), "a".repeat(NAME_CAPACITY - 1));
        }
    }

    /// Controller state machine tests
    mod controller_tests {
        use platform::mocks::MockPlayer;
        use platform::{PlayerCommand, PlayerConfig, Volume};

        use crate::catalog::{CardId, TrackCatalog, TrackEntry};
        use crate::controller::{PlaybackController, SelectOutcome};

        const SONG: CardId = CardId::from_bytes([1, 2, 3, 4]);
        const STORY: CardId = CardId::from_bytes([5, 6, 7, 8]);
        const STRANGER: CardId = CardId::from_bytes([9, 9, 9, 9]);

        fn controller() -> PlaybackController<MockPlayer, TrackCatalog<4>> {
            let catalog = TrackCatalog::from_entries(&[
                TrackEntry {
                    key: "1:2:3:4",
                    folder: 1,
                    file: 3,
                    name: "Song",
                },
                TrackEntry {
                    key: "5:6:7:8",
                    folder: 2,
                    file: 9,
                    name: "Story",
                },
            ])
            .unwrap();
            PlaybackController::new(MockPlayer::new(), catalog, &PlayerConfig::DEFAULT)
        }

        #[test]
        fn test_controller_starts_idle() {
            let c = controller();
            let state = c.state();
            assert!(!state.is_playing());
            assert_eq!(state.current_card(), None);
            assert_eq!(state.volume(), Volume::new(15));
            assert!(c.player().commands().is_empty());
        }

        #[tokio::test]
        async fn test_known_card_sends_pause_folder_play() {
            let mut c = controller();
            assert_eq!(c.select_card(SONG).await, SelectOutcome::Loaded);
            assert_eq!(
                c.player().commands(),
                &[
                    PlayerCommand::Pause,
                    PlayerCommand::PlayFolder { folder: 1, file: 3 },
                    PlayerCommand::Play,
                ]
            );
            assert!(c.state().is_playing());
            assert_eq!(c.state().current_card(), Some(SONG));
        }

        #[tokio::test]
        async fn test_rescan_of_playing_card_is_silent() {
            let mut c = controller();
            c.select_card(SONG).await;
            c.player_mut().clear();
            assert_eq!(c.select_card(SONG).await, SelectOutcome::AlreadyPlaying);
            assert!(c.player().commands().is_empty());
        }

        #[tokio::test]
        async fn test_rescan_of_paused_card_restarts_it() {
            let mut c = controller();
            c.select_card(SONG).await;
            c.toggle_play_pause().await;
            c.player_mut().clear();
            assert_eq!(c.select_card(SONG).await, SelectOutcome::Loaded);
            assert_eq!(c.player().commands().len(), 3);
            assert!(c.state().is_playing());
        }

        #[tokio::test]
        async fn test_unknown_card_keeps_current_track() {
            let mut c = controller();
            c.select_card(STORY).await;
            let before = c.state();
            c.player_mut().clear();
            assert_eq!(c.select_card(STRANGER).await, SelectOutcome::UnknownCard);
            assert_eq!(c.state(), before);
            assert!(c.player().commands().is_empty());
        }

        #[tokio::test]
        async fn test_switching_cards_reloads() {
            let mut c = controller();
            c.select_card(SONG).await;
            c.player_mut().clear();
            assert_eq!(c.select_card(STORY).await, SelectOutcome::Loaded);
            assert_eq!(
                c.player().commands()[1],
                PlayerCommand::PlayFolder { folder: 2, file: 9 }
            );
            assert_eq!(c.state().current_card(), Some(STORY));
        }

        #[tokio::test]
        async fn test_toggle_without_card_is_noop() {
            let mut c = controller();
            assert_eq!(c.toggle_play_pause().await, None);
            assert!(!c.state().is_playing());
            assert!(c.player().commands().is_empty());
        }

        #[tokio::test]
        async fn test_toggle_alternates_pause_and_play() {
            let mut c = controller();
            c.select_card(SONG).await;
            c.player_mut().clear();
            assert_eq!(c.toggle_play_pause().await, Some(false));
            assert_eq!(c.toggle_play_pause().await, Some(true));
            assert_eq!(
                c.player().commands(),
                &[PlayerCommand::Pause, PlayerCommand::Play]
            );
        }

        #[tokio::test]
        async fn test_volume_clamped_but_always_sent() {
            let mut c = controller();
            for _ in 0..20 {
                c.adjust_volume(1).await;
            }
            assert_eq!(c.state().volume(), Volume::new(25));
            assert_eq!(c.player().commands().len(), 20);
            assert_eq!(
                c.player().commands().last(),
                Some(&PlayerCommand::SetVolume(Volume::new(25)))
            );
        }

        #[tokio::test]
        async fn test_volume_floor() {
            let config = PlayerConfig {
                initial_volume: Volume::new(0),
                ..PlayerConfig::DEFAULT
            };
            let mut c = PlaybackController::new(MockPlayer::new(), TrackCatalog::<1>::new(), &config);
            assert_eq!(c.adjust_volume(-1).await, Volume::new(0));
            assert_eq!(
                c.player().commands(),
                &[PlayerCommand::SetVolume(Volume::new(0))]
            );
        }

        #[tokio::test]
        async fn test_power_on_then_apply_volume() {
            let mut c = controller();
            c.power_on().await;
            c.apply_volume().await;
            assert_eq!(
                c.player().commands(),
                &[
                    PlayerCommand::Reset,
                    PlayerCommand::SetVolume(Volume::new(15))
                ]
            );
        }

        #[tokio::test]
        async fn test_player_failure_does_not_block_state_change() {
            let mut c = controller();
            c.player_mut().fail_commands(true);
            assert_eq!(c.select_card(SONG).await, SelectOutcome::Loaded);
            assert!(c.state().is_playing());
            assert_eq!(c.player().commands().len(), 3);
        }

        #[test]
        fn test_initial_volume_clamped_into_limits() {
            let config = PlayerConfig {
                initial_volume: Volume::new(30),
                ..PlayerConfig::DEFAULT
            };
            let c = PlaybackController::new(MockPlayer::new(), TrackCatalog::<1>::new(), &config);
            assert_eq!(c.state().volume(), Volume::new(25));
        }
    }
}
