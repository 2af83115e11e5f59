//! Tabletop combat tracker engine.
//!
//! This crate provides:
//! - A roster store of players and monsters with hit-point bookkeeping
//! - Health cards with a two-phase draft/active lifecycle
//! - An initiative-ordered turn list derived from the roster
//! - Party persistence in a single key/value slot
//! - An interaction controller tying user actions to all of the above
//!
//! Rendering is left to the front end: the controller exposes plain view
//! models that are rebuilt after every mutation.
//!
//! # Quick Start
//!
//! ```
//! use tracker_core::{Action, CharacterKind, MemoryStore, Tracker, TrackerConfig};
//! use tracker_core::card::CardField;
//! use tracker_core::testing::ScriptedPrompter;
//!
//! let mut tracker = Tracker::new(MemoryStore::new(), TrackerConfig::new());
//! let mut prompter = ScriptedPrompter::new();
//!
//! let card = tracker.new_card(CharacterKind::Player);
//! tracker.set_card_field(card, CardField::Name, "Aria").unwrap();
//! tracker.set_card_field(card, CardField::MaxHp, "30").unwrap();
//! tracker.dispatch(Action::SubmitCard(card), &mut prompter);
//!
//! assert_eq!(tracker.character("Aria").unwrap().current_hp, 30);
//! ```

pub mod card;
pub mod character;
pub mod config;
pub mod error;
pub mod headless;
pub mod initiative;
pub mod persist;
pub mod prompt;
pub mod roster;
pub mod testing;
pub mod tracker;

// Primary public API
pub use card::{CardId, CardView, HealthCards};
pub use character::{Character, CharacterId, CharacterKind};
pub use config::TrackerConfig;
pub use error::{EmptySaveKind, TrackerError};
pub use headless::HeadlessRunner;
pub use initiative::TurnEntry;
pub use persist::{FileStore, KeyValueStore, MemoryStore, PartyGateway, PersistError};
pub use prompt::Prompter;
pub use roster::Roster;
pub use tracker::{Action, LoadOutcome, Tracker};
