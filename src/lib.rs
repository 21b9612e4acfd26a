//! Silksong save decoding and progress resolution
//!
//! This library implements the full pipeline a save-file tracker needs:
//! decrypting the game's proprietary `.dat` container, validating the
//! decrypted JSON against the known schema, indexing scene-scoped flags,
//! and resolving configured items into done/accepted/locked states.
//!
//! ## Pipeline
//!
//! ```text
//! raw bytes -> unwrap (header + varint prefix) -> base64 -> AES-256-ECB
//!           -> JSON text -> schema validation -> typed save + flag index
//!           -> per-item resolution -> unlock classification
//! ```
//!
//! ## Loading a save
//!
//! ```rust,no_run
//! use silksave::Session;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let mut session = Session::new();
//!     session.load_file("user1.dat")?;
//!
//!     let save = session.save().expect("just loaded");
//!     println!("completion: {}%", save.player_data.completion_percentage);
//!     Ok(())
//! }
//! ```
//!
//! ## Resolving items
//!
//! ```rust,no_run
//! use silksave::{ItemConfig, Session};
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let mut session = Session::new();
//!     session.load_file("user1.dat")?;
//!     let config = ItemConfig::from_file("items.json")?;
//!
//!     for category in &config.categories {
//!         for item in &category.items {
//!             let value = session.resolve(item);
//!             println!("{:?} -> {:?}", item.id, value);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! The three fatal load errors — [`Error::MalformedInput`],
//! [`Error::Decryption`], [`Error::Validation`] — abort the load and leave
//! any previously loaded save untouched. Resolution-time absence (an item
//! not yet obtained) is data, not an error: it resolves to `Missing`,
//! `false`, or `0` depending on the item type.

pub mod classify;
pub mod dat;
pub mod error;
pub mod exclusive;
pub mod flags;
pub mod item;
pub mod resolve;
pub mod save;
pub mod schema;
pub mod session;

pub use classify::{classify, Unlock, UnlockState};
pub use dat::{decode_dat, encode_dat, SaveFormat};
pub use error::{Error, Result};
pub use exclusive::{count_progress, filter_exclusive, EXCLUSIVE_GROUPS};
pub use flags::FlagIndex;
pub use item::{AnyOfCheck, Category, Item, ItemConfig, ItemRule};
pub use resolve::{resolve, Progress, Resolved};
pub use save::{Mode, PlayerData, SaveFile};
pub use schema::{parse_and_validate, validate, Violation};
pub use session::{LoadedSave, Session};
