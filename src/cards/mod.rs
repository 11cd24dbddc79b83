//! Card system: definitions, the catalog arena, and the standard set.
//!
//! ## Key Types
//!
//! - `CardId`: Index of a definition in its catalog
//! - `CardDefinition`: Cost, ordered effects and flags
//! - `CardCatalog`: Definition storage and authored-record loading
//!
//! Hands and the deck pool hold `CardId`s; several copies of one
//! definition can be in circulation at once.

pub mod catalog;
pub mod definition;
pub mod standard;

pub use catalog::{CardCatalog, CardRecord, ConditionKind, EffectRecord, MAX_EFFECT_MAGNITUDE};
pub use definition::{CardDefinition, CardId, Cost, EffectList};
pub use standard::{standard_catalog, standard_cards};
