//! Effect system for card actions.
//!
//! - `CardEffect`: One variant per effect kind, carrying only its own fields
//! - `Target`: Who a targeted effect applies to, relative to the actor
//! - `Condition`: Predicates that substitute alternative magnitudes
//! - `EffectResolver`: Applies effects to the players and the deck pool
//!
//! All reductions clamp at 0 and production never drops below 1; the clamps
//! live on `PlayerState` so every path shares them.

mod condition;
mod effect;
mod resolver;
mod targeting;

pub use condition::{Condition, ConditionContext};
pub use effect::{CardEffect, ConditionalValue, EffectKind, EffectValue};
pub use resolver::{EffectResolver, ResolveResult, ResolveResults, ResolverContext};
pub use targeting::{Recipients, Target};
