//! Effect definitions.
//!
//! `CardEffect` has one variant per effect kind, and each variant carries
//! only the fields that kind reads. Effects that act on a selectable player
//! carry a `Target`; effects with a fixed scope (both players, or the
//! actor/opponent pair) do not.

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::targeting::Target;
use crate::core::ResourceKind;

/// Magnitude of an effect, optionally replaced when a condition holds.
///
/// ```
/// use rust_arcomag::effects::{Condition, EffectValue};
///
/// let value = EffectValue::fixed(4).or_when(Condition::TargetWallBelow(10), 8);
/// assert_eq!(value.base, 4);
/// assert_eq!(value.alternative.unwrap().value, 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectValue {
    /// Used when there is no condition or the condition is false.
    pub base: i32,
    /// Replacement used when its condition evaluates true.
    pub alternative: Option<ConditionalValue>,
}

/// A condition paired with the value it substitutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalValue {
    pub condition: Condition,
    pub value: i32,
}

impl EffectValue {
    /// An unconditional value.
    pub const fn fixed(base: i32) -> Self {
        Self {
            base,
            alternative: None,
        }
    }

    /// Use `value` instead of the base whenever `condition` holds.
    #[must_use]
    pub fn or_when(mut self, condition: Condition, value: i32) -> Self {
        self.alternative = Some(ConditionalValue { condition, value });
        self
    }
}

impl From<i32> for EffectValue {
    fn from(base: i32) -> Self {
        Self::fixed(base)
    }
}

/// Discriminant of `CardEffect`, used as the tag in authored card data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    DamageWall,
    DamageTower,
    DamageBoth,
    ModifyResource,
    ModifyProduction,
    SetProductionToOpponent,
    SetProductionToMax,
    BuildWall,
    BuildTower,
    DrawCard,
    DiscardCard,
    ForceDiscardNextCard,
    RemoveForceDiscard,
    ApplyEffectToLowestWall,
    ConditionalDamageTargetSwap,
    SwapWall,
}

impl EffectKind {
    /// Stable name for logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::DamageWall => "DamageWall",
            EffectKind::DamageTower => "DamageTower",
            EffectKind::DamageBoth => "DamageBoth",
            EffectKind::ModifyResource => "ModifyResource",
            EffectKind::ModifyProduction => "ModifyProduction",
            EffectKind::SetProductionToOpponent => "SetProductionToOpponent",
            EffectKind::SetProductionToMax => "SetProductionToMax",
            EffectKind::BuildWall => "BuildWall",
            EffectKind::BuildTower => "BuildTower",
            EffectKind::DrawCard => "DrawCard",
            EffectKind::DiscardCard => "DiscardCard",
            EffectKind::ForceDiscardNextCard => "ForceDiscardNextCard",
            EffectKind::RemoveForceDiscard => "RemoveForceDiscard",
            EffectKind::ApplyEffectToLowestWall => "ApplyEffectToLowestWall",
            EffectKind::ConditionalDamageTargetSwap => "ConditionalDamageTargetSwap",
            EffectKind::SwapWall => "SwapWall",
        }
    }

    /// Kinds that reduce an opponent's defences.
    pub const fn is_attack(self) -> bool {
        matches!(
            self,
            EffectKind::DamageWall
                | EffectKind::DamageTower
                | EffectKind::DamageBoth
                | EffectKind::ConditionalDamageTargetSwap
        )
    }

    /// Kinds that raise tower or wall.
    pub const fn is_defense(self) -> bool {
        matches!(self, EffectKind::BuildWall | EffectKind::BuildTower)
    }
}

/// A single card effect.
///
/// ## Targeted effects
///
/// Resolved once per player selected by `target`; conditions are evaluated
/// separately for each selected player.
///
/// ## Fixed-scope effects
///
/// - `SetProductionToOpponent`, `ConditionalDamageTargetSwap`, `SwapWall`:
///   always the acting player against the current opponent.
/// - `SetProductionToMax`, `ApplyEffectToLowestWall`: consider both players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    DamageWall { target: Target, amount: EffectValue },
    DamageTower { target: Target, amount: EffectValue },
    /// Wall absorbs first, the remainder hits the tower.
    DamageBoth { target: Target, amount: EffectValue },
    ModifyResource {
        target: Target,
        kind: ResourceKind,
        amount: EffectValue,
    },
    ModifyProduction {
        target: Target,
        kind: ResourceKind,
        amount: EffectValue,
    },
    /// Copy the opponent's production of `kind`, only while `condition` holds.
    SetProductionToOpponent {
        kind: ResourceKind,
        condition: Condition,
    },
    /// Raise both players' production of `kind` to the higher of the two.
    SetProductionToMax { kind: ResourceKind },
    BuildWall { target: Target, amount: EffectValue },
    BuildTower { target: Target, amount: EffectValue },
    DrawCard { target: Target },
    /// Resolves to nothing; discards go through the controller.
    DiscardCard { target: Target },
    ForceDiscardNextCard { target: Target },
    RemoveForceDiscard { target: Target },
    /// Every player with the strictly lowest wall (both on a tie) gets
    /// `production_delta` on `kind` and takes `tower_damage`.
    ApplyEffectToLowestWall {
        kind: ResourceKind,
        production_delta: i32,
        tower_damage: i32,
    },
    /// If the actor's tower is taller than the opponent's wall, the
    /// opponent's tower takes `alternative_value`; otherwise the opponent's
    /// wall takes `value`.
    ConditionalDamageTargetSwap { value: i32, alternative_value: i32 },
    SwapWall,
}

impl CardEffect {
    pub fn damage_wall(target: Target, amount: impl Into<EffectValue>) -> Self {
        Self::DamageWall {
            target,
            amount: amount.into(),
        }
    }

    pub fn damage_tower(target: Target, amount: impl Into<EffectValue>) -> Self {
        Self::DamageTower {
            target,
            amount: amount.into(),
        }
    }

    pub fn damage_both(target: Target, amount: impl Into<EffectValue>) -> Self {
        Self::DamageBoth {
            target,
            amount: amount.into(),
        }
    }

    pub fn modify_resource(target: Target, kind: ResourceKind, amount: impl Into<EffectValue>) -> Self {
        Self::ModifyResource {
            target,
            kind,
            amount: amount.into(),
        }
    }

    pub fn modify_production(
        target: Target,
        kind: ResourceKind,
        amount: impl Into<EffectValue>,
    ) -> Self {
        Self::ModifyProduction {
            target,
            kind,
            amount: amount.into(),
        }
    }

    pub fn build_wall(target: Target, amount: impl Into<EffectValue>) -> Self {
        Self::BuildWall {
            target,
            amount: amount.into(),
        }
    }

    pub fn build_tower(target: Target, amount: impl Into<EffectValue>) -> Self {
        Self::BuildTower {
            target,
            amount: amount.into(),
        }
    }

    pub fn draw(target: Target) -> Self {
        Self::DrawCard { target }
    }

    pub fn force_discard(target: Target) -> Self {
        Self::ForceDiscardNextCard { target }
    }

    pub fn remove_force_discard(target: Target) -> Self {
        Self::RemoveForceDiscard { target }
    }

    /// Get the effect kind.
    pub fn kind(&self) -> EffectKind {
        match self {
            CardEffect::DamageWall { .. } => EffectKind::DamageWall,
            CardEffect::DamageTower { .. } => EffectKind::DamageTower,
            CardEffect::DamageBoth { .. } => EffectKind::DamageBoth,
            CardEffect::ModifyResource { .. } => EffectKind::ModifyResource,
            CardEffect::ModifyProduction { .. } => EffectKind::ModifyProduction,
            CardEffect::SetProductionToOpponent { .. } => EffectKind::SetProductionToOpponent,
            CardEffect::SetProductionToMax { .. } => EffectKind::SetProductionToMax,
            CardEffect::BuildWall { .. } => EffectKind::BuildWall,
            CardEffect::BuildTower { .. } => EffectKind::BuildTower,
            CardEffect::DrawCard { .. } => EffectKind::DrawCard,
            CardEffect::DiscardCard { .. } => EffectKind::DiscardCard,
            CardEffect::ForceDiscardNextCard { .. } => EffectKind::ForceDiscardNextCard,
            CardEffect::RemoveForceDiscard { .. } => EffectKind::RemoveForceDiscard,
            CardEffect::ApplyEffectToLowestWall { .. } => EffectKind::ApplyEffectToLowestWall,
            CardEffect::ConditionalDamageTargetSwap { .. } => {
                EffectKind::ConditionalDamageTargetSwap
            }
            CardEffect::SwapWall => EffectKind::SwapWall,
        }
    }

    /// The player selector, for effects that have one.
    pub fn target(&self) -> Option<Target> {
        match self {
            CardEffect::DamageWall { target, .. }
            | CardEffect::DamageTower { target, .. }
            | CardEffect::DamageBoth { target, .. }
            | CardEffect::ModifyResource { target, .. }
            | CardEffect::ModifyProduction { target, .. }
            | CardEffect::BuildWall { target, .. }
            | CardEffect::BuildTower { target, .. }
            | CardEffect::DrawCard { target }
            | CardEffect::DiscardCard { target }
            | CardEffect::ForceDiscardNextCard { target }
            | CardEffect::RemoveForceDiscard { target } => Some(*target),
            CardEffect::SetProductionToOpponent { .. }
            | CardEffect::SetProductionToMax { .. }
            | CardEffect::ApplyEffectToLowestWall { .. }
            | CardEffect::ConditionalDamageTargetSwap { .. }
            | CardEffect::SwapWall => None,
        }
    }
}
