//! Card catalog: the arena that owns every definition for a match.
//!
//! Definitions are stored densely and addressed by `CardId`, with a name
//! index for lookups from authored data and tests. The catalog is built
//! before the match and is read-only afterwards.
//!
//! ## Authored records
//!
//! Card data is authored as flat records: one row per effect with optional
//! resource and condition columns. `CardCatalog::from_json` converts those
//! rows into typed `CardEffect`s and rejects any row that lacks a field its
//! kind needs, so resolution never meets a malformed effect. Effect
//! magnitudes are limited to `MAX_EFFECT_MAGNITUDE` either way.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, Cost, EffectList};
use crate::core::ResourceKind;
use crate::effects::{CardEffect, Condition, EffectKind, EffectValue, Target};
use crate::error::CatalogError;

/// Largest absolute `value` or `alternative_value` an authored effect may carry.
pub const MAX_EFFECT_MAGNITUDE: i32 = 1_000;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_arcomag::cards::{CardCatalog, CardDefinition, Cost};
/// use rust_arcomag::core::ResourceKind;
///
/// let mut catalog = CardCatalog::new();
/// let id = catalog
///     .register(CardDefinition::new("Quarry Shift", Cost::new(ResourceKind::Bricks, 1)))
///     .unwrap();
///
/// assert_eq!(catalog.get(id).unwrap().name, "Quarry Shift");
/// assert_eq!(catalog.find("Quarry Shift"), Some(id));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    by_name: FxHashMap<String, CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition and return its assigned ID.
    ///
    /// Names must be unique and costs non-negative.
    pub fn register(&mut self, card: CardDefinition) -> Result<CardId, CatalogError> {
        if card.cost.amount < 0 {
            return Err(CatalogError::NegativeCost {
                card: card.name,
                cost: card.cost.amount,
            });
        }
        if self.by_name.contains_key(&card.name) {
            return Err(CatalogError::DuplicateName(card.name));
        }

        let id = next_id(self.cards.len())?;
        self.by_name.insert(card.name.clone(), id);
        self.cards.push(card);
        Ok(id)
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(id.index())
    }

    /// Get a card definition, failing for IDs from another catalog.
    pub fn lookup(&self, id: CardId) -> Result<&CardDefinition, CatalogError> {
        self.get(id).ok_or(CatalogError::UnknownCard(id))
    }

    /// Find a card ID by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        id.index() < self.cards.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All IDs in registration order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        (0u32..).take(self.cards.len()).map(CardId::new)
    }

    /// Iterate over all definitions with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardDefinition)> {
        (0u32..).map(CardId::new).zip(self.cards.iter())
    }

    /// Every card repeated `copies` times, in registration order.
    ///
    /// This is the multiset the deck pool is seeded from.
    #[must_use]
    pub fn deck(&self, copies: usize) -> Vec<CardId> {
        self.ids()
            .flat_map(|id| std::iter::repeat(id).take(copies))
            .collect()
    }

    /// Build a catalog from a JSON array of card records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CardRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Build a catalog from already-parsed records.
    pub fn from_records(records: impl IntoIterator<Item = CardRecord>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for record in records {
            let card = CardDefinition::try_from(record)?;
            catalog.register(card)?;
        }
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }
}

/// Id for the definition stored at `index`.
fn next_id(index: usize) -> Result<CardId, CatalogError> {
    u32::try_from(index)
        .map(CardId::new)
        .map_err(|_| CatalogError::TooManyCards(index))
}

/// Condition discriminant as it appears in authored records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    TargetWallBelow,
    SelfProductionGreaterThanOpponent,
    SelfProductionLessThanOpponent,
    SelfTowerLowerThanOpponent,
    SelfTowerGreaterThanOpponentWall,
    SelfWallGreaterThanOpponent,
}

/// One authored effect row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectRecord {
    pub kind: Option<EffectKind>,
    #[serde(default)]
    pub target: Option<Target>,
    #[serde(default)]
    pub value: Option<i32>,
    /// Resource or production kind the effect modifies.
    #[serde(default)]
    pub resource: Option<ResourceKind>,
    #[serde(default)]
    pub condition: Option<ConditionKind>,
    #[serde(default)]
    pub condition_resource: Option<ResourceKind>,
    #[serde(default)]
    pub condition_value: Option<i32>,
    #[serde(default)]
    pub alternative_value: Option<i32>,
}

/// One authored card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost_kind: ResourceKind,
    pub cost: i32,
    #[serde(default)]
    pub effects: Vec<EffectRecord>,
    #[serde(default)]
    pub extra_turn: bool,
    #[serde(default)]
    pub discard_instead_of_play: bool,
    #[serde(default)]
    pub undiscardable: bool,
}

impl TryFrom<CardRecord> for CardDefinition {
    type Error = CatalogError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let effects = record
            .effects
            .iter()
            .map(|row| RowReader { card: &record.name, row }.effect())
            .collect::<Result<EffectList, _>>()?;

        Ok(CardDefinition {
            name: record.name,
            description: record.description,
            cost: Cost::new(record.cost_kind, record.cost),
            effects,
            extra_turn: record.extra_turn,
            discard_instead_of_play: record.discard_instead_of_play,
            undiscardable: record.undiscardable,
        })
    }
}

/// Converts one effect row, attributing errors to its card.
struct RowReader<'a> {
    card: &'a str,
    row: &'a EffectRecord,
}

impl RowReader<'_> {
    fn effect(&self) -> Result<CardEffect, CatalogError> {
        let kind = self.row.kind.ok_or_else(|| CatalogError::MissingField {
            card: self.card.to_string(),
            kind: "effect",
            field: "kind",
        })?;

        let effect = match kind {
            EffectKind::DamageWall => CardEffect::DamageWall {
                target: self.target(kind)?,
                amount: self.amount(kind)?,
            },
            EffectKind::DamageTower => CardEffect::DamageTower {
                target: self.target(kind)?,
                amount: self.amount(kind)?,
            },
            EffectKind::DamageBoth => CardEffect::DamageBoth {
                target: self.target(kind)?,
                amount: self.amount(kind)?,
            },
            EffectKind::BuildWall => CardEffect::BuildWall {
                target: self.target(kind)?,
                amount: self.amount(kind)?,
            },
            EffectKind::BuildTower => CardEffect::BuildTower {
                target: self.target(kind)?,
                amount: self.amount(kind)?,
            },
            EffectKind::ModifyResource => CardEffect::ModifyResource {
                target: self.target(kind)?,
                kind: self.resource(kind)?,
                amount: self.amount(kind)?,
            },
            EffectKind::ModifyProduction => CardEffect::ModifyProduction {
                target: self.target(kind)?,
                kind: self.resource(kind)?,
                amount: self.amount(kind)?,
            },
            EffectKind::SetProductionToOpponent => CardEffect::SetProductionToOpponent {
                kind: self.resource(kind)?,
                condition: self
                    .condition(kind)?
                    .ok_or_else(|| self.missing(kind, "condition"))?,
            },
            EffectKind::SetProductionToMax => {
                self.unconditional(kind)?;
                CardEffect::SetProductionToMax {
                    kind: self.resource(kind)?,
                }
            }
            EffectKind::DrawCard => {
                self.unconditional(kind)?;
                CardEffect::DrawCard {
                    target: self.target(kind)?,
                }
            }
            EffectKind::DiscardCard => {
                self.unconditional(kind)?;
                CardEffect::DiscardCard {
                    target: self.target(kind)?,
                }
            }
            EffectKind::ForceDiscardNextCard => {
                self.unconditional(kind)?;
                CardEffect::ForceDiscardNextCard {
                    target: self.target(kind)?,
                }
            }
            EffectKind::RemoveForceDiscard => {
                self.unconditional(kind)?;
                CardEffect::RemoveForceDiscard {
                    target: self.target(kind)?,
                }
            }
            EffectKind::ApplyEffectToLowestWall => {
                self.unconditional(kind)?;
                CardEffect::ApplyEffectToLowestWall {
                    kind: self.resource(kind)?,
                    production_delta: self.value(kind)?,
                    tower_damage: self.alternative(kind)?,
                }
            }
            EffectKind::ConditionalDamageTargetSwap => {
                match self.condition(kind)? {
                    Some(Condition::SelfTowerGreaterThanOpponentWall) => {}
                    Some(other) => {
                        return Err(CatalogError::InvalidCondition {
                            card: self.card.to_string(),
                            kind: kind.name(),
                            condition: other.name(),
                        })
                    }
                    None => return Err(self.missing(kind, "condition")),
                }
                CardEffect::ConditionalDamageTargetSwap {
                    value: self.value(kind)?,
                    alternative_value: self.alternative(kind)?,
                }
            }
            EffectKind::SwapWall => {
                self.unconditional(kind)?;
                CardEffect::SwapWall
            }
        };
        Ok(effect)
    }

    fn missing(&self, kind: EffectKind, field: &'static str) -> CatalogError {
        CatalogError::MissingField {
            card: self.card.to_string(),
            kind: kind.name(),
            field,
        }
    }

    fn target(&self, kind: EffectKind) -> Result<Target, CatalogError> {
        self.row.target.ok_or_else(|| self.missing(kind, "target"))
    }

    fn resource(&self, kind: EffectKind) -> Result<ResourceKind, CatalogError> {
        self.row.resource.ok_or_else(|| self.missing(kind, "resource"))
    }

    fn value(&self, kind: EffectKind) -> Result<i32, CatalogError> {
        let value = self.row.value.ok_or_else(|| self.missing(kind, "value"))?;
        self.in_range(kind, "value", value)
    }

    fn alternative(&self, kind: EffectKind) -> Result<i32, CatalogError> {
        let value = self
            .row
            .alternative_value
            .ok_or_else(|| self.missing(kind, "alternative_value"))?;
        self.in_range(kind, "alternative_value", value)
    }

    fn in_range(&self, kind: EffectKind, field: &'static str, value: i32) -> Result<i32, CatalogError> {
        if value.checked_abs().map_or(true, |abs| abs > MAX_EFFECT_MAGNITUDE) {
            return Err(CatalogError::ValueOutOfRange {
                card: self.card.to_string(),
                kind: kind.name(),
                field,
                value,
            });
        }
        Ok(value)
    }

    fn condition(&self, kind: EffectKind) -> Result<Option<Condition>, CatalogError> {
        let Some(tag) = self.row.condition else {
            return Ok(None);
        };
        let condition = match tag {
            ConditionKind::TargetWallBelow => Condition::TargetWallBelow(
                self.row
                    .condition_value
                    .ok_or_else(|| self.missing(kind, "condition_value"))?,
            ),
            ConditionKind::SelfProductionGreaterThanOpponent => {
                Condition::SelfProductionGreaterThanOpponent(self.condition_resource(kind)?)
            }
            ConditionKind::SelfProductionLessThanOpponent => {
                Condition::SelfProductionLessThanOpponent(self.condition_resource(kind)?)
            }
            ConditionKind::SelfTowerLowerThanOpponent => Condition::SelfTowerLowerThanOpponent,
            ConditionKind::SelfTowerGreaterThanOpponentWall => {
                Condition::SelfTowerGreaterThanOpponentWall
            }
            ConditionKind::SelfWallGreaterThanOpponent => Condition::SelfWallGreaterThanOpponent,
        };
        Ok(Some(condition))
    }

    fn condition_resource(&self, kind: EffectKind) -> Result<ResourceKind, CatalogError> {
        self.row
            .condition_resource
            .ok_or_else(|| self.missing(kind, "condition_resource"))
    }

    /// Base value, replaced by the alternative when the condition holds.
    fn amount(&self, kind: EffectKind) -> Result<EffectValue, CatalogError> {
        let base = EffectValue::fixed(self.value(kind)?);
        match self.condition(kind)? {
            Some(condition) => Ok(base.or_when(condition, self.alternative(kind)?)),
            None => Ok(base),
        }
    }

    /// Kinds whose semantics have no conditional branch.
    fn unconditional(&self, kind: EffectKind) -> Result<(), CatalogError> {
        match self.condition(kind)? {
            Some(condition) => Err(CatalogError::InvalidCondition {
                card: self.card.to_string(),
                kind: kind.name(),
                condition: condition.name(),
            }),
            None => Ok(()),
        }
    }
}
