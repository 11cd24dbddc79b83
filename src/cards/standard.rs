//! Built-in card set.
//!
//! Enough cards to run a full match without external data. Every effect
//! kind, every condition kind and every flag appears at least once.

use super::catalog::CardCatalog;
use super::definition::{CardDefinition, Cost};
use crate::core::ResourceKind::{self, Bricks, Gems, Recruits};
use crate::effects::{CardEffect, Condition, EffectValue, Target};
use crate::error::CatalogError;

fn card(name: &str, kind: ResourceKind, cost: i32, description: &str) -> CardDefinition {
    CardDefinition::new(name, Cost::new(kind, cost)).with_description(description)
}

/// Definitions in the standard set, in catalog order.
pub fn standard_cards() -> Vec<CardDefinition> {
    use Target::{Both, Opponent, SelfPlayer};

    vec![
        // === Quarry (bricks) ===
        card("Brick Shortage", Bricks, 0, "All players lose 8 bricks")
            .with_effect(CardEffect::modify_resource(Both, Bricks, -8)),
        card("Lucky Cache", Bricks, 0, "+2 bricks, +2 gems, play again")
            .with_effect(CardEffect::modify_resource(SelfPlayer, Bricks, 2))
            .with_effect(CardEffect::modify_resource(SelfPlayer, Gems, 2))
            .with_extra_turn(),
        card("Friendly Terrain", Bricks, 1, "+1 wall, play again")
            .with_effect(CardEffect::build_wall(SelfPlayer, 1))
            .with_extra_turn(),
        card("Miners", Bricks, 3, "+1 quarry")
            .with_effect(CardEffect::modify_production(SelfPlayer, Bricks, 1)),
        card("Mother Lode", Bricks, 4, "If quarry < enemy quarry, +2 quarry, else +1 quarry")
            .with_effect(CardEffect::modify_production(
                SelfPlayer,
                Bricks,
                EffectValue::fixed(1).or_when(Condition::SelfProductionLessThanOpponent(Bricks), 2),
            )),
        card("Copping the Tech", Bricks, 5, "If quarry < enemy quarry, quarry = enemy quarry")
            .with_effect(CardEffect::SetProductionToOpponent {
                kind: Bricks,
                condition: Condition::SelfProductionLessThanOpponent(Bricks),
            }),
        card("Foundations", Bricks, 3, "If wall = 0, +6 wall, else +3 wall").with_effect(
            CardEffect::build_wall(
                SelfPlayer,
                EffectValue::fixed(3).or_when(Condition::TargetWallBelow(1), 6),
            ),
        ),
        card("Earthquake", Bricks, 0, "-1 to all players' quarry")
            .with_effect(CardEffect::modify_production(Both, Bricks, -1)),
        card("Collapse!", Bricks, 4, "-1 enemy quarry")
            .with_effect(CardEffect::modify_production(Opponent, Bricks, -1)),
        card("Big Wall", Bricks, 5, "+6 wall").with_effect(CardEffect::build_wall(SelfPlayer, 6)),
        card(
            "Flood Water",
            Bricks,
            6,
            "Player(s) with the lowest wall lose 1 dungeon and 2 tower",
        )
        .with_effect(CardEffect::ApplyEffectToLowestWall {
            kind: Recruits,
            production_delta: -1,
            tower_damage: 2,
        }),
        card("Shift", Bricks, 17, "Switch your wall with the enemy wall")
            .with_effect(CardEffect::SwapWall),
        // === Magic (gems) ===
        card("Quartz", Gems, 1, "+1 tower, play again")
            .with_effect(CardEffect::build_tower(SelfPlayer, 1))
            .with_extra_turn(),
        card("Smoky Quartz", Gems, 2, "1 damage to enemy tower, play again")
            .with_effect(CardEffect::damage_tower(Opponent, 1))
            .with_extra_turn(),
        card("Bag of Baubles", Gems, 0, "If tower < enemy tower, +2 tower, else +1 tower")
            .with_effect(CardEffect::build_tower(
                SelfPlayer,
                EffectValue::fixed(1).or_when(Condition::SelfTowerLowerThanOpponent, 2),
            )),
        card("Amethyst", Gems, 2, "+3 tower").with_effect(CardEffect::build_tower(SelfPlayer, 3)),
        card("Parity", Gems, 7, "All players' magic equals the highest player's magic")
            .with_effect(CardEffect::SetProductionToMax { kind: Gems }),
        card("Discord", Gems, 5, "7 damage to all towers, all players' magic -1")
            .with_effect(CardEffect::damage_tower(Both, 7))
            .with_effect(CardEffect::modify_production(Both, Gems, -1)),
        card("Crystal Shield", Gems, 8, "+8 tower, +3 wall")
            .with_effect(CardEffect::build_tower(SelfPlayer, 8))
            .with_effect(CardEffect::build_wall(SelfPlayer, 3)),
        card(
            "Lightning Shard",
            Gems,
            11,
            "If tower > enemy wall, 8 damage to enemy tower, else 6 damage to enemy wall",
        )
        .with_effect(CardEffect::ConditionalDamageTargetSwap {
            value: 6,
            alternative_value: 8,
        }),
        card("Power Burn", Gems, 3, "5 damage to your tower, +2 magic")
            .with_effect(CardEffect::damage_tower(SelfPlayer, 5))
            .with_effect(CardEffect::modify_production(SelfPlayer, Gems, 2)),
        card("Prism", Gems, 2, "Draw a card, discard a card, play again")
            .with_effect(CardEffect::draw(SelfPlayer))
            .with_effect(CardEffect::DiscardCard { target: SelfPlayer })
            .with_extra_turn()
            .with_discard_instead_of_play(),
        card("Dragon's Heart", Gems, 24, "+20 wall, +8 tower. Cannot be discarded")
            .with_effect(CardEffect::build_wall(SelfPlayer, 20))
            .with_effect(CardEffect::build_tower(SelfPlayer, 8))
            .with_undiscardable(),
        // === Dungeon (recruits) ===
        card("Elven Scout", Recruits, 2, "Draw a card, your next card is discarded, play again")
            .with_effect(CardEffect::draw(SelfPlayer))
            .with_effect(CardEffect::force_discard(SelfPlayer))
            .with_extra_turn(),
        card("Clear Mind", Recruits, 2, "Lift a forced discard, play again")
            .with_effect(CardEffect::remove_force_discard(SelfPlayer))
            .with_extra_turn(),
        card("Spy Network", Recruits, 4, "The enemy's next card is discarded")
            .with_effect(CardEffect::force_discard(Opponent)),
        card("Goblin Mob", Recruits, 3, "6 damage, you take 3 damage")
            .with_effect(CardEffect::damage_both(Opponent, 6))
            .with_effect(CardEffect::damage_tower(SelfPlayer, 3)),
        card("Spearman", Recruits, 2, "If wall > enemy wall, 4 damage, else 3 damage")
            .with_effect(CardEffect::damage_both(
                Opponent,
                EffectValue::fixed(3).or_when(Condition::SelfWallGreaterThanOpponent, 4),
            )),
        card("Rabid Sheep", Recruits, 6, "6 damage to enemy wall, enemy loses 3 recruits")
            .with_effect(CardEffect::damage_wall(Opponent, 6))
            .with_effect(CardEffect::modify_resource(Opponent, Recruits, -3)),
        card(
            "Unicorn",
            Recruits,
            9,
            "If magic > enemy magic, 14 damage, else 12 damage",
        )
        .with_effect(CardEffect::damage_both(
            Opponent,
            EffectValue::fixed(12).or_when(Condition::SelfProductionGreaterThanOpponent(Gems), 14),
        )),
        card("Werewolf", Recruits, 9, "9 damage. Cannot be discarded")
            .with_effect(CardEffect::damage_both(Opponent, 9))
            .with_undiscardable(),
        card("Thief", Recruits, 12, "Enemy loses 10 gems and 5 bricks, you gain half")
            .with_effect(CardEffect::modify_resource(Opponent, Gems, -10))
            .with_effect(CardEffect::modify_resource(Opponent, Bricks, -5))
            .with_effect(CardEffect::modify_resource(SelfPlayer, Gems, 5))
            .with_effect(CardEffect::modify_resource(SelfPlayer, Bricks, 3)),
    ]
}

/// The standard catalog.
pub fn standard_catalog() -> Result<CardCatalog, CatalogError> {
    let mut catalog = CardCatalog::new();
    for card in standard_cards() {
        catalog.register(card)?;
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectKind;

    const ALL_KINDS: [EffectKind; 16] = [
        EffectKind::DamageWall,
        EffectKind::DamageTower,
        EffectKind::DamageBoth,
        EffectKind::ModifyResource,
        EffectKind::ModifyProduction,
        EffectKind::SetProductionToOpponent,
        EffectKind::SetProductionToMax,
        EffectKind::BuildWall,
        EffectKind::BuildTower,
        EffectKind::DrawCard,
        EffectKind::DiscardCard,
        EffectKind::ForceDiscardNextCard,
        EffectKind::RemoveForceDiscard,
        EffectKind::ApplyEffectToLowestWall,
        EffectKind::ConditionalDamageTargetSwap,
        EffectKind::SwapWall,
    ];

    #[test]
    fn test_standard_catalog_builds() {
        let catalog = standard_catalog().unwrap();
        assert_eq!(catalog.len(), standard_cards().len());
        assert!(catalog.find("Elven Scout").is_some());
    }

    #[test]
    fn test_every_effect_kind_is_covered() {
        let catalog = standard_catalog().unwrap();
        for kind in ALL_KINDS {
            assert!(
                catalog.iter().any(|(_, card)| card.has_effect(kind)),
                "no standard card uses {}",
                kind.name()
            );
        }
    }

    #[test]
    fn test_every_flag_is_covered() {
        let catalog = standard_catalog().unwrap();
        assert!(catalog.iter().any(|(_, c)| c.extra_turn));
        assert!(catalog.iter().any(|(_, c)| c.undiscardable));
        assert!(catalog.iter().any(|(_, c)| c.discard_instead_of_play));
        assert!(catalog.iter().any(|(_, c)| c.draws_then_forces_discard()));
    }

    #[test]
    fn test_standard_pool_fills_two_hands() {
        let catalog = standard_catalog().unwrap();
        assert!(catalog.deck(1).len() >= 12);
    }
}
