//! Effect resolution - applying card effects to the players.
//!
//! The resolver works on borrowed match pieces rather than the whole
//! controller: both players, the deck pool (for draws) and the acting seat.
//! Cost payment, hand movement and turn flow stay with the controller.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cards::CardDefinition;
use crate::core::{PlayerId, PlayerMap, PlayerState};
use crate::zones::DeckPool;

use super::condition::{Condition, ConditionContext};
use super::effect::{CardEffect, EffectValue};
use super::targeting::Target;

/// Mutable view of the match handed to the resolver.
pub struct ResolverContext<'a> {
    pub players: &'a mut PlayerMap<PlayerState>,
    pub pool: &'a mut DeckPool,
    /// Player whose card is resolving.
    pub actor: PlayerId,
}

impl<'a> ResolverContext<'a> {
    pub fn new(
        players: &'a mut PlayerMap<PlayerState>,
        pool: &'a mut DeckPool,
        actor: PlayerId,
    ) -> Self {
        Self {
            players,
            pool,
            actor,
        }
    }

    fn opponent(&self) -> PlayerId {
        self.actor.opponent()
    }

    fn holds(&self, condition: Condition, target: PlayerId) -> bool {
        condition.evaluate(&ConditionContext::new(&*self.players, self.actor, target))
    }

    /// Magnitude for one recipient, after conditional substitution.
    fn amount(&self, value: &EffectValue, target: PlayerId) -> i32 {
        match value.alternative {
            Some(alt) if self.holds(alt.condition, target) => {
                trace!(condition = alt.condition.name(), value = alt.value, "condition met");
                alt.value
            }
            _ => value.base,
        }
    }
}

/// Outcome of resolving one effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// State was changed (or would have been, had values allowed).
    Applied,
    /// Nothing happened, for the given reason.
    Skipped(&'static str),
}

/// Per-card resolution results, one per effect.
pub type ResolveResults = SmallVec<[ResolveResult; 4]>;

/// Applies card effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve every effect on `card` in order, then apply the
    /// draw-plus-force-discard rule to the actor.
    pub fn resolve_card(card: &CardDefinition, ctx: &mut ResolverContext<'_>) -> ResolveResults {
        let results = card
            .effects
            .iter()
            .map(|effect| Self::resolve(effect, ctx))
            .collect();

        if card.draws_then_forces_discard() {
            ctx.players[ctx.actor].force_discard_next = true;
        }

        debug!(card = %card.name, actor = %ctx.actor, "card resolved");
        results
    }

    /// Resolve a single effect.
    pub fn resolve(effect: &CardEffect, ctx: &mut ResolverContext<'_>) -> ResolveResult {
        trace!(kind = effect.kind().name(), actor = %ctx.actor, "resolving effect");

        match effect {
            CardEffect::DamageWall { target, amount } => {
                Self::for_each_amount(ctx, *target, amount, |p, v| p.damage_wall(v))
            }
            CardEffect::DamageTower { target, amount } => {
                Self::for_each_amount(ctx, *target, amount, |p, v| p.damage_tower(v))
            }
            CardEffect::DamageBoth { target, amount } => {
                Self::for_each_amount(ctx, *target, amount, |p, v| p.damage_both(v))
            }
            CardEffect::BuildWall { target, amount } => {
                Self::for_each_amount(ctx, *target, amount, |p, v| p.build_wall(v))
            }
            CardEffect::BuildTower { target, amount } => {
                Self::for_each_amount(ctx, *target, amount, |p, v| p.build_tower(v))
            }
            CardEffect::ModifyResource {
                target,
                kind,
                amount,
            } => Self::for_each_amount(ctx, *target, amount, |p, v| p.modify_resource(*kind, v)),
            CardEffect::ModifyProduction {
                target,
                kind,
                amount,
            } => Self::for_each_amount(ctx, *target, amount, |p, v| {
                p.modify_production(*kind, v)
            }),

            CardEffect::SetProductionToOpponent { kind, condition } => {
                let opponent = ctx.opponent();
                if !ctx.holds(*condition, opponent) {
                    return ResolveResult::Skipped("condition not met");
                }
                let rate = ctx.players[opponent].production[*kind];
                ctx.players[ctx.actor].set_production(*kind, rate);
                ResolveResult::Applied
            }

            CardEffect::SetProductionToMax { kind } => {
                let highest = ctx
                    .players
                    .iter()
                    .map(|(_, p)| p.production[*kind])
                    .max()
                    .unwrap_or_default();
                for (_, player) in ctx.players.iter_mut() {
                    player.set_production(*kind, highest);
                }
                ResolveResult::Applied
            }

            CardEffect::DrawCard { target } => {
                let mut result = ResolveResult::Applied;
                for player in target.resolve(ctx.actor) {
                    match ctx.pool.draw() {
                        Ok(card) => ctx.players[player].hand.push_back(card),
                        Err(err) => {
                            debug!(%player, %err, "draw effect skipped");
                            result = ResolveResult::Skipped("deck pool empty");
                        }
                    }
                }
                result
            }

            // Discards go through the controller's discard path.
            CardEffect::DiscardCard { .. } => ResolveResult::Skipped("discard is a controller action"),

            CardEffect::ForceDiscardNextCard { target } => {
                for player in target.resolve(ctx.actor) {
                    ctx.players[player].force_discard_next = true;
                }
                ResolveResult::Applied
            }

            CardEffect::RemoveForceDiscard { target } => {
                for player in target.resolve(ctx.actor) {
                    ctx.players[player].force_discard_next = false;
                }
                ResolveResult::Applied
            }

            CardEffect::ApplyEffectToLowestWall {
                kind,
                production_delta,
                tower_damage,
            } => {
                let first = ctx.players[PlayerId::FIRST].wall;
                let second = ctx.players[PlayerId::SECOND].wall;
                for player in PlayerId::both() {
                    let wall = ctx.players[player].wall;
                    if wall <= first.min(second) {
                        let state = &mut ctx.players[player];
                        state.modify_production(*kind, *production_delta);
                        state.damage_tower(*tower_damage);
                    }
                }
                ResolveResult::Applied
            }

            // Inverted roles: the alternative value hits the tower when the
            // condition holds, the base value hits the wall otherwise.
            CardEffect::ConditionalDamageTargetSwap {
                value,
                alternative_value,
            } => {
                let opponent = ctx.opponent();
                if ctx.holds(Condition::SelfTowerGreaterThanOpponentWall, opponent) {
                    ctx.players[opponent].damage_tower(*alternative_value);
                } else {
                    ctx.players[opponent].damage_wall(*value);
                }
                ResolveResult::Applied
            }

            CardEffect::SwapWall => {
                let (actor, opponent) = ctx.players.pair_mut(ctx.actor);
                std::mem::swap(&mut actor.wall, &mut opponent.wall);
                ResolveResult::Applied
            }
        }
    }

    /// Apply `op` to each recipient, evaluating conditions per recipient.
    fn for_each_amount(
        ctx: &mut ResolverContext<'_>,
        target: Target,
        amount: &EffectValue,
        op: impl Fn(&mut PlayerState, i32),
    ) -> ResolveResult {
        for player in target.resolve(ctx.actor) {
            let value = ctx.amount(amount, player);
            op(&mut ctx.players[player], value);
        }
        ResolveResult::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Cost};
    use crate::core::{GameRng, MatchConfig, ResourceKind};

    struct Fixture {
        players: PlayerMap<PlayerState>,
        pool: DeckPool,
    }

    impl Fixture {
        fn new() -> Self {
            let config = MatchConfig::default();
            let mut pool = DeckPool::new(GameRng::new(11));
            pool.initialize((0..5).map(CardId::new));
            Self {
                players: PlayerMap::new(|p| PlayerState::from_config(&config, p)),
                pool,
            }
        }

        fn apply(&mut self, actor: PlayerId, effect: CardEffect) -> ResolveResult {
            let mut ctx = ResolverContext::new(&mut self.players, &mut self.pool, actor);
            EffectResolver::resolve(&effect, &mut ctx)
        }
    }

    const P1: PlayerId = PlayerId::FIRST;
    const P2: PlayerId = PlayerId::SECOND;

    #[test]
    fn test_damage_wall_and_tower() {
        let mut f = Fixture::new();
        f.apply(P1, CardEffect::damage_wall(Target::Opponent, 4));
        f.apply(P1, CardEffect::damage_tower(Target::Opponent, 30));

        assert_eq!(f.players[P2].wall, 6);
        assert_eq!(f.players[P2].tower, 0);
        assert_eq!(f.players[P1].wall, 10);
    }

    #[test]
    fn test_build_on_both() {
        let mut f = Fixture::new();
        f.apply(P2, CardEffect::build_tower(Target::Both, 3));
        assert_eq!(f.players[P1].tower, 23);
        assert_eq!(f.players[P2].tower, 23);
    }

    #[test]
    fn test_conditional_value_per_recipient() {
        let mut f = Fixture::new();
        f.players[P1].wall = 12;
        f.players[P2].wall = 9;

        let effect = CardEffect::damage_tower(
            Target::Both,
            EffectValue::fixed(1).or_when(Condition::TargetWallBelow(10), 5),
        );
        f.apply(P1, effect);

        assert_eq!(f.players[P1].tower, 19);
        assert_eq!(f.players[P2].tower, 15);
    }

    #[test]
    fn test_modify_resource_and_production_floors() {
        let mut f = Fixture::new();
        f.apply(P1, CardEffect::modify_resource(Target::Opponent, ResourceKind::Gems, -50));
        f.apply(P1, CardEffect::modify_production(Target::Opponent, ResourceKind::Gems, -50));

        assert_eq!(f.players[P2].resources[ResourceKind::Gems], 0);
        assert_eq!(f.players[P2].production[ResourceKind::Gems], 1);
    }

    #[test]
    fn test_set_production_to_opponent() {
        let mut f = Fixture::new();
        f.players[P2].production[ResourceKind::Bricks] = 5;
        let effect = CardEffect::SetProductionToOpponent {
            kind: ResourceKind::Bricks,
            condition: Condition::SelfProductionLessThanOpponent(ResourceKind::Bricks),
        };

        assert_eq!(f.apply(P1, effect.clone()), ResolveResult::Applied);
        assert_eq!(f.players[P1].production[ResourceKind::Bricks], 5);

        // Now equal: the strict comparison fails
        f.players[P2].production[ResourceKind::Bricks] = 5;
        assert!(matches!(f.apply(P1, effect), ResolveResult::Skipped(_)));
    }

    #[test]
    fn test_set_production_to_max() {
        let mut f = Fixture::new();
        f.players[P2].production[ResourceKind::Recruits] = 4;
        f.apply(P1, CardEffect::SetProductionToMax { kind: ResourceKind::Recruits });

        assert_eq!(f.players[P1].production[ResourceKind::Recruits], 4);
        assert_eq!(f.players[P2].production[ResourceKind::Recruits], 4);
    }

    #[test]
    fn test_draw_moves_card_from_pool() {
        let mut f = Fixture::new();
        f.apply(P1, CardEffect::draw(Target::Both));

        assert_eq!(f.players[P1].hand.len(), 1);
        assert_eq!(f.players[P2].hand.len(), 1);
        assert_eq!(f.pool.len(), 3);
    }

    #[test]
    fn test_draw_from_empty_pool_is_skipped() {
        let mut f = Fixture::new();
        f.pool.initialize(std::iter::empty());

        let result = f.apply(P1, CardEffect::draw(Target::SelfPlayer));
        assert!(matches!(result, ResolveResult::Skipped(_)));
        assert!(f.players[P1].hand.is_empty());
    }

    #[test]
    fn test_force_discard_flags() {
        let mut f = Fixture::new();
        f.apply(P1, CardEffect::force_discard(Target::Opponent));
        assert!(f.players[P2].force_discard_next);
        assert!(!f.players[P1].force_discard_next);

        f.apply(P2, CardEffect::remove_force_discard(Target::SelfPlayer));
        assert!(!f.players[P2].force_discard_next);
    }

    #[test]
    fn test_discard_effect_is_noop() {
        let mut f = Fixture::new();
        let before = f.players.clone();
        let result = f.apply(P1, CardEffect::DiscardCard { target: Target::Both });

        assert!(matches!(result, ResolveResult::Skipped(_)));
        assert_eq!(f.players, before);
    }

    #[test]
    fn test_lowest_wall_strict() {
        let mut f = Fixture::new();
        f.players[P1].wall = 5;
        f.players[P2].wall = 8;
        f.apply(
            P2,
            CardEffect::ApplyEffectToLowestWall {
                kind: ResourceKind::Bricks,
                production_delta: 2,
                tower_damage: 3,
            },
        );

        assert_eq!(f.players[P1].production[ResourceKind::Bricks], 4);
        assert_eq!(f.players[P1].tower, 17);
        assert_eq!(f.players[P2].production[ResourceKind::Bricks], 2);
        assert_eq!(f.players[P2].tower, 20);
    }

    #[test]
    fn test_lowest_wall_tie_hits_both() {
        let mut f = Fixture::new();
        f.players[P1].wall = 5;
        f.players[P2].wall = 5;
        f.apply(
            P1,
            CardEffect::ApplyEffectToLowestWall {
                kind: ResourceKind::Gems,
                production_delta: -1,
                tower_damage: 2,
            },
        );

        for player in PlayerId::both() {
            assert_eq!(f.players[player].production[ResourceKind::Gems], 1);
            assert_eq!(f.players[player].tower, 18);
        }
    }

    #[test]
    fn test_target_swap_hits_tower_when_taller() {
        let mut f = Fixture::new();
        // Actor tower 20 > opponent wall 10
        f.apply(
            P1,
            CardEffect::ConditionalDamageTargetSwap {
                value: 6,
                alternative_value: 8,
            },
        );
        assert_eq!(f.players[P2].tower, 12);
        assert_eq!(f.players[P2].wall, 10);
    }

    #[test]
    fn test_target_swap_hits_wall_otherwise() {
        let mut f = Fixture::new();
        f.players[P2].wall = 25;
        f.apply(
            P1,
            CardEffect::ConditionalDamageTargetSwap {
                value: 6,
                alternative_value: 8,
            },
        );
        assert_eq!(f.players[P2].tower, 20);
        assert_eq!(f.players[P2].wall, 19);
    }

    #[test]
    fn test_swap_wall() {
        let mut f = Fixture::new();
        f.players[P2].wall = 3;
        f.apply(P2, CardEffect::SwapWall);
        assert_eq!(f.players[P1].wall, 3);
        assert_eq!(f.players[P2].wall, 10);
    }

    #[test]
    fn test_resolve_card_draw_and_force_discard() {
        let mut f = Fixture::new();
        // Force-discard aimed at the opponent still flags the actor
        let card = CardDefinition::new("Scout", Cost::new(ResourceKind::Recruits, 1))
            .with_effect(CardEffect::draw(Target::SelfPlayer))
            .with_effect(CardEffect::force_discard(Target::Opponent));

        let mut ctx = ResolverContext::new(&mut f.players, &mut f.pool, P1);
        let results = EffectResolver::resolve_card(&card, &mut ctx);

        assert_eq!(results.len(), 2);
        assert!(f.players[P1].force_discard_next);
        assert!(f.players[P2].force_discard_next);
        assert_eq!(f.players[P1].hand.len(), 1);
    }
}
