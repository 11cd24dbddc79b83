//! Built-in policies.

use smallvec::SmallVec;
use tracing::trace;

use crate::cards::CardId;
use crate::core::GameRng;
use crate::effects::EffectKind;
use crate::error::ActionRejected;

use super::{Decision, DecisionPolicy, PolicyView};

type Candidates = SmallVec<[CardId; 8]>;

fn pick(cards: &Candidates, rng: &mut GameRng) -> Option<CardId> {
    rng.choose(cards).copied()
}

// =============================================================================
// Heuristic Policy
// =============================================================================

/// Threshold-driven play.
///
/// - Opponent wall at or below `attack_wall_threshold`: a random attack card
/// - Own tower at or below `defend_tower_threshold`: a random building card
/// - Otherwise any random playable card
///
/// With nothing playable it discards, preferring cards marked to be
/// discarded instead of played.
#[derive(Clone, Debug)]
pub struct HeuristicPolicy {
    pub attack_wall_threshold: i32,
    pub defend_tower_threshold: i32,
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self {
            attack_wall_threshold: 5,
            defend_tower_threshold: 10,
        }
    }
}

impl HeuristicPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn matching(view: &PolicyView<'_>, class: fn(EffectKind) -> bool) -> Candidates {
        view.open_plays()
            .filter(|&card| {
                view.card(card)
                    .is_some_and(|def| def.effects.iter().any(|e| class(e.kind())))
            })
            .collect()
    }
}

impl DecisionPolicy for HeuristicPolicy {
    fn decide(&mut self, view: &PolicyView<'_>, rng: &mut GameRng) -> Decision {
        let playable: Candidates = view.open_plays().collect();

        if !playable.is_empty() {
            if view.opponent().wall <= self.attack_wall_threshold {
                if let Some(card) = pick(&Self::matching(view, EffectKind::is_attack), rng) {
                    trace!(%card, "heuristic: attack");
                    return Decision::Play(card);
                }
            }
            if view.me().tower <= self.defend_tower_threshold {
                if let Some(card) = pick(&Self::matching(view, EffectKind::is_defense), rng) {
                    trace!(%card, "heuristic: defend");
                    return Decision::Play(card);
                }
            }
            if let Some(card) = pick(&playable, rng) {
                return Decision::Play(card);
            }
        }

        let discards: Candidates = view.open_discards().collect();
        let preferred: Candidates = discards
            .iter()
            .copied()
            .filter(|&card| view.card(card).is_some_and(|def| def.discard_instead_of_play))
            .collect();

        pick(&preferred, rng)
            .or_else(|| pick(&discards, rng))
            .map_or(Decision::Pass, Decision::Discard)
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

// =============================================================================
// Random Policy
// =============================================================================

/// Uniformly random play, else a uniformly random discard.
///
/// The discard is drawn from the whole hand, undiscardable cards included,
/// so this policy also exercises the controller's re-decision path.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy {
    /// Rejections seen so far, for diagnostics.
    pub rejections: usize,
}

impl RandomPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DecisionPolicy for RandomPolicy {
    fn decide(&mut self, view: &PolicyView<'_>, rng: &mut GameRng) -> Decision {
        let playable: Candidates = view.open_plays().collect();
        if let Some(card) = pick(&playable, rng) {
            return Decision::Play(card);
        }

        let hand: Candidates = view
            .me()
            .hand
            .iter()
            .copied()
            .filter(|&card| !view.was_rejected(Decision::Discard(card)))
            .collect();
        pick(&hand, rng).map_or(Decision::Pass, Decision::Discard)
    }

    fn on_rejected(&mut self, _decision: Decision, _reason: &ActionRejected) {
        self.rejections += 1;
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, CardDefinition, Cost};
    use crate::core::{MatchConfig, MatchState, PlayerId, ResourceKind};
    use crate::effects::{CardEffect, Target};

    struct Table {
        catalog: CardCatalog,
        state: MatchState,
        attack: CardId,
        defend: CardId,
        mill: CardId,
        heart: CardId,
    }

    fn table() -> Table {
        let mut catalog = CardCatalog::new();
        let attack = catalog
            .register(
                CardDefinition::new("Strike", Cost::new(ResourceKind::Recruits, 1))
                    .with_effect(CardEffect::damage_wall(Target::Opponent, 3)),
            )
            .unwrap();
        let defend = catalog
            .register(
                CardDefinition::new("Mortar", Cost::new(ResourceKind::Bricks, 1))
                    .with_effect(CardEffect::build_tower(Target::SelfPlayer, 3)),
            )
            .unwrap();
        let mill = catalog
            .register(
                CardDefinition::new("Mill", Cost::new(ResourceKind::Gems, 1))
                    .with_effect(CardEffect::modify_resource(Target::SelfPlayer, ResourceKind::Gems, 1))
                    .with_discard_instead_of_play(),
            )
            .unwrap();
        let heart = catalog
            .register(
                CardDefinition::new("Heart", Cost::new(ResourceKind::Gems, 99)).with_undiscardable(),
            )
            .unwrap();

        let mut state = MatchState::new(&MatchConfig::default());
        for card in [attack, defend, mill, heart] {
            state.players[PlayerId::SECOND].hand.push_back(card);
        }
        Table {
            catalog,
            state,
            attack,
            defend,
            mill,
            heart,
        }
    }

    fn view<'a>(t: &'a Table, playable: &'a [CardId], rejected: &'a [Decision]) -> PolicyView<'a> {
        PolicyView {
            player: PlayerId::SECOND,
            playable,
            state: &t.state,
            catalog: &t.catalog,
            rejected,
        }
    }

    #[test]
    fn test_heuristic_attacks_low_wall() {
        let mut t = table();
        t.state.players[PlayerId::FIRST].wall = 5;
        let playable = [t.attack, t.defend, t.mill];
        let mut rng = GameRng::new(1);

        for _ in 0..20 {
            let decision = HeuristicPolicy::new().decide(&view(&t, &playable, &[]), &mut rng);
            assert_eq!(decision, Decision::Play(t.attack));
        }
    }

    #[test]
    fn test_heuristic_defends_low_tower() {
        let mut t = table();
        t.state.players[PlayerId::SECOND].tower = 10;
        let playable = [t.attack, t.defend, t.mill];
        let mut rng = GameRng::new(2);

        for _ in 0..20 {
            let decision = HeuristicPolicy::new().decide(&view(&t, &playable, &[]), &mut rng);
            assert_eq!(decision, Decision::Play(t.defend));
        }
    }

    #[test]
    fn test_heuristic_falls_through_when_no_class_matches() {
        let mut t = table();
        t.state.players[PlayerId::FIRST].wall = 0;
        let playable = [t.mill];
        let mut rng = GameRng::new(3);

        let decision = HeuristicPolicy::new().decide(&view(&t, &playable, &[]), &mut rng);
        assert_eq!(decision, Decision::Play(t.mill));
    }

    #[test]
    fn test_heuristic_discards_preferred_card() {
        let t = table();
        let mut rng = GameRng::new(4);

        for _ in 0..20 {
            let decision = HeuristicPolicy::new().decide(&view(&t, &[], &[]), &mut rng);
            assert_eq!(decision, Decision::Discard(t.mill));
        }
    }

    #[test]
    fn test_heuristic_never_discards_undiscardable() {
        let t = table();
        let rejected = [Decision::Discard(t.mill)];
        let mut rng = GameRng::new(5);

        for _ in 0..50 {
            let decision = HeuristicPolicy::new().decide(&view(&t, &[], &rejected), &mut rng);
            assert_ne!(decision, Decision::Discard(t.heart));
            assert_ne!(decision, Decision::Discard(t.mill));
        }
    }

    #[test]
    fn test_random_skips_rejected() {
        let t = table();
        let playable = [t.attack, t.defend];
        let rejected = [Decision::Play(t.attack)];
        let mut rng = GameRng::new(6);

        for _ in 0..20 {
            let decision = RandomPolicy::new().decide(&view(&t, &playable, &rejected), &mut rng);
            assert_eq!(decision, Decision::Play(t.defend));
        }
    }

    #[test]
    fn test_random_passes_on_empty_hand() {
        let mut t = table();
        t.state.players[PlayerId::SECOND].hand.clear();
        let mut rng = GameRng::new(7);

        let decision = RandomPolicy::new().decide(&view(&t, &[], &[]), &mut rng);
        assert_eq!(decision, Decision::Pass);
    }

    #[test]
    fn test_random_counts_rejections() {
        let mut policy = RandomPolicy::new();
        policy.on_rejected(Decision::Discard(CardId::new(3)), &ActionRejected::Undiscardable(CardId::new(3)));
        assert_eq!(policy.rejections, 1);
    }
}
