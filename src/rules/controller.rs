//! The match controller: turn state machine and sole owner of the deck pool.
//!
//! ## Action flow
//!
//! A play or discard is validated first; a rejected action changes nothing.
//! An accepted action sets the processing guard, applies the card, returns
//! it to the pool, notifies the observer and checks the win conditions. The
//! turn transition (same player again, or the opponent's turn with
//! production and refill) then runs immediately, or waits for
//! `complete_pending_transition` when the match is configured for deferred
//! advance. The guard is cleared only when the transition runs.
//!
//! ## Automated seats
//!
//! After each transition, while the current player is automated and has a
//! policy, the controller asks the policy for decisions and applies them.
//! The driving loop is iterative: actions taken from inside the loop never
//! recurse into another loop.

use smallvec::SmallVec;
use tracing::{debug, info, trace, warn};

use crate::cards::{CardCatalog, CardDefinition, CardId};
use crate::core::{
    GameRng, MatchConfig, MatchPhase, MatchState, PlayerId, PlayerMap, PlayerRole, PlayerState,
    TurnAdvance,
};
use crate::effects::{EffectResolver, ResolverContext};
use crate::error::{ActionRejected, ConfigError, PoolError};
use crate::policy::{Decision, DecisionPolicy, PolicyView};
use crate::zones::DeckPool;

use super::observer::{MatchObserver, NullObserver};
use super::outcome::{check_win, MatchOutcome};

/// Runs one match.
///
/// ## Usage
///
/// ```
/// use rust_arcomag::cards::standard_catalog;
/// use rust_arcomag::core::{MatchConfig, PlayerId, PlayerRole};
/// use rust_arcomag::rules::MatchController;
///
/// let config = MatchConfig::default().with_roles(PlayerRole::Human, PlayerRole::Human);
/// let mut game = MatchController::new(config, standard_catalog().unwrap(), 42).unwrap();
/// game.start();
///
/// let me = game.current_player();
/// assert_eq!(me, PlayerId::FIRST);
/// if let Some(&card) = game.playable_cards(me).first() {
///     game.play_card(me, card).unwrap();
/// }
/// ```
pub struct MatchController<O: MatchObserver = NullObserver> {
    config: MatchConfig,
    catalog: CardCatalog,
    state: MatchState,
    pool: DeckPool,
    policies: PlayerMap<Option<Box<dyn DecisionPolicy>>>,
    policy_rng: GameRng,
    observer: O,

    actions_taken: u64,
    action_limit: Option<u64>,
    driving: bool,
    stalled: bool,
}

impl MatchController<NullObserver> {
    /// Create a controller with no observer.
    pub fn new(config: MatchConfig, catalog: CardCatalog, seed: u64) -> Result<Self, ConfigError> {
        Self::with_observer(config, catalog, seed, NullObserver)
    }
}

impl<O: MatchObserver> MatchController<O> {
    /// Create a controller reporting to `observer`.
    ///
    /// Fails if the configuration is invalid or the catalog cannot deal both
    /// opening hands.
    pub fn with_observer(
        config: MatchConfig,
        catalog: CardCatalog,
        seed: u64,
        observer: O,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        config.validate_pool(catalog.len() * config.copies_per_card)?;

        let root = GameRng::new(seed);
        Ok(Self {
            state: MatchState::new(&config),
            pool: DeckPool::new(root.for_context("deck")),
            policies: PlayerMap::new(|_| None),
            policy_rng: root.for_context("policy"),
            config,
            catalog,
            observer,
            actions_taken: 0,
            action_limit: None,
            driving: false,
            stalled: false,
        })
    }

    /// Install the decision policy for a seat.
    ///
    /// Only consulted while that seat's role is `Automated`.
    pub fn set_policy(&mut self, player: PlayerId, policy: Box<dyn DecisionPolicy>) {
        self.policies[player] = Some(policy);
    }

    /// Stop driving automated seats once this many actions were taken.
    pub fn set_action_limit(&mut self, limit: Option<u64>) {
        self.action_limit = limit;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start a fresh match: reset both players, seed the pool, deal the
    /// opening hands and begin the first player's turn.
    pub fn start(&mut self) {
        self.state = MatchState::new(&self.config);
        self.pool
            .initialize(self.catalog.deck(self.config.copies_per_card));
        self.actions_taken = 0;
        self.stalled = false;

        for player in PlayerId::both() {
            for _ in 0..self.config.hand_size {
                self.draw_into_hand(player);
            }
        }

        info!(
            first = %self.state.players[PlayerId::FIRST].name,
            second = %self.state.players[PlayerId::SECOND].name,
            pool = self.pool.len(),
            "match started"
        );

        self.state.current = PlayerId::FIRST;
        self.begin_turn(true);
    }

    /// Begin the current player's turn.
    ///
    /// With `produce`, each production rate is added to its stockpile first.
    /// The hand is then refilled to the configured size.
    pub fn begin_turn(&mut self, produce: bool) {
        let player = self.state.current;
        if produce {
            self.state.players[player].produce();
        }
        let mut drawn = 0;
        while self.state.players[player].hand.len() < self.config.hand_size {
            if !self.draw_into_hand(player) {
                break;
            }
            drawn += 1;
        }
        debug!(%player, turn = self.state.turn_number, produce, drawn, "turn begins");

        self.observer.state_changed(&self.state);
        self.drive_automated();
    }

    /// Apply a turn transition left pending by deferred advance.
    ///
    /// Returns false if nothing was pending.
    pub fn complete_pending_transition(&mut self) -> bool {
        match self.state.pending.take() {
            Some(advance) => {
                self.apply_transition(advance);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Play `card` from `player`'s hand.
    ///
    /// If the player owes a forced discard, the card is spent without paying
    /// its cost or resolving it, and the same player acts again.
    pub fn play_card(&mut self, player: PlayerId, card: CardId) -> Result<(), ActionRejected> {
        let definition = self.check_action(player, card)?;
        let cost = definition.cost;
        let extra_turn = definition.extra_turn;

        {
            let state = &self.state.players[player];
            if !state.can_afford(&cost) {
                return Err(ActionRejected::CannotAfford {
                    card,
                    kind: cost.kind,
                    needed: cost.amount,
                    available: state.resources[cost.kind],
                });
            }
        }

        self.state.processing_action = true;
        self.state.players[player].remove_from_hand(card);

        let forced = self.state.players[player].force_discard_next;
        if forced {
            self.state.players[player].force_discard_next = false;
            debug!(%player, %card, "forced discard spent the card");
        } else {
            self.state.players[player].pay(&cost);
            if let Some(definition) = self.catalog.get(card) {
                let mut ctx = ResolverContext::new(&mut self.state.players, &mut self.pool, player);
                EffectResolver::resolve_card(definition, &mut ctx);
                debug!(%player, card = %definition.name, "card played");
            }
        }

        self.pool.return_card(card);
        self.actions_taken += 1;

        let advance = if forced || extra_turn {
            TurnAdvance::ExtraAction
        } else {
            TurnAdvance::NextPlayer
        };
        self.finish_action(advance);
        Ok(())
    }

    /// Discard `card` from `player`'s hand. The turn always passes.
    pub fn discard_card(&mut self, player: PlayerId, card: CardId) -> Result<(), ActionRejected> {
        let definition = self.check_action(player, card)?;
        if definition.undiscardable {
            debug!(%player, %card, "undiscardable card blocked");
            return Err(ActionRejected::Undiscardable(card));
        }

        self.state.processing_action = true;
        self.state.players[player].remove_from_hand(card);
        self.pool.return_card(card);
        self.actions_taken += 1;
        debug!(%player, %card, "card discarded");

        self.finish_action(TurnAdvance::NextPlayer);
        Ok(())
    }

    /// Checks shared by play and discard. Returns the card's definition.
    fn check_action(&self, player: PlayerId, card: CardId) -> Result<&CardDefinition, ActionRejected> {
        if self.state.is_over() {
            return Err(ActionRejected::MatchOver);
        }
        if self.state.processing_action {
            return Err(ActionRejected::ActionInProgress);
        }
        if player != self.state.current {
            return Err(ActionRejected::NotCurrentPlayer(player));
        }
        if !self.state.players[player].holds(card) {
            return Err(ActionRejected::NotInHand { player, card });
        }
        self.catalog
            .get(card)
            .ok_or(ActionRejected::NotInHand { player, card })
    }

    fn finish_action(&mut self, advance: TurnAdvance) {
        self.observer.state_changed(&self.state);

        if let Some(outcome) = check_win(&self.state.players, &self.config) {
            self.end_match(outcome);
            return;
        }

        if self.config.deferred_turn_advance {
            trace!(?advance, "turn transition deferred");
            self.state.pending = Some(advance);
        } else {
            self.apply_transition(advance);
        }
    }

    fn apply_transition(&mut self, advance: TurnAdvance) {
        self.state.processing_action = false;
        self.state.pending = None;

        match advance {
            TurnAdvance::ExtraAction => {
                trace!(player = %self.state.current, "extra action");
                self.observer.state_changed(&self.state);
                self.drive_automated();
            }
            TurnAdvance::NextPlayer => {
                self.state.current = self.state.current.opponent();
                self.state.turn_number += 1;
                self.begin_turn(true);
            }
        }
    }

    fn end_match(&mut self, outcome: MatchOutcome) {
        info!(
            winner = %outcome.winner,
            reason = ?outcome.reason,
            actions = self.actions_taken,
            "{}",
            outcome.message
        );
        self.state.processing_action = false;
        self.state.pending = None;
        let message = outcome.message.clone();
        self.state.outcome = Some(outcome);
        self.observer.match_ended(&message);
    }

    /// Move one card from the pool into a hand. False if the pool is empty.
    fn draw_into_hand(&mut self, player: PlayerId) -> bool {
        match self.pool.draw() {
            Ok(card) => {
                self.state.players[player].hand.push_back(card);
                true
            }
            Err(err) => {
                warn!(%player, %err, "draw skipped");
                false
            }
        }
    }

    // =========================================================================
    // Automated seats
    // =========================================================================

    fn wants_driving(&self) -> bool {
        let player = self.state.current;
        !self.state.is_over()
            && !self.state.processing_action
            && !self.stalled
            && self.state.players[player].role == PlayerRole::Automated
            && self.policies[player].is_some()
            && self.action_limit.map_or(true, |limit| self.actions_taken < limit)
    }

    fn drive_automated(&mut self) {
        if self.driving {
            return;
        }
        self.driving = true;
        while self.wants_driving() {
            self.act_for_automated();
        }
        self.driving = false;
    }

    /// Take one action for the current automated seat.
    fn act_for_automated(&mut self) {
        let player = self.state.current;
        let Some(mut policy) = self.policies[player].take() else {
            return;
        };

        let mut rejected: SmallVec<[Decision; 4]> = SmallVec::new();
        let mut acted = false;
        for attempt in 0..self.config.max_policy_attempts {
            let playable = self.playable_cards(player);
            let decision = {
                let view = PolicyView {
                    player,
                    playable: &playable,
                    state: &self.state,
                    catalog: &self.catalog,
                    rejected: &rejected,
                };
                policy.decide(&view, &mut self.policy_rng)
            };

            match self.apply_decision(player, decision) {
                Ok(()) => {
                    trace!(%player, ?decision, attempt, policy = policy.name(), "decision applied");
                    acted = true;
                    break;
                }
                Err(reason) => {
                    debug!(%player, ?decision, %reason, "decision rejected, asking again");
                    policy.on_rejected(decision, &reason);
                    rejected.push(decision);
                }
            }
        }

        if !acted {
            acted = self.fallback_action(player);
            if acted {
                warn!(%player, policy = policy.name(), "policy exhausted its attempts, used fallback");
            }
        }

        if !acted {
            warn!(%player, hand = self.state.players[player].hand.len(), "no legal action, match stalled");
            self.stalled = true;
        }

        self.policies[player] = Some(policy);
    }

    fn apply_decision(&mut self, player: PlayerId, decision: Decision) -> Result<(), ActionRejected> {
        match decision {
            Decision::Play(card) => self.play_card(player, card),
            Decision::Discard(card) => self.discard_card(player, card),
            Decision::Pass => Err(ActionRejected::MustAct(player)),
        }
    }

    /// First affordable card, else first discardable card.
    fn fallback_action(&mut self, player: PlayerId) -> bool {
        if let Some(&card) = self.playable_cards(player).first() {
            if self.play_card(player, card).is_ok() {
                return true;
            }
        }

        let discardable = self.state.players[player]
            .hand
            .iter()
            .copied()
            .find(|&card| self.catalog.get(card).is_some_and(|def| !def.undiscardable));
        match discardable {
            Some(card) => self.discard_card(player, card).is_ok(),
            None => false,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Owned copy of the state. Hands are persistent vectors, so this is cheap.
    #[must_use]
    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current
    }

    #[must_use]
    pub fn is_current_player(&self, player: PlayerId) -> bool {
        self.state.current == player
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        self.state.player(player)
    }

    #[must_use]
    pub fn opponent(&self, player: PlayerId) -> &PlayerState {
        self.state.player(player.opponent())
    }

    /// Hand cards the player can afford, in hand order.
    #[must_use]
    pub fn playable_cards(&self, player: PlayerId) -> Vec<CardId> {
        let state = &self.state.players[player];
        state
            .hand
            .iter()
            .copied()
            .filter(|&card| {
                self.catalog
                    .get(card)
                    .is_some_and(|def| state.can_afford(&def.cost))
            })
            .collect()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.state.outcome.as_ref()
    }

    /// True when an automated seat had no legal action.
    #[must_use]
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    #[must_use]
    pub fn actions_taken(&self) -> u64 {
        self.actions_taken
    }

    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Cards in the pool plus both hands. Constant for a match.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.pool.len() + self.state.cards_in_hands()
    }

    #[must_use]
    pub fn pool(&self) -> &DeckPool {
        &self.pool
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Mutable access to the players, for scenario setup in tests and tools.
    ///
    /// Does not check win conditions or notify the observer.
    pub fn players_mut(&mut self) -> &mut PlayerMap<PlayerState> {
        &mut self.state.players
    }

    /// Move one copy of `card` into the player's hand, for scenario setup.
    ///
    /// The copy comes from the pool if it has one, otherwise from the
    /// opponent's hand, who then draws a replacement. Nothing moves when the
    /// player already holds the card. Like `players_mut`, this does not
    /// check win conditions or notify the observer.
    pub fn tutor_card(&mut self, player: PlayerId, card: CardId) -> Result<(), PoolError> {
        if self.state.players[player].holds(card) {
            return Ok(());
        }
        let opponent = player.opponent();
        if self.pool.take(card).is_ok() {
            debug!(%player, card = %card, "tutored from pool");
        } else if self.state.players[opponent].remove_from_hand(card) {
            debug!(%player, card = %card, "tutored from opponent");
            self.draw_into_hand(opponent);
        } else {
            return Err(PoolError::Missing(card));
        }
        self.state.players[player].hand.push_back(card);
        Ok(())
    }
}
