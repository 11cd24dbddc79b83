//! Fully automated matches.
//!
//! `MatchRunner` plays matches where both seats are driven by policies and
//! reports how each ended. Used for balancing card sets, soak-testing the
//! rules and benchmarking.
//!
//! ## Usage
//!
//! ```
//! use rust_arcomag::cards::standard_catalog;
//! use rust_arcomag::core::MatchConfig;
//! use rust_arcomag::policy::HeuristicPolicy;
//! use rust_arcomag::sim::MatchRunner;
//!
//! let runner = MatchRunner::new(MatchConfig::default(), standard_catalog().unwrap())
//!     .with_max_actions(2_000);
//!
//! let report = runner
//!     .play_match(7, Box::new(HeuristicPolicy::new()), Box::new(HeuristicPolicy::new()))
//!     .unwrap();
//! assert!(report.actions <= 2_000);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::CardCatalog;
use crate::core::{MatchConfig, MatchState, PlayerId, PlayerMap, PlayerRole};
use crate::error::ConfigError;
use crate::policy::DecisionPolicy;
use crate::rules::{MatchController, MatchOutcome};

/// How one automated match ended.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchReport {
    pub seed: u64,
    /// `None` if the match hit the action cap or stalled.
    pub outcome: Option<MatchOutcome>,
    pub actions: u64,
    pub turns: u32,
    pub stalled: bool,
    pub hit_action_limit: bool,
    pub final_state: MatchState,
}

impl MatchReport {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.as_ref().map(|o| o.winner)
    }

    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Totals over a batch of reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerStats {
    pub wins: PlayerMap<usize>,
    pub undecided: usize,
    pub total_actions: u64,
}

impl RunnerStats {
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a MatchReport>) -> Self {
        let mut stats = Self::default();
        for report in reports {
            match report.winner() {
                Some(winner) => stats.wins[winner] += 1,
                None => stats.undecided += 1,
            }
            stats.total_actions += report.actions;
        }
        stats
    }

    #[must_use]
    pub fn matches(&self) -> usize {
        self.wins.iter().map(|(_, w)| *w).sum::<usize>() + self.undecided
    }
}

/// Plays policy-versus-policy matches.
#[derive(Clone, Debug)]
pub struct MatchRunner {
    config: MatchConfig,
    catalog: CardCatalog,
    max_actions: u64,
    seed_offset: u64,
}

impl MatchRunner {
    /// Both seats are forced to `Automated` and deferred advance is turned off.
    pub fn new(config: MatchConfig, catalog: CardCatalog) -> Self {
        let config = config
            .with_roles(PlayerRole::Automated, PlayerRole::Automated)
            .with_deferred_turn_advance(false);
        Self {
            config,
            catalog,
            max_actions: 5_000,
            seed_offset: 0,
        }
    }

    /// Cap on actions per match.
    #[must_use]
    pub fn with_max_actions(mut self, max: u64) -> Self {
        self.max_actions = max;
        self
    }

    /// Added to the match index to form each match seed in `play_matches`.
    #[must_use]
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play one match to completion, stall, or the action cap.
    pub fn play_match(
        &self,
        seed: u64,
        first: Box<dyn DecisionPolicy>,
        second: Box<dyn DecisionPolicy>,
    ) -> Result<MatchReport, ConfigError> {
        let mut game = MatchController::new(self.config.clone(), self.catalog.clone(), seed)?;
        game.set_policy(PlayerId::FIRST, first);
        game.set_policy(PlayerId::SECOND, second);
        game.set_action_limit(Some(self.max_actions));
        game.start();

        let hit_action_limit = !game.is_over() && game.actions_taken() >= self.max_actions;
        let state = game.snapshot();
        let report = MatchReport {
            seed,
            outcome: state.outcome.clone(),
            actions: game.actions_taken(),
            turns: state.turn_number,
            stalled: game.is_stalled(),
            hit_action_limit,
            final_state: state,
        };

        debug!(
            seed,
            winner = ?report.winner(),
            actions = report.actions,
            stalled = report.stalled,
            "automated match finished"
        );
        Ok(report)
    }

    /// Play `count` matches with fresh policies from `policies`.
    pub fn play_matches(
        &self,
        count: usize,
        policies: impl Fn(PlayerId) -> Box<dyn DecisionPolicy>,
    ) -> Result<Vec<MatchReport>, ConfigError> {
        let reports = (0..count)
            .map(|i| {
                let seed = self.seed_offset + i as u64;
                self.play_match(seed, policies(PlayerId::FIRST), policies(PlayerId::SECOND))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let stats = RunnerStats::from_reports(&reports);
        info!(
            matches = stats.matches(),
            first_wins = stats.wins[PlayerId::FIRST],
            second_wins = stats.wins[PlayerId::SECOND],
            undecided = stats.undecided,
            "batch finished"
        );
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::standard_catalog;
    use crate::policy::{HeuristicPolicy, RandomPolicy};

    fn runner() -> MatchRunner {
        MatchRunner::new(MatchConfig::default(), standard_catalog().unwrap()).with_max_actions(3_000)
    }

    #[test]
    fn test_match_ends_or_caps() {
        let report = runner()
            .play_match(3, Box::new(HeuristicPolicy::new()), Box::new(RandomPolicy::new()))
            .unwrap();

        assert!(report.is_decided() || report.hit_action_limit || report.stalled);
        assert!(report.actions <= 3_000);
        assert_eq!(report.final_state.outcome, report.outcome);
    }

    #[test]
    fn test_same_seed_same_report() {
        let a = runner()
            .play_match(11, Box::new(RandomPolicy::new()), Box::new(RandomPolicy::new()))
            .unwrap();
        let b = runner()
            .play_match(11, Box::new(RandomPolicy::new()), Box::new(RandomPolicy::new()))
            .unwrap();

        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.actions, b.actions);
        assert_eq!(a.final_state, b.final_state);
    }

    #[test]
    fn test_tiny_cap_stops_early() {
        let report = runner()
            .with_max_actions(1)
            .play_match(5, Box::new(HeuristicPolicy::new()), Box::new(HeuristicPolicy::new()))
            .unwrap();

        assert_eq!(report.actions, 1);
        assert!(report.hit_action_limit);
        assert!(!report.is_decided());
    }

    #[test]
    fn test_batch_stats() {
        let reports = runner()
            .with_seed_offset(100)
            .play_matches(4, |_| Box::new(HeuristicPolicy::new()))
            .unwrap();

        assert_eq!(reports.len(), 4);
        assert_eq!(reports[2].seed, 102);

        let stats = RunnerStats::from_reports(&reports);
        assert_eq!(stats.matches(), 4);
        assert_eq!(
            stats.total_actions,
            reports.iter().map(|r| r.actions).sum::<u64>()
        );
    }
}
