//! Strategy execution and selection.
//!
//! All strategies run over the same context, in parallel, each with its
//! own derived random source. Failures are logged and skipped; the best
//! surviving layout wins by composite score, with earlier strategies
//! winning ties.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::layout::Layout;
use crate::score;
use crate::strategies::{PlacementContext, Strategy};

/// One strategy's scored result.
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub layout: Layout,
    pub coverage: f64,
    pub accessibility: f64,
}

impl StrategyOutcome {
    pub fn composite(&self, target_coverage: f64) -> f64 {
        score::composite(
            score::coverage_match(self.coverage, target_coverage),
            self.accessibility,
        )
    }
}

/// Run every strategy over the context. The outcome order matches
/// [`Strategy::ALL`] regardless of scheduling.
pub fn run_strategies(ctx: &PlacementContext<'_>) -> Vec<StrategyOutcome> {
    let results: Vec<(Strategy, Result<Layout, crate::error::StrategyError>)> = Strategy::ALL
        .par_iter()
        .map(|&strategy| (strategy, strategy.run(ctx)))
        .collect();

    let mut outcomes = Vec::with_capacity(results.len());
    for (strategy, result) in results {
        match result {
            Ok(layout) => {
                let coverage = layout.coverage(ctx.usable_area);
                let accessibility =
                    score::accessibility(&layout.islands, ctx.entrances, ctx.cfg);
                debug!(
                    strategy = strategy.name(),
                    islands = layout.len(),
                    coverage,
                    accessibility,
                    "strategy completed"
                );
                outcomes.push(StrategyOutcome {
                    strategy,
                    layout,
                    coverage,
                    accessibility,
                });
            }
            Err(error) => {
                warn!(strategy = strategy.name(), %error, "strategy produced no layout");
            }
        }
    }
    outcomes
}

/// Pick the outcome with the highest composite score. Ties keep the
/// earliest strategy in [`Strategy::ALL`] order.
pub fn select_best(
    outcomes: Vec<StrategyOutcome>,
    target_coverage: f64,
) -> Option<StrategyOutcome> {
    let mut best: Option<(f64, StrategyOutcome)> = None;
    for outcome in outcomes {
        let value = outcome.composite(target_coverage);
        let replace = match &best {
            Some((best_value, _)) => value > *best_value,
            None => true,
        };
        if replace {
            best = Some((value, outcome));
        }
    }
    best.map(|(_, outcome)| outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_catalog, expand_to_target};
    use crate::config::{BudgetProfile, EngineConfig};
    use crate::geom::{rect, to_multi};

    #[test]
    fn outcomes_keep_strategy_order() {
        let mut cfg = EngineConfig::default();
        cfg.budget = BudgetProfile::fast();
        let usable = to_multi(rect(0.0, 0.0, 30.0, 30.0).to_polygon());
        let specs = expand_to_target(&build_catalog(&[(2.0, 2.0)]), 90.0);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 90.0, &cfg).unwrap();
        let outcomes = run_strategies(&ctx);
        assert!(!outcomes.is_empty());
        let positions: Vec<usize> = outcomes
            .iter()
            .map(|o| Strategy::ALL.iter().position(|s| *s == o.strategy).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn best_outcome_has_max_composite() {
        let mut cfg = EngineConfig::default();
        cfg.budget = BudgetProfile::fast();
        let usable = to_multi(rect(0.0, 0.0, 30.0, 30.0).to_polygon());
        let specs = expand_to_target(&build_catalog(&[(2.0, 2.0)]), 90.0);
        let ctx = PlacementContext::new(&usable, &[], &[], &specs, 90.0, &cfg).unwrap();
        let target_coverage = 90.0 / 900.0;
        let outcomes = run_strategies(&ctx);
        let max = outcomes
            .iter()
            .map(|o| o.composite(target_coverage))
            .fold(f64::NEG_INFINITY, f64::max);
        let best = select_best(outcomes, target_coverage).unwrap();
        assert!((best.composite(target_coverage) - max).abs() < 1e-12);
    }

    #[test]
    fn no_outcomes_selects_nothing() {
        assert!(select_best(Vec::new(), 0.25).is_none());
    }
}
