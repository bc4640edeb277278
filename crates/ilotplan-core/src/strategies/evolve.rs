//! Evolutionary placement.
//!
//! A small genetic search over whole layouts: random initial
//! population, tournament selection, greedy union crossover, positional
//! mutation, and elitism. Fitness combines coverage match,
//! accessibility, distribution, and overlap penalty.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::geom;
use crate::layout::{placement_valid, Island};
use crate::score;

use super::PlacementContext;

/// Tournament size for parent selection.
const TOURNAMENT: usize = 3;

/// Probability that a child island gets a positional jitter.
const MUTATION_RATE: f64 = 0.1;

/// Maximum mutation jitter along each axis, in meters.
const MUTATION_RANGE: f64 = 2.0;

/// Uniform position attempts per island when seeding a random layout.
const SEED_ATTEMPTS: u32 = 50;

/// Sample a random valid layout from the spec list.
fn random_layout(ctx: &PlacementContext<'_>, rng: &mut StdRng) -> Vec<Island> {
    let mut order: Vec<usize> = (0..ctx.specs.len()).collect();
    order.shuffle(rng);

    let mut placed: Vec<Island> = Vec::new();
    let mut next_id = 0u32;
    for spec_idx in order {
        if placed.iter().map(Island::area).sum::<f64>() >= ctx.target_area {
            break;
        }
        let spec = &ctx.specs[spec_idx];
        for _ in 0..SEED_ATTEMPTS {
            let cx = rng.gen_range(ctx.bounds.min().x..=ctx.bounds.max().x);
            let cy = rng.gen_range(ctx.bounds.min().y..=ctx.bounds.max().y);
            let rect = geom::rect_from_center(cx, cy, spec.width, spec.height);
            if placement_valid(&rect, ctx.usable, &placed, ctx.entrances, ctx.cfg) {
                placed.push(Island::new(next_id, rect, spec.category));
                next_id += 1;
                break;
            }
        }
    }
    placed
}

/// Greedy union crossover: pool both parents' islands, shuffle, and
/// keep every island that is still valid against what came before it.
fn crossover(
    a: &[Island],
    b: &[Island],
    ctx: &PlacementContext<'_>,
    rng: &mut StdRng,
) -> Vec<Island> {
    let mut pool: Vec<Island> = a.iter().chain(b.iter()).copied().collect();
    pool.shuffle(rng);

    let mut child: Vec<Island> = Vec::new();
    for island in pool {
        if child.iter().map(Island::area).sum::<f64>() >= ctx.target_area {
            break;
        }
        if placement_valid(&island.rect, ctx.usable, &child, ctx.entrances, ctx.cfg) {
            let id = child.len() as u32;
            child.push(Island::new(id, island.rect, island.category));
        }
    }
    child
}

/// Jitter each island with probability [`MUTATION_RATE`]; a move is
/// kept only when the island stays valid against the rest.
fn mutate(islands: &mut Vec<Island>, ctx: &PlacementContext<'_>, rng: &mut StdRng) {
    for i in 0..islands.len() {
        if rng.gen::<f64>() >= MUTATION_RATE {
            continue;
        }
        let dx = rng.gen_range(-MUTATION_RANGE..=MUTATION_RANGE);
        let dy = rng.gen_range(-MUTATION_RANGE..=MUTATION_RANGE);
        let old = islands[i];
        let center = old.center();
        let moved = geom::rect_from_center(
            center.x() + dx,
            center.y() + dy,
            old.width(),
            old.height(),
        );
        let others: Vec<Island> = islands
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, island)| *island)
            .collect();
        if placement_valid(&moved, ctx.usable, &others, ctx.entrances, ctx.cfg) {
            islands[i] = Island::new(old.id, moved, old.category);
        }
    }
}

fn layout_fitness(islands: &[Island], ctx: &PlacementContext<'_>) -> f64 {
    let target_coverage = if ctx.usable_area > 0.0 {
        ctx.target_area / ctx.usable_area
    } else {
        0.0
    };
    score::fitness(islands, ctx.usable_area, target_coverage, ctx.entrances, ctx.cfg)
}

fn tournament(fitnesses: &[f64], rng: &mut StdRng) -> usize {
    let mut best = rng.gen_range(0..fitnesses.len());
    for _ in 1..TOURNAMENT {
        let challenger = rng.gen_range(0..fitnesses.len());
        if fitnesses[challenger] > fitnesses[best] {
            best = challenger;
        }
    }
    best
}

pub(super) fn place(ctx: &PlacementContext<'_>, rng: &mut StdRng) -> Vec<Island> {
    let pop_size = ctx.cfg.budget.population.max(2);
    let mut population: Vec<Vec<Island>> =
        (0..pop_size).map(|_| random_layout(ctx, rng)).collect();

    let elite = (pop_size / 10).max(1);
    for _ in 0..ctx.cfg.budget.generations {
        let fitnesses: Vec<f64> = population
            .iter()
            .map(|islands| layout_fitness(islands, ctx))
            .collect();

        let mut ranked: Vec<usize> = (0..pop_size).collect();
        ranked.sort_by(|&i, &j| {
            fitnesses[j]
                .partial_cmp(&fitnesses[i])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut next: Vec<Vec<Island>> = ranked[..elite]
            .iter()
            .map(|&i| population[i].clone())
            .collect();
        while next.len() < pop_size {
            let a = tournament(&fitnesses, rng);
            let b = tournament(&fitnesses, rng);
            let mut child = crossover(&population[a], &population[b], ctx, rng);
            mutate(&mut child, ctx, rng);
            next.push(child);
        }
        population = next;
    }

    population
        .into_iter()
        .max_by(|a, b| {
            layout_fitness(a, ctx)
                .partial_cmp(&layout_fitness(b, ctx))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_default()
}
