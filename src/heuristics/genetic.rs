//! Genetic Algorithm: flat-array population, cut-point crossover with
//! cheapest-insertion repair, swap mutation, tournament selection, elitism.
//!
//! Grounded in `algorithm/genetic.c`.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::construction::{extra_mileage_complete_tour, grasp_nearest_neighbor_tour};
use crate::incumbent::Incumbent;
use crate::instance::Instance;
use crate::local_search::two_opt;
use crate::recorder::CostRecorder;
use crate::time_limiter::TimeLimiter;
use crate::tour::tour_cost;

pub struct GeneticConfig {
    pub population_size: usize,
    pub elite_count: usize,
    pub mutation_rate: f64,
    pub crossover_cut_min_ratio: u32,
    pub crossover_cut_max_ratio: u32,
    pub tournament_size: usize,
    pub init_grasp_percent: u32,
    pub seed: u64,
    pub time_limit: f64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            population_size: 100,
            elite_count: 1,
            mutation_rate: 0.1,
            crossover_cut_min_ratio: 25,
            crossover_cut_max_ratio: 75,
            tournament_size: 5,
            init_grasp_percent: 90,
            seed: 0,
            time_limit: 10.0,
        }
    }
}

struct Population {
    genes: Vec<Vec<usize>>,
    costs: Vec<f64>,
}

fn repair_child(instance: &Instance, parent_cut: &[usize]) -> Vec<usize> {
    // Shortcut-dedupe preserving first occurrence, then complete via
    // cheapest insertion, matching the original's `repair_child`.
    let mut seen = vec![false; instance.n];
    let mut deduped = Vec::with_capacity(parent_cut.len());
    for &node in parent_cut {
        if !seen[node] {
            seen[node] = true;
            deduped.push(node);
        }
    }
    extra_mileage_complete_tour(instance, deduped)
}

fn crossover(instance: &Instance, p1: &[usize], p2: &[usize], cfg: &GeneticConfig, rng: &mut ChaCha8Rng) -> Vec<usize> {
    let n = instance.n;
    let min_cut = (n * cfg.crossover_cut_min_ratio as usize / 100).max(1);
    let max_cut = (n * cfg.crossover_cut_max_ratio as usize / 100).min(n - 1).max(min_cut);
    let cut = rng.gen_range(min_cut..=max_cut);

    let mut child: Vec<usize> = p1[..cut].to_vec();
    child.extend_from_slice(&p2[cut..]);
    repair_child(instance, &child)
}

fn mutate(tour: &mut [usize], rng: &mut ChaCha8Rng) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let a = rng.gen_range(0..n);
    let b = rng.gen_range(0..n);
    tour.swap(a, b);
}

fn tournament_select<'a>(pop: &'a Population, tournament_size: usize, rng: &mut ChaCha8Rng) -> &'a [usize] {
    let mut best_idx = rng.gen_range(0..pop.genes.len());
    for _ in 1..tournament_size {
        let candidate = rng.gen_range(0..pop.genes.len());
        if pop.costs[candidate] < pop.costs[best_idx] {
            best_idx = candidate;
        }
    }
    &pop.genes[best_idx]
}

pub fn run(incumbent: &Incumbent, recorder: &mut CostRecorder, config: &GeneticConfig) {
    let instance = incumbent.instance().clone();
    let n = instance.n;
    if n < 4 {
        return;
    }
    let limiter = TimeLimiter::new(config.time_limit);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let grasp_count = config.population_size * config.init_grasp_percent as usize / 100;
    let mut genes = Vec::with_capacity(config.population_size);
    for i in 0..config.population_size {
        let mut tour = if i < grasp_count {
            grasp_nearest_neighbor_tour(&instance, rng.gen_range(0..n), 5, 0.2, &mut rng)
        } else {
            let mut t: Vec<usize> = (0..n).collect();
            use rand::seq::SliceRandom;
            t.shuffle(&mut rng);
            t
        };
        two_opt(&mut tour, &instance, &limiter);
        genes.push(tour);
    }
    let costs: Vec<f64> = genes.iter().map(|t| tour_cost(&instance, t)).collect();
    let mut pop = Population { genes, costs };

    let mut best_idx = 0;
    for i in 1..pop.costs.len() {
        if pop.costs[i] < pop.costs[best_idx] {
            best_idx = i;
        }
    }
    let mut best_tour = pop.genes[best_idx].clone();
    let mut best_cost = pop.costs[best_idx];

    while !limiter.is_over() {
        let mut ranked: Vec<usize> = (0..pop.genes.len()).collect();
        ranked.sort_by(|&a, &b| pop.costs[a].partial_cmp(&pop.costs[b]).unwrap());

        let mut next_genes = Vec::with_capacity(config.population_size);
        for &idx in ranked.iter().take(config.elite_count) {
            next_genes.push(pop.genes[idx].clone());
        }

        while next_genes.len() < config.population_size {
            let parent1 = tournament_select(&pop, config.tournament_size, &mut rng).to_vec();
            let parent2 = tournament_select(&pop, config.tournament_size, &mut rng).to_vec();
            let mut child = crossover(&instance, &parent1, &parent2, config, &mut rng);
            if rng.gen::<f64>() < config.mutation_rate {
                mutate(&mut child, &mut rng);
            }
            two_opt(&mut child, &instance, &limiter);
            next_genes.push(child);
        }

        let next_costs: Vec<f64> = next_genes.iter().map(|t| tour_cost(&instance, t)).collect();
        pop = Population { genes: next_genes, costs: next_costs };

        for i in 0..pop.costs.len() {
            if pop.costs[i] < best_cost - 1e-9 {
                best_cost = pop.costs[i];
                best_tour = pop.genes[i].clone();
            }
        }
    }

    if incumbent.update_if_better(&best_tour, best_cost) {
        recorder.add(best_cost);
        log::debug!("Genetic: improved to {best_cost:.2}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn run_never_worsens_the_incumbent() {
        let inst = Arc::new(Instance::random(20, 0.0, 0.0, 500.0, 17));
        let incumbent = Incumbent::identity(inst);
        let start_cost = incumbent.get_cost();
        let mut rec = CostRecorder::new();
        let config = GeneticConfig { population_size: 20, time_limit: 1.5, ..Default::default() };
        run(&incumbent, &mut rec, &config);
        assert!(incumbent.get_cost() <= start_cost);
    }

    #[test]
    fn repair_child_produces_a_permutation() {
        let inst = Instance::random(12, 0.0, 0.0, 200.0, 18);
        let partial = vec![0, 3, 3, 5, 1];
        let repaired = repair_child(&inst, &partial);
        let mut seen = vec![false; inst.n];
        for &v in &repaired {
            assert!(!seen[v]);
            seen[v] = true;
        }
        assert_eq!(repaired.len(), inst.n);
    }
}
