//! TSP Solver - Command Line Interface.

use std::sync::Arc;

use clap::Parser;

use tsp_solver::benchmark::Benchmark;
use tsp_solver::config::{Algorithm, Cli, Commands};
use tsp_solver::exact::warm_start::HeuristicKind;
use tsp_solver::exact::{benders, branch_and_cut, hard_fixing, local_branching};
use tsp_solver::heuristics::{extra_mileage, genetic, grasp, nearest_neighbor, tabu, vns};
use tsp_solver::incumbent::Incumbent;
use tsp_solver::instance::Instance;
use tsp_solver::recorder::CostRecorder;
use tsp_solver::tsplib;

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{e}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<(), tsp_solver::TspError> {
    match cli.command {
        Commands::Solve { instance, algorithm, time_limit, output } => {
            let instance = Instance::from_tsplib_file(&instance)?;
            log::info!("loaded instance '{}' with {} nodes", instance.name, instance.n);

            let incumbent = Incumbent::identity(Arc::new(instance));
            let mut recorder = CostRecorder::new();
            run_algorithm(&incumbent, &mut recorder, algorithm, time_limit, cli.seed);

            let tour = incumbent.get_tour_copy();
            let cost = incumbent.get_cost();
            println!("{algorithm}: cost = {cost:.2}");
            println!("tour = {tour:?}");

            if let Some(path) = output {
                tsplib::write_solution(&path, &tour, cost)?;
                log::info!("wrote solution to {path}");
            }
            Ok(())
        }
        Commands::Benchmark { instances, time_limit, csv } => {
            let catalog = [
                Algorithm::NearestNeighbor,
                Algorithm::ExtraMileage,
                Algorithm::Grasp,
                Algorithm::Tabu,
                Algorithm::Vns,
                Algorithm::Genetic,
            ];
            let mut benchmark = Benchmark::new();
            for path in &instances {
                let instance = Instance::from_tsplib_file(path)?;
                benchmark.run_on_instance(&instance, &catalog, time_limit, cli.seed);
            }

            for stats in benchmark.compute_statistics() {
                println!(
                    "{:<16} runs={:<3} avg={:.2} best={:.2} worst={:.2} std={:.2} avg_time={:.3}s",
                    stats.algorithm, stats.runs, stats.avg_cost, stats.best_cost, stats.worst_cost, stats.std_cost, stats.avg_time
                );
            }

            if let Some(path) = csv {
                benchmark.export_to_csv(&path)?;
                log::info!("wrote benchmark CSV to {path}");
            }
            Ok(())
        }
    }
}

fn run_algorithm(incumbent: &Incumbent, recorder: &mut CostRecorder, algorithm: Algorithm, time_limit: f64, seed: u64) {
    match algorithm {
        Algorithm::NearestNeighbor => nearest_neighbor::run(incumbent, recorder, time_limit),
        Algorithm::ExtraMileage => extra_mileage::run(incumbent, recorder, time_limit),
        Algorithm::Grasp => {
            let config = grasp::GraspConfig { seed, time_limit, ..Default::default() };
            grasp::run(incumbent, recorder, &config);
        }
        Algorithm::Tabu => {
            let config = tabu::TabuConfig { seed, time_limit, ..Default::default() };
            tabu::run(incumbent, recorder, &config);
        }
        Algorithm::Vns => {
            let config = vns::VnsConfig { seed, time_limit, ..Default::default() };
            vns::run(incumbent, recorder, &config);
        }
        Algorithm::Genetic => {
            let config = genetic::GeneticConfig { seed, time_limit, ..Default::default() };
            genetic::run(incumbent, recorder, &config);
        }
        Algorithm::Benders => {
            benders::run(incumbent, recorder, &benders::BendersConfig { time_limit });
        }
        Algorithm::BranchAndCut => {
            branch_and_cut::run(incumbent, recorder, &branch_and_cut::BranchAndCutConfig { time_limit, seed });
        }
        Algorithm::HardFixing => {
            let config = hard_fixing::HardFixingConfig {
                heuristic_type: HeuristicKind::Vns,
                seed,
                time_limit,
                ..Default::default()
            };
            hard_fixing::run(incumbent, recorder, &config);
        }
        Algorithm::LocalBranching => {
            let config = local_branching::LocalBranchingConfig {
                heuristic_type: HeuristicKind::Vns,
                seed,
                time_limit,
                ..Default::default()
            };
            local_branching::run(incumbent, recorder, &config);
        }
    }
}
