use carpool_sim::engine::run_simulation;
use carpool_sim::scenario::ScenarioParameters;
use carpool_sim::statistics::{aggregate_statistics, save_statistics};

struct Args {
    num_runs: usize,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut num_runs = 1000usize;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    num_runs = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --runs value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --seed value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--output" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!("Usage: carpool-simulate [--runs N] [--seed S] [--output FILE]");
                println!();
                println!("Options:");
                println!("  --runs N       Number of Monte Carlo runs (default: 1000)");
                println!("  --seed S       RNG seed (default: 42)");
                println!("  --output FILE  Write aggregate statistics as JSON to FILE");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: carpool-simulate [--runs N] [--seed S] [--output FILE]");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        num_runs,
        seed,
        output,
    }
}

fn main() {
    let args = parse_args();
    let params = ScenarioParameters::default();

    println!(
        "Simulating {} runs (seed {}) against a {:.0} km baseline...",
        args.num_runs, args.seed, params.baseline_mileage_km
    );

    let result = match run_simulation(&params, args.num_runs, args.seed) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    let stats = aggregate_statistics(&result, args.seed);

    println!("Completed in {:.2?}", result.elapsed);
    println!();
    println!(
        "Adoption rate:      mean {:.3}  std {:.3}  [{:.3}, {:.3}]",
        stats.adoption_rate.mean,
        stats.adoption_rate.std_dev,
        stats.adoption_rate.min,
        stats.adoption_rate.max
    );
    println!(
        "Emissions (t CO2):  mean {:.0}  p5 {:.0}  p95 {:.0}",
        stats.emissions_tonnes.mean, stats.emissions_tonnes.p5, stats.emissions_tonnes.p95
    );
    println!(
        "Vehicles saved:     mean {:.0}  p5 {:.0}  p95 {:.0}",
        stats.vehicles_saved.mean, stats.vehicles_saved.p5, stats.vehicles_saved.p95
    );
    println!();
    println!(
        "Total simulated mileage: {:.0} km",
        stats.total_simulated_mileage_km
    );
    println!("Conservation gap:        {:.3} km", stats.mileage_gap_km);

    if let Some(path) = &args.output {
        if let Err(e) = save_statistics(&stats, path) {
            eprintln!("Failed to write statistics to {}: {}", path, e);
            std::process::exit(1);
        }
        println!("Statistics written to {}", path);
    }
}
