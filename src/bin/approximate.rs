use std::path::Path;

use approximator::{sampling::ScatterSampler, solver::SolverOptions, CurveFit};

const USAGE: &str = "Usage: approximate [degree=<n>] [points=<n>] [seed=<n>] [config=<path.json>] [json]";

fn parse_arg<T: std::str::FromStr>(name: &str, value: &str) -> T {
    str::parse(value).unwrap_or_else(|_| {
        eprintln!("Invalid {name} value: {value}");
        eprintln!("{USAGE}");
        std::process::exit(1);
    })
}

fn load_options(path: &Path) -> SolverOptions {
    let Ok(contents) = std::fs::read_to_string(path) else {
        eprintln!("Failed to read file: {}", path.display());
        std::process::exit(1);
    };

    serde_json::from_str(&contents).unwrap_or_else(|err| {
        eprintln!("Failed to parse solver options: {err}");
        std::process::exit(1);
    })
}

fn main() {
    env_logger::init();

    let mut sampler = ScatterSampler::default();
    let mut degree = 1usize;
    let mut options = SolverOptions::default();
    let mut as_json = false;

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("degree=") {
            degree = parse_arg("degree", value);
        } else if let Some(value) = arg.strip_prefix("points=") {
            sampler.count = parse_arg("points", value);
        } else if let Some(value) = arg.strip_prefix("seed=") {
            sampler.seed = Some(parse_arg("seed", value));
        } else if let Some(value) = arg.strip_prefix("config=") {
            options = load_options(Path::new(value));
        } else if arg == "json" {
            as_json = true;
        } else if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        } else {
            eprintln!("Unknown argument: {arg}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    //
    // Scatter points around y = x², then try to recover it
    let data = sampler.sample(|x| x * x).unwrap_or_else(|err| {
        eprintln!("Failed to sample points: {err}");
        std::process::exit(1);
    });
    log::info!("fitting degree {degree} to {} points", data.len());

    let fit = match CurveFit::with_options(&data[..], degree, &options) {
        Ok(fit) => fit,
        Err(err) => {
            eprintln!("Failed to fit: {err}");
            std::process::exit(if err.is_invalid_input() { 1 } else { 2 });
        }
    };

    if as_json {
        match serde_json::to_string_pretty(&fit.properties()) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Failed to serialize fit: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Approximating function: {fit}");
    println!("Coefficients (lowest degree first): {:?}", fit.coefficients());

    let conditioning = fit.conditioning();
    println!(
        "Smallest pivot ratio: {:.3e} (column {}){}",
        conditioning.min_pivot_ratio,
        conditioning.min_pivot_column,
        if conditioning.ill_conditioned {
            ", ill-conditioned"
        } else {
            ""
        }
    );

    println!();
    println!("{:>10} | {:>10} | {:>10} | {:>10}", "x", "y", "fit", "residual");
    println!("{:-<10}-|-{:-<10}-|-{:-<10}-|-{:-<10}", "", "", "", "");
    for (&(x, y), (_, residual)) in fit.data().iter().zip(fit.residuals()) {
        println!(
            "{x:>10.4} | {y:>10.4} | {:>10.4} | {residual:>10.4}",
            y - residual
        );
    }

    println!();
    println!(
        "R² = {:.4}, RMSE = {:.4}",
        fit.r_squared(),
        fit.root_mean_squared_error()
    );
}
