use clap::Parser;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use bakehouse::domain::disruption::{DisruptionPolicy, RandomInjector, SharedInjector};
use bakehouse::domain::simulation::{Challenge, ChallengeConfig};
use bakehouse::{load_catalog, logger, render};

/// Concurrent bake-off: every baker races through the recipe catalog,
/// competing for the shared kitchen.
#[derive(Parser, Debug)]
#[command(name = "bakehouse", version, about, allow_negative_numbers = true)]
struct Cli {
    /// Number of bakers competing. Prompted for interactively when
    /// omitted or not a positive number.
    bakers: Option<i64>,

    /// Chance, per checkpoint, that a baker is sent back to the start
    /// of the current recipe.
    #[arg(long, default_value_t = 0.1)]
    chance: f64,

    /// Draw the disruption chance at every checkpoint instead of at
    /// most once per baker.
    #[arg(long)]
    per_checkpoint: bool,

    /// Path to a recipe catalog JSON file (defaults to the built-in
    /// catalog).
    #[arg(long)]
    catalog: Option<String>,

    /// Suppress the periodic status table.
    #[arg(long)]
    quiet: bool,
}

fn prompt_for_bakers() -> usize {
    let stdin = io::stdin();
    println!("How many bakers are involved in this challenge?");
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                eprintln!("no input available; exiting");
                std::process::exit(2);
            }
            Ok(_) => match line.trim().parse::<i64>() {
                Ok(n) if n > 0 => return n as usize,
                _ => println!("please input a valid number > 0"),
            },
            Err(e) => {
                eprintln!("failed to read input: {e}");
                std::process::exit(2);
            }
        }
    }
}

fn main() {
    logger::init();

    let cli = Cli::parse();

    let bakers = match cli.bakers {
        Some(n) if n > 0 => n as usize,
        Some(_) => {
            println!("please input a valid number > 0");
            prompt_for_bakers()
        }
        None => prompt_for_bakers(),
    };

    let mut config = ChallengeConfig::new(bakers);
    config.probability = cli.chance;
    config.policy = if cli.per_checkpoint {
        DisruptionPolicy::PerCheckpoint
    } else {
        DisruptionPolicy::OncePerBaker
    };

    let catalog = match load_catalog(cli.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Error during loading of the recipe catalog: {}", e);
            std::process::exit(1);
        }
    };
    catalog.log_summary();

    let injector = SharedInjector(Arc::new(RandomInjector::new(config.probability, config.policy)));
    let challenge = match Challenge::with_parts(config, catalog, injector) {
        Ok(challenge) => challenge,
        Err(e) => {
            log::error!("Invalid challenge setup: {}", e);
            std::process::exit(1);
        }
    };

    let quiet = cli.quiet;
    let outcome = challenge.run(|bakers, pool, elapsed| {
        if !quiet {
            render::print_status_table(bakers, pool, elapsed);
        }
    });

    render::print_final_ranking(&outcome.finish_order, outcome.elapsed);
}
