use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use verdant_lib::app::App;
use verdant_lib::model::metrics::init_logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path; defaults apply when it does not exist
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u64,

    /// Seed overriding the config's world seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log a summary line every N ticks (0 disables)
    #[arg(long, default_value_t = 1000)]
    log_interval: u64,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("info");

    let mut config = App::load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }

    let mut app = App::new(config, args.log_interval)?;
    let summary = app.run(args.ticks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let t = &summary.totals;
        println!("Simulation finished after {} ticks.", summary.ticks);
        println!(
            "Population: {} (peak {}), food: {}",
            summary.population, t.peak_population, summary.food
        );
        println!(
            "Births: {}, starvations: {}, old age: {}, highest generation: {}",
            t.births, t.starvations, t.old_age_deaths, t.max_generation
        );
        println!(
            "Food eaten: {}, spawned: {}, mean tick: {} us",
            t.food_eaten, t.food_spawned, summary.mean_tick_us
        );
        if summary.extinct {
            println!("The population died out.");
        }
    }
    Ok(())
}
