//! Naive observational slope against the Monte Carlo average treatment effect
//! of the default toy model.
//!
//! Usage: `cargo run --example backdoor [config.json]`
use causal_mc::{ConfigIO, SimulationConfig, ToySimulation};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;
use std::env;
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => SimulationConfig::load_config(path)?,
        None => SimulationConfig::default(),
    };

    let mut simulation = ToySimulation::toy(&config)?;
    let observational = simulation.sample_observational(config.observational_samples)?;
    simulation.reset();
    let comparison = simulation.compare(config.observational_samples, &config.ate)?;

    // Keep a few rows of the observational sample for inspection.
    fs::create_dir_all("outputs")?;
    let mut writer = csv::Writer::from_path("outputs/sample.csv")?;
    writer.write_record(["z", "x", "y"])?;
    let mut rng = StdRng::seed_from_u64(0);
    let rows: Vec<(f64, f64, f64)> = observational.rows().collect();
    for i in sample(&mut rng, rows.len(), rows.len().min(10)) {
        let (z, x, y) = rows[i];
        writer.write_record(&[z.to_string(), x.to_string(), y.to_string()])?;
    }
    writer.flush()?;

    println!("Naive observational slope ~ ATE: {:.3}", comparison.naive.slope);
    println!(
        "Backdoor-adjusted Monte Carlo ATE (x={}->{}): {:.3}",
        config.ate.x0, config.ate.x1, comparison.ate
    );
    println!("Monte Carlo effect per unit of treatment: {:.3}", comparison.effect_per_unit);
    println!(
        "True ATE of the toy model (x={}->{}): {:.3}",
        config.ate.x0,
        config.ate.x1,
        config.toy.true_ate(config.ate.x0, config.ate.x1)
    );

    Ok(())
}
