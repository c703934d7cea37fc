//! Billiard Sim entry point
//!
//! Runs a configuration headless and logs conservation totals as it goes.
//! The configuration is read from the JSON file given as the first argument,
//! or the built-in default is used.

use billiard_sim::{BallSystem, Result, SimConfig};

const STEPS: u32 = 1000;
const REPORT_EVERY: u64 = 100;

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).map_err(|e| {
                billiard_sim::SimError::config(format!("cannot read {path}: {e}"))
            })?;
            SimConfig::from_json(&json)?
        }
        None => SimConfig::default(),
    };

    let mut system = BallSystem::from_config(&config)?;
    let energy = system.kinetic_energy();
    log::info!("Initial kinetic energy {energy:.6}, momentum {}", system.momentum());

    system.simulate(STEPS, |sys| {
        if sys.tick_count() % REPORT_EVERY == 0 {
            log::info!(
                "t = {:.2} (tick {}): energy {:.6}, momentum {}",
                sys.elapsed_time(),
                sys.tick_count(),
                sys.kinetic_energy(),
                sys.momentum()
            );
        }
    })?;

    let drift = (system.kinetic_energy() - energy).abs();
    log::info!("Done after {} ticks, energy drift {drift:e}", system.tick_count());
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Billiard Sim starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
