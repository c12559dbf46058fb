//! # LoadComb CLI Application
//!
//! Builds a small demonstration model (permanent, imposed and wind actions),
//! generates the strength combinations and prints them.
//!
//! ```text
//! combo_cli [settings.toml]
//! ```
//!
//! Log output is controlled with `RUST_LOG` (default `combo_core=info`).

use std::process::ExitCode;

use combo_core::{CombResult, CombinationSettings, Load, LoadCase, LoadCombinations, LoadGroup};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn build_demo(settings: CombinationSettings) -> CombResult<LoadCombinations> {
    let mut combos = LoadCombinations::with_settings(settings.clone());

    combos.add_group_with_loads(
        LoadGroup::factored("Permanent", "G", [1, 2], [0.9, 1.2])?,
        vec![Load::plain(1, "Self weight", "G1"), Load::plain(2, "Finishes", "G2")],
    )?;

    combos.add_group_with_loads(
        LoadGroup::builder("Imposed", "Q")
            .loads([3, 4])
            .exclusive()
            .factors([0.0, 1.5])
            .scale_to(3.0)
            .build()?,
        vec![Load::scalable(3, "Office", "Q1", 2.5), Load::scalable(4, "Plant room", "Q2", 5.0)],
    )?;

    combos.add_group_with_loads(
        LoadGroup::builder("Wind", "W")
            .with_settings(&settings)
            .loads([10, 11])
            .angles([0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0])
            .scale_to(45.0)
            .wind()
            .build()?,
        vec![
            Load::wind(10, "Wind 0deg", "W0", 40.0, 0.0, true),
            Load::wind(11, "Wind 90deg", "W90", 40.0, 90.0, true),
        ],
    )?;

    let mut uls = LoadCase::new("Strength", 1, "ULS");
    for group_name in ["Permanent", "Imposed", "Wind"] {
        if let Some(group) = combos.group(group_name) {
            uls.add_group_factor(group.clone(), 1.0)?;
        }
    }
    combos.add_case(uls)?;

    Ok(combos)
}

fn load_settings() -> CombResult<CombinationSettings> {
    match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "Loading settings");
            CombinationSettings::load(path)
        }
        None => Ok(CombinationSettings::default()),
    }
}

fn run() -> CombResult<()> {
    let settings = load_settings()?;
    let combos = build_demo(settings)?;

    for (case_name, combinations) in combos.generate_all()? {
        println!("═══════════════════════════════════════");
        println!("  {} ({} combinations)", case_name, combinations.len());
        println!("═══════════════════════════════════════");
        for (i, combination) in combinations.iter().enumerate() {
            println!("{:>4}  {}", i + 1, combos.title(combination));
        }
        println!();

        if let Some(first) = combinations.first() {
            println!("JSON Output (first combination):");
            match serde_json::to_string_pretty(first) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error: could not serialize combination: {}", e),
            }
            println!();
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "combo_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("LoadComb CLI - Load Combination Generator");
    println!("=========================================");
    println!();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
