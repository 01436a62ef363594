//! # BioCalc CLI Application
//!
//! Terminal interface for the biofuel lifecycle carbon-intensity engine.
//! Prompts for the key pathway figures, runs the calculation against the
//! built-in reference dataset, and prints a stage-by-stage report plus
//! the JSON outcome for scripting.

use std::io::{self, BufRead, Write};

use biocalc_core::project::{DomesticTransport, ProjectSnapshot};
use biocalc_core::reference::ReferenceStore;
use biocalc_core::stages::calculate;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_choice(prompt: &str, options: &[&str], default: usize) -> usize {
    println!("{}", prompt);
    for (i, option) in options.iter().enumerate() {
        println!("  [{}] {}", i + 1, option);
    }
    print!("Choice [{}]: ", default + 1);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= options.len() => n - 1,
        _ => default,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    println!("BioCalc CLI - Biofuel Lifecycle Carbon Intensity");
    println!("================================================");
    println!();

    let store = ReferenceStore::builtin();
    let biomass_names = store.biomass_names();

    let biomass_idx = prompt_choice("Select biomass:", &biomass_names, 0);
    let biomass_type = biomass_names[biomass_idx].to_string();
    println!();

    let states = ["SP", "PR", "SC", "MG"];
    let state_idx = prompt_choice("Production state:", &states, 0);
    let production_state = states[state_idx].to_string();

    let biomass_processed =
        prompt_f64("Annual biomass processed (kg/yr) [1000000]: ", 1_000_000.0);
    let agr_distance = prompt_f64("Field-to-plant transport distance (km) [120]: ", 120.0);
    let water = prompt_f64("Annual water consumption (m3/yr) [300]: ", 300.0);
    let dist_mass = prompt_f64("Domestic distribution mass (kg/yr) [500000]: ", 500_000.0);
    let dist_km = prompt_f64("Domestic distribution distance (km) [200]: ", 200.0);
    let production_volume = prompt_f64("Annual production volume (t/yr) [1000]: ", 1000.0);

    let snapshot = ProjectSnapshot {
        biomass_type: biomass_type.clone(),
        production_state: Some(production_state),
        agr_transport_distance: Some(agr_distance),
        agr_transport_vehicle: Some("Caminhão Toco/Semipesado (16-32t)".to_string()),
        biomass_processed: Some(biomass_processed),
        water_consumption: Some(water),
        domestic_transport: DomesticTransport {
            mass_kg: Some(dist_mass),
            distance_km: Some(dist_km),
            ..Default::default()
        },
        production_volume_t: Some(production_volume),
        ..Default::default()
    };

    println!();
    println!("Calculating lifecycle intensity for {}...", biomass_type);
    println!();

    match calculate(&snapshot, store) {
        Ok(outcome) => {
            println!("═══════════════════════════════════════");
            println!("  LIFECYCLE CALCULATION RESULTS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Input:");
            println!("  Biomass:     {}", biomass_type);
            println!("  PCI:         {:.2} MJ/kg", outcome.pci_mj_kg);
            println!("  Throughput:  {:.0} kg/yr", biomass_processed);
            println!();
            println!("Stage intensities (kg CO2eq/MJ):");
            println!("  Agricultural: {:.6}", outcome.agricultural.0);
            println!("  Industrial:   {:.6}", outcome.industrial.0);
            println!("  Transport:    {:.6}", outcome.transport.0);
            println!("  Use phase:    {:.6}", outcome.use_phase.0);
            println!("  ─────────────────────");
            println!("  Total:        {:.6}", outcome.carbon_intensity.0);
            println!();
            println!("Against fossil baseline:");
            println!("  Margin:       {:.6} kg CO2eq/MJ", outcome.efficiency_margin);
            println!("  Reduction:    {:.1} %", outcome.reduction_percent);
            println!();
            println!("Credits ({:.0} t/yr production):", production_volume);
            println!("  Volume:       {:.1} tCO2eq", outcome.credits.credits);
            println!("  Revenue:      R$ {:.2}", outcome.credits.revenue);
            println!();
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output (for scripting/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&outcome) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}
