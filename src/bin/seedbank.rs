//! Seedbank CLI — local driver for the seed registry
//!
//! Commands:
//!   seedbank demo     — run the end-to-end scenarios and write a snapshot
//!   seedbank summary  — load a snapshot and print its summary
//!   seedbank help     — show usage

use seedbank_core::storage;
use seedbank_core::{
    BatchStorage, ConditionProfile, Principal, RegistryConfig, RegistryError, SeedRegistry,
    TestObservation, VarietyDetails,
};
use std::env;
use std::process::ExitCode;

const GROWER: &str = "ST1GROWER0000000000000000000000000000000";
const LAB: &str = "ST2GERMLAB000000000000000000000000000000";

fn print_usage() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║        Seedbank v0.1 — Seed Provenance & Viability Registry  ║
╚══════════════════════════════════════════════════════════════╝

Usage: seedbank <command> [options]

Commands:
  demo                Register a variety, growing profile, batch, test and
                      prediction; write the snapshot to $SEEDBANK_STORE
  summary [path]      Load a snapshot and print registry statistics
  help                Show this message

Environment:
  SEEDBANK_ADMIN      Principal allowed to grant the verifier role
  SEEDBANK_STORE      Snapshot path (default: seedbank-store.json)
"#
    );
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let config = RegistryConfig::from_env();
    let result = match args[1].as_str() {
        "demo" => cmd_demo(&config),
        "summary" => cmd_summary(&config, &args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("  Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_summary(config: &RegistryConfig, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = args
        .first()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| config.snapshot_path.clone());
    let registry = storage::load(&path)?;
    println!("\n  {}", registry.summary());
    let stats = registry.stats();
    println!("  {}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn cmd_demo(config: &RegistryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let grower = Principal::from(GROWER);
    let lab = Principal::from(LAB);
    let admin = config.admin.clone();
    let mut registry = SeedRegistry::new(config);
    let mut height = 100;

    println!("Step 1: Registering variety...");
    println!("{}", "-".repeat(60));
    let variety = registry.register_variety(
        VarietyDetails {
            name: "Cherokee Purple Tomato".into(),
            species: "Solanum lycopersicum".into(),
            family: "Solanaceae".into(),
            origin: "Cherokee Nation, Southeastern United States".into(),
            description: "Heirloom beefsteak tomato with deep purple-pink color".into(),
            characteristics: "Indeterminate growth, 8-12 oz fruits, 80 days to maturity".into(),
            cultivation_history: "Cultivated since at least the late 1800s".into(),
            images: "https://example.com/cherokee-purple1.jpg".into(),
        },
        &grower,
        height,
    );
    if let Some(v) = registry.get_variety(variety) {
        println!("  {}", v.summary());
    }

    println!("\nStep 2: Verifier attestation...");
    println!("{}", "-".repeat(60));
    registry.add_verifier(lab.clone(), &admin)?;
    match registry.verify_variety(variety, true, &grower) {
        Err(RegistryError::Forbidden) => println!("  Owner cannot self-verify (403)"),
        other => println!("  Unexpected: {:?}", other),
    }
    registry.verify_variety(variety, true, &lab)?;
    println!("  Verified by {}: {}", lab, registry.is_variety_verified(variety)?);

    println!("\nStep 3: Growing condition profile...");
    println!("{}", "-".repeat(60));
    height += 1;
    let condition = registry.register_growing_condition(
        variety,
        ConditionProfile {
            climate_zone: "USDA Zone 5-9".into(),
            temperature_min: 18,
            temperature_max: 32,
            rainfall_min: 500,
            rainfall_max: 1000,
            soil_type: "Well-drained loam".into(),
            soil_ph_min: 60,
            soil_ph_max: 70,
            sunlight_requirements: "Full sun".into(),
            planting_season: "Late spring".into(),
            days_to_maturity: 80,
            companion_plants: "Basil, marigold".into(),
            notes: String::new(),
        },
        &grower,
        height,
    );
    for (t, r, ph) in [(25, 750, 65), (15, 750, 65), (25, 1200, 65), (25, 750, 75)] {
        println!(
            "  temp={:>3}°C rain={:>5}mm pH={:.1} -> suitable={}",
            t,
            r,
            ph as f64 / 10.0,
            registry.is_suitable_climate(condition, t, r, ph)?
        );
    }

    println!("\nStep 4: Seed batch, germination test, viability prediction...");
    println!("{}", "-".repeat(60));
    height += 1;
    let batch = registry.register_seed_batch(
        variety,
        height - 30,
        BatchStorage {
            quantity: 500,
            storage_method: "Vacuum sealed glass jars with silica gel".into(),
            storage_location: "Seed room, 15°C, 30% humidity".into(),
            notes: String::new(),
        },
        &grower,
        height,
    );
    let test = registry.record_germination_test(
        batch,
        TestObservation {
            seeds_tested: 100,
            seeds_germinated: 92,
            days_to_germination: 7,
            test_method: "Paper towel".into(),
            test_conditions: "22°C, 80% humidity".into(),
            images: String::new(),
            notes: String::new(),
        },
        &lab,
        height,
    )?;
    if let Some(t) = registry.get_germination_test(test) {
        println!(
            "  Test #{}: {}/{} germinated -> rate {}.{:02}%",
            t.id,
            t.observation.seeds_germinated,
            t.observation.seeds_tested,
            t.germination_rate / 100,
            t.germination_rate % 100
        );
    }
    let prediction =
        registry.create_viability_prediction(batch, height + 1825, 8500, "Historical tomato seed data", &lab, height)?;
    if let Some(p) = registry.get_viability_prediction(prediction) {
        println!(
            "  Prediction #{}: viable until height {} (confidence {}.{:02}%)",
            p.id,
            p.predicted_viability_height,
            p.confidence_level / 100,
            p.confidence_level % 100
        );
    }
    println!("  Seed age at height {}: {}", height + 10, registry.calculate_seed_age(batch, height + 10)?);

    println!("\nStep 5: Snapshot...");
    println!("{}", "-".repeat(60));
    let meta = storage::save(&registry, &config.snapshot_path)?;
    println!("  {}", registry.summary());
    println!("  Snapshot {} written to {} (sha256 {})", meta.snapshot_id, config.snapshot_path.display(), &meta.checksum[..16]);
    Ok(())
}
