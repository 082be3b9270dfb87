//! Bootstrap interval for a synthesized pair with correlation 0.7
//!
//! ```text
//! cargo run --example corr_bootstrap
//! cargo run --example corr_bootstrap -- study.json --json
//! RUST_LOG=corr_confidence=debug cargo run --example corr_bootstrap
//! ```
//!
//! The optional config file holds a `StudyConfig` in JSON; missing fields
//! take their defaults. With `--json` the whole report (pair, replica
//! histogram, interval) is printed for an external plotter.

use anyhow::{Context, Result};
use corr_bootstrap::{CorrelationStudy, StudyConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn load_config(path: Option<&str>) -> Result<StudyConfig> {
    let Some(path) = path else {
        return Ok(StudyConfig {
            seed: Some(42),
            ..Default::default()
        });
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let path = args.iter().find(|a| !a.starts_with("--")).map(String::as_str);

    let config = load_config(path)?;
    let study = CorrelationStudy::new(config)?;
    let report = study.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{report}");
    println!();
    println!("Replica correlations:");
    let hist = &report.histogram;
    let peak = hist.max_count().max(1);
    for (center, count) in hist.centers().into_iter().zip(hist.counts()) {
        if count > 0 {
            let bar = "#".repeat((count * 50).div_ceil(peak));
            println!("{center:>7.3} {count:>5} {bar}");
        }
    }
    println!(
        "\ntarget {} the interval",
        if report.covers_target() { "inside" } else { "outside" }
    );

    Ok(())
}
