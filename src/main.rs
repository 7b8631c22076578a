/*!
 * Parity Monitor - Scenario Runner
 *
 * Runs every scenario against a fresh coordinator and reports OK/FAILED.
 */

use miette::{IntoDiagnostic, WrapErr};
use std::time::Duration;
use tracing::{error, info};

use parity_monitor::core::limits::DEFAULT_OBSERVATION_WINDOW;
use parity_monitor::{init_tracing, Scenario};

fn main() -> miette::Result<()> {
    // Initialize structured tracing
    init_tracing();

    let observation = observation_window()?;
    let print_json = std::env::var("MONITOR_REPORT_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    info!(observation_ms = observation.as_millis() as u64, "running scenarios");

    let mut failed = Vec::new();
    for scenario in Scenario::ALL {
        let report = scenario
            .run(observation)
            .map_err(|e| miette::miette!("scenario {scenario} could not run: {e:#}"))?;

        if report.passed {
            info!(scenario = %scenario, "OK");
        } else {
            error!(
                scenario = %scenario,
                failure = report.failure.as_deref().unwrap_or_default(),
                "FAILED"
            );
            failed.push(scenario.name());
        }

        if print_json {
            let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
            println!("{json}");
        }
    }

    if !failed.is_empty() {
        miette::bail!("{} scenario(s) failed: {}", failed.len(), failed.join(", "));
    }

    info!("all scenarios passed");
    Ok(())
}

/// Observation window from MONITOR_OBSERVE_MS, one second by default
fn observation_window() -> miette::Result<Duration> {
    match std::env::var("MONITOR_OBSERVE_MS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .into_diagnostic()
            .wrap_err("MONITOR_OBSERVE_MS must be a number of milliseconds"),
        Err(_) => Ok(DEFAULT_OBSERVATION_WINDOW),
    }
}
