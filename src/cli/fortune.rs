//! `fortune` and `timing` command handlers

use std::path::Path;

use anyhow::{bail, Result};
use console::style;

use crate::calendar::compute_profile;
use crate::cli::BirthArgs;
use crate::config::EngineConfig;
use crate::simulator::{
    find_optimal_timing, simulate_fortune_flow, simulate_life_cycle, simulate_monthly_fortune,
    LifeArea, SnapshotOptions,
};

pub(crate) fn run(
    birth: &BirthArgs,
    from: Option<i32>,
    to: Option<i32>,
    monthly: Option<i32>,
    lifecycle: Option<i32>,
    format: &str,
) -> Result<()> {
    let profile = compute_profile(&birth.to_descriptor())?;

    if let Some(year) = monthly {
        let snapshots = simulate_monthly_fortune(&profile, year)?;
        if format == "json" {
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
            return Ok(());
        }
        println!("{} {year}", style("Monthly fortune").bold());
        for snapshot in &snapshots {
            println!(
                "  {:02}: {:.1} avg, {} focus, {:?}",
                snapshot.time_point.month.unwrap_or(0),
                snapshot.average_score(),
                snapshot.dominant_element,
                snapshot.keywords
            );
        }
        return Ok(());
    }

    if let Some(year) = lifecycle {
        let result = simulate_life_cycle(&profile, year)?;
        if format == "json" {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }
        println!("{}", style("Life cycle").bold());
        for (i, phase) in result.phases.iter().enumerate() {
            let marker = if i == result.current_phase { "→" } else { " " };
            println!(
                "{marker} {} ({}-{}): {:.1} — {}",
                phase.name, phase.age_range.0, phase.age_range.1, phase.score, phase.theme
            );
        }
        if let Some(age) = result.next_milestone {
            println!("Next milestone at Korean age {age}");
        }
        return Ok(());
    }

    let (Some(from), Some(to)) = (from, to) else {
        bail!("fortune needs --from/--to, --monthly <year>, or --lifecycle <year>");
    };

    // Scoring overrides come from ./sajuvise.toml when present.
    let engine_config = EngineConfig::load_or_default(Path::new("."))?;
    let options = SnapshotOptions {
        scoring: engine_config.scoring,
        ..Default::default()
    };
    let flow = simulate_fortune_flow(&profile, from, to, &options)?;
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&flow)?);
        return Ok(());
    }

    println!(
        "{} {from}-{to}: {:?}",
        style("Fortune flow").bold(),
        flow.overall_trend
    );
    for snapshot in &flow.snapshots {
        println!(
            "  {}: {:.1} avg",
            snapshot.time_point.year,
            snapshot.average_score()
        );
    }
    println!(
        "Best: {}  Challenging: {}",
        flow.best_period, flow.challenging_period
    );
    for tp in &flow.turning_points {
        let kind = if tp.is_peak { "peak" } else { "trough" };
        println!("  turning point: {} ({kind}, {:.1})", tp.year, tp.score);
    }
    Ok(())
}

pub(crate) fn run_timing(
    birth: &BirthArgs,
    area: &str,
    from: i32,
    to: i32,
    format: &str,
) -> Result<()> {
    let profile = compute_profile(&birth.to_descriptor())?;
    let area = match area {
        "career" => LifeArea::Career,
        "wealth" => LifeArea::Wealth,
        "love" => LifeArea::Love,
        "health" => LifeArea::Health,
        other => bail!("unknown area '{other}'"),
    };

    let best = find_optimal_timing(&profile, area, from, to)?;
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&best)?);
        return Ok(());
    }

    println!("{} {}", style("Best windows for").bold(), area.label());
    for (point, score) in &best {
        println!(
            "  {}-{:02}: {:.1}",
            point.year,
            point.month.unwrap_or(0),
            score
        );
    }
    Ok(())
}
