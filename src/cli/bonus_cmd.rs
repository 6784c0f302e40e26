//! `bonus` command handler

use anyhow::Result;
use console::style;

use crate::bonus::{calculate_tier7_to10_bonus, BonusInput};
use crate::calendar::compute_profile;
use crate::cli::{parse_event, BirthArgs};

#[allow(clippy::too_many_arguments)]
pub(crate) fn run(
    birth: &BirthArgs,
    event: &str,
    year: i32,
    month: u32,
    day: Option<u32>,
    hour: Option<u32>,
    format: &str,
) -> Result<()> {
    let profile = compute_profile(&birth.to_descriptor())?;
    let event = parse_event(event)?;

    let summary = calculate_tier7_to10_bonus(
        &BonusInput {
            profile: &profile,
            western: None,
            target_hour: hour,
        },
        event,
        year,
        month,
        day,
    )?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {:+.1} (confidence {:.0}%)",
        style("Bonus:").bold(),
        summary.total,
        summary.confidence * 100.0
    );
    println!("{}", summary.recommendation);
    if !summary.reasons.is_empty() {
        println!();
        println!("{}", style("For:").green());
        for reason in &summary.reasons {
            println!("  + {reason}");
        }
    }
    if !summary.penalties.is_empty() {
        println!("{}", style("Against:").red());
        for penalty in &summary.penalties {
            println!("  - {penalty}");
        }
    }
    Ok(())
}
