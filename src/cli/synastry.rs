//! `synastry` command handler

use anyhow::Result;
use console::style;

use crate::cli::BirthArgs;
use crate::western::{calculate_synastry, compute_chart};

pub(crate) fn run(
    birth: &BirthArgs,
    partner_date: &str,
    partner_time: Option<&str>,
    partner_gender: &str,
    format: &str,
) -> Result<()> {
    let mut partner = birth.clone();
    partner.date = partner_date.to_string();
    partner.time = partner_time.map(str::to_string);
    partner.gender = partner_gender.to_string();

    let chart_a = compute_chart(&birth.to_descriptor())?;
    let chart_b = compute_chart(&partner.to_descriptor())?;
    let result = calculate_synastry(&chart_a, &chart_b);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} harmony {:.2} / tension {:.2} / total {:.2}",
        style("Synastry:").bold(),
        result.harmony,
        result.tension,
        result.total
    );
    println!();
    for aspect in result.aspects.iter().take(10) {
        println!(
            "  {:?} {:?} {:?} (orb {:.2}°, score {:.2})",
            aspect.from_point, aspect.aspect_type, aspect.to_point, aspect.orb, aspect.score
        );
    }
    if result.aspects.len() > 10 {
        println!("  ... and {} more", result.aspects.len() - 10);
    }
    Ok(())
}
