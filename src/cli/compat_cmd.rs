//! `compat` command handler

use anyhow::Result;
use console::style;
use serde_json::json;

use crate::calendar::compute_profile;
use crate::cli::BirthArgs;
use crate::compat::{analyze_ganhap, analyze_shinsals};

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

    let profile_a = compute_profile(&birth.to_descriptor())?;
    let profile_b = compute_profile(&partner.to_descriptor())?;

    let ganhap = analyze_ganhap(&profile_a, &profile_b);
    let shinsal = analyze_shinsals(&profile_a, &profile_b);

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "ganhap": ganhap,
                "shinsal": shinsal,
            }))?
        );
        return Ok(());
    }

    println!(
        "{} {}/100 — {}",
        style("Stem harmony:").bold(),
        ganhap.harmony,
        ganhap.message
    );
    for combo in &ganhap.combinations {
        println!(
            "  {}+{} → {} ({:?}/{:?})",
            combo.stem1, combo.stem2, combo.result_element, combo.pillar1, combo.pillar2
        );
    }

    println!();
    println!(
        "{} {:?}",
        style("Star interactions:").bold(),
        shinsal.overall_impact
    );
    for line in &shinsal.lucky_interactions {
        println!("  + {line}");
    }
    for line in &shinsal.unlucky_interactions {
        println!("  - {line}");
    }
    Ok(())
}
