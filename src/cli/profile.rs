//! `profile` and `chart` command handlers

use anyhow::Result;
use console::style;

use crate::calendar::compute_profile;
use crate::cli::BirthArgs;
use crate::western::compute_chart;

pub(crate) fn run(birth: &BirthArgs, format: &str) -> Result<()> {
    let profile = compute_profile(&birth.to_descriptor())?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{}", style("Four Pillars").bold());
    for (position, pillar) in profile.pillars.iter() {
        let sibsin = pillar
            .stem
            .sibsin
            .map(|s| s.korean())
            .unwrap_or("-");
        println!(
            "  {:?}: {} ({} / {})",
            position,
            pillar.ganzhi_name(),
            pillar.stem.element,
            sibsin
        );
    }

    println!();
    println!(
        "Day master: {} ({})",
        profile.day_master,
        profile.day_master.element()
    );
    println!("Pattern: {}", profile.geokguk.korean());

    let counts = profile.five_element_counts;
    println!(
        "Elements: wood {} / fire {} / earth {} / metal {} / water {}",
        counts.wood, counts.fire, counts.earth, counts.metal, counts.water
    );
    println!(
        "Favorable: {:?}  Unfavorable: {:?}",
        profile.yongsin, profile.kisin
    );

    println!();
    println!(
        "{} (from age {}, {:?})",
        style("Daeun").bold(),
        profile.daeun_start_age,
        profile.daeun_direction
    );
    for cycle in &profile.daeun_cycles {
        println!(
            "  {}-{}: {}{} ({})",
            cycle.start_age,
            cycle.end_age,
            cycle.stem,
            cycle.branch,
            cycle.sibsin.korean()
        );
    }

    Ok(())
}

pub(crate) fn run_chart(birth: &BirthArgs, format: &str) -> Result<()> {
    let chart = compute_chart(&birth.to_descriptor())?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    println!("{} {:?}", style("Sun sign:").bold(), chart.sun_sign);
    println!();
    for planet in &chart.planets {
        println!(
            "  {:?}: {:.2}° ({:?})",
            planet.point, planet.longitude, planet.sign
        );
    }
    println!();
    println!("Ascendant: {:.2}°  MC: {:.2}°", chart.ascendant, chart.mc);
    Ok(())
}
