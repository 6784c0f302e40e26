//! CLI command definitions and handlers

mod bonus_cmd;
mod compat_cmd;
mod fortune;
mod profile;
mod synastry;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use crate::models::{BirthDescriptor, CalendarType, EventType, Gender};

/// Parse and validate an hour argument (0-23).
fn parse_hour(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid hour", s))?;
    if n > 23 {
        Err("hour must be 0-23".to_string())
    } else {
        Ok(n)
    }
}

/// Sajuvise - dual-model favorability engine
///
/// Computes Saju four-pillar charts, Western natal charts, and explainable
/// favorability scores from a birth instant. All computation is local and
/// deterministic.
#[derive(Parser, Debug)]
#[command(name = "sajuvise")]
#[command(
    version,
    about = "Saju four-pillar and Western astrology engine with explainable favorability scoring",
    after_help = "\
Examples:
  sajuvise profile --date 1990-05-15 --time 10:30 --gender male
  sajuvise chart --date 1990-05-15 --time 10:30 --gender male --format json
  sajuvise fortune --date 1990-05-15 --gender male --from 2025 --to 2030
  sajuvise bonus --date 1990-05-15 --gender male --event marriage --year 2025 --month 6
  sajuvise timing --date 1990-05-15 --gender male --area career --from 2025 --to 2026"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Birth input shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct BirthArgs {
    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    /// Birth time, HH:MM (omit if unknown)
    #[arg(long)]
    pub time: Option<String>,

    /// Birth gender
    #[arg(long, value_parser = ["male", "female"])]
    pub gender: String,

    /// Calendar of the birth date
    #[arg(long, default_value = "solar", value_parser = ["solar", "lunar"])]
    pub calendar: String,

    /// Leap-month flag for lunar input
    #[arg(long, default_value_t = false)]
    pub leap_month: bool,

    /// IANA timezone of the birth place
    #[arg(long, default_value = "Asia/Seoul")]
    pub timezone: String,

    #[arg(long)]
    pub latitude: Option<f64>,

    #[arg(long)]
    pub longitude: Option<f64>,
}

impl BirthArgs {
    pub fn to_descriptor(&self) -> BirthDescriptor {
        BirthDescriptor {
            date: self.date.clone(),
            time: self.time.clone(),
            gender: if self.gender == "male" {
                Gender::Male
            } else {
                Gender::Female
            },
            calendar: if self.calendar == "lunar" {
                CalendarType::Lunar
            } else {
                CalendarType::Solar
            },
            leap_month: self.leap_month,
            timezone: self.timezone.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub(crate) fn parse_event(event: &str) -> Result<EventType> {
    Ok(match event {
        "marriage" => EventType::Marriage,
        "investment" => EventType::Investment,
        "move" => EventType::Move,
        "job_change" => EventType::JobChange,
        "business_open" => EventType::BusinessOpen,
        "exam" => EventType::Exam,
        "travel" => EventType::Travel,
        other => bail!("unknown event type '{other}'"),
    })
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the Saju profile (four pillars, element balance, daeun)
    Profile {
        #[command(flatten)]
        birth: BirthArgs,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Compute the Western natal chart
    Chart {
        #[command(flatten)]
        birth: BirthArgs,

        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Compare two charts' aspects and house overlays
    Synastry {
        #[command(flatten)]
        birth: BirthArgs,

        /// Partner birth date, YYYY-MM-DD
        #[arg(long)]
        partner_date: String,

        /// Partner birth time, HH:MM
        #[arg(long)]
        partner_time: Option<String>,

        /// Partner gender
        #[arg(long, value_parser = ["male", "female"])]
        partner_gender: String,

        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Simulate fortune flow, monthly breakdown, or life cycle
    Fortune {
        #[command(flatten)]
        birth: BirthArgs,

        /// First simulated year
        #[arg(long)]
        from: Option<i32>,

        /// Last simulated year
        #[arg(long)]
        to: Option<i32>,

        /// Single year for a monthly breakdown
        #[arg(long)]
        monthly: Option<i32>,

        /// Reference year for a life-cycle view
        #[arg(long)]
        lifecycle: Option<i32>,

        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Score an event window through the tier 7-10 bonus engine
    Bonus {
        #[command(flatten)]
        birth: BirthArgs,

        /// Event type
        #[arg(long, value_parser = ["marriage", "investment", "move", "job_change", "business_open", "exam", "travel"])]
        event: String,

        #[arg(long)]
        year: i32,

        #[arg(long)]
        month: u32,

        #[arg(long)]
        day: Option<u32>,

        /// Target hour 0-23, enabling the hourly tier
        #[arg(long, value_parser = parse_hour)]
        hour: Option<u32>,

        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Two-person ganhap and shinsal compatibility
    Compat {
        #[command(flatten)]
        birth: BirthArgs,

        #[arg(long)]
        partner_date: String,

        #[arg(long)]
        partner_time: Option<String>,

        #[arg(long, value_parser = ["male", "female"])]
        partner_gender: String,

        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Find the best time windows for a life area
    Timing {
        #[command(flatten)]
        birth: BirthArgs,

        /// Target area
        #[arg(long, value_parser = ["career", "wealth", "love", "health"])]
        area: String,

        #[arg(long)]
        from: i32,

        #[arg(long)]
        to: i32,

        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

/// Dispatch a parsed CLI invocation.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Profile { birth, format } => profile::run(&birth, &format),
        Commands::Chart { birth, format } => profile::run_chart(&birth, &format),
        Commands::Synastry {
            birth,
            partner_date,
            partner_time,
            partner_gender,
            format,
        } => synastry::run(&birth, &partner_date, partner_time.as_deref(), &partner_gender, &format),
        Commands::Fortune {
            birth,
            from,
            to,
            monthly,
            lifecycle,
            format,
        } => fortune::run(&birth, from, to, monthly, lifecycle, &format),
        Commands::Bonus {
            birth,
            event,
            year,
            month,
            day,
            hour,
            format,
        } => bonus_cmd::run(&birth, &event, year, month, day, hour, &format),
        Commands::Compat {
            birth,
            partner_date,
            partner_time,
            partner_gender,
            format,
        } => compat_cmd::run(&birth, &partner_date, partner_time.as_deref(), &partner_gender, &format),
        Commands::Timing {
            birth,
            area,
            from,
            to,
            format,
        } => fortune::run_timing(&birth, &area, from, to, &format),
    }
}
