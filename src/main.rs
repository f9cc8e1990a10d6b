//! RustPace - Environmental pace adjustment and training analytics
//!
//! Command-line entry point. Every subcommand prints its result as JSON on
//! stdout; logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rustpace::config::{self, EngineConfig};
use rustpace::environment::{AltitudeModel, HeatModel, WindModel};
use rustpace::metrics::{HrZones, LactateSample, PaceZones, WellnessCheckIn};
use rustpace::{
    EnvironmentCalculator, EnvironmentalConditions, Intensity, LactateAnalyzer, PacingPlanner,
    PacingStrategy, ReadinessCalculator, TrainingLoadCalculator,
};

/// Environmental pace adjustment and training analytics
#[derive(Parser, Debug)]
#[clap(name = "rustpace", version)]
struct Cli {
    /// Alternative configuration file
    #[clap(long, global = true, value_name = "FILE", env = "RUSTPACE_CONFIG")]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Heat stress index (WBGT approximation)
    Heat {
        /// Air temperature (°C)
        #[clap(long, allow_hyphen_values = true)]
        temp: f64,
        /// Relative humidity (0-100)
        #[clap(long)]
        humidity: f64,
        /// Dew point (°C)
        #[clap(long, allow_hyphen_values = true)]
        dew_point: f64,
        /// Athlete is heat acclimated
        #[clap(long)]
        acclimated: bool,
    },
    /// Pace slowdown for a heat stress index
    PaceAdjust {
        /// Heat stress index
        #[clap(long, allow_hyphen_values = true)]
        index: f64,
        /// Athlete is heat acclimated
        #[clap(long)]
        acclimated: bool,
    },
    /// Altitude slowdown
    Altitude {
        /// Altitude (m)
        #[clap(long, allow_hyphen_values = true)]
        altitude: f64,
        /// Days spent at altitude
        #[clap(long, default_value = "0")]
        days: u32,
        /// Workout intensity (recovery, endurance, tempo, threshold, interval)
        #[clap(long, default_value = "tempo")]
        intensity: Intensity,
    },
    /// Wind resistance for a runner
    Wind {
        /// Wind speed (m/s)
        #[clap(long)]
        speed: f64,
        /// Heading the wind blows towards (degrees)
        #[clap(long)]
        direction: f64,
        /// Heading of the runner (degrees)
        #[clap(long)]
        runner_direction: f64,
        /// Runner speed (m/s)
        #[clap(long)]
        runner_speed: f64,
    },
    /// Combined heat, altitude and wind assessment from a JSON conditions file
    Conditions {
        /// JSON file with the session conditions
        #[clap(long, value_name = "FILE")]
        file: PathBuf,
        /// Workout intensity
        #[clap(long, default_value = "tempo")]
        intensity: Intensity,
        /// Runner speed (m/s)
        #[clap(long)]
        runner_speed: f64,
        /// Planned pace (s/km) to adjust
        #[clap(long)]
        pace: Option<f64>,
    },
    /// Training load history and ACWR from a JSON list of dated loads
    Acwr {
        /// JSON file: [{"date": "2024-03-01", "load": 300.0}, ...]
        #[clap(long, value_name = "FILE")]
        file: PathBuf,
    },
    /// Readiness score from a JSON wellness check-in
    Readiness {
        /// JSON file with the check-in
        #[clap(long, value_name = "FILE")]
        check_in: PathBuf,
        /// Optional JSON load history used to penalise load spikes
        #[clap(long, value_name = "FILE")]
        loads: Option<PathBuf>,
    },
    /// Pacing plan for a race
    Pacing {
        /// Race distance (m)
        #[clap(long)]
        distance: f64,
        /// Goal time (s)
        #[clap(long)]
        goal_time: f64,
        /// Split length (m)
        #[clap(long, default_value = "1000")]
        split: f64,
        /// Pacing strategy
        #[clap(long, value_enum, default_value = "even")]
        strategy: StrategyArg,
        /// Start-to-finish pace difference for uneven strategies (%)
        #[clap(long, default_value = "2")]
        percent: f64,
        /// Environmental slowdown to apply (%)
        #[clap(long, allow_hyphen_values = true)]
        adjust: Option<f64>,
    },
    /// Lactate threshold estimation
    Lactate {
        #[clap(subcommand)]
        method: LactateCommand,
    },
    /// Heart rate and pace zones
    Zones {
        /// Lactate threshold heart rate (bpm)
        #[clap(long)]
        lthr: Option<u16>,
        /// Threshold pace (s/km)
        #[clap(long)]
        threshold_pace: Option<f64>,
    },
    /// Show or write the configuration
    Config {
        /// Write the effective configuration to this file
        #[clap(long, value_name = "FILE")]
        write: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum LactateCommand {
    /// Incremental step test from a JSON list of stages
    Step {
        /// JSON file: [{"speed_mps": 3.0, "heart_rate": 130, "lactate_mmol": 1.2}, ...]
        #[clap(long, value_name = "FILE")]
        file: PathBuf,
    },
    /// 30-minute time trial
    TimeTrial {
        /// Average heart rate of the last 20 minutes (bpm)
        #[clap(long)]
        hr: f64,
        /// Average pace (s/km)
        #[clap(long)]
        pace: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Even,
    Negative,
    Positive,
}

/// One dated load entry in a load history file.
#[derive(Debug, Deserialize)]
struct LoadEntry {
    date: NaiveDate,
    load: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("failed to load configuration")?;

    tracing::debug!("Starting RustPace v{}", env!("CARGO_PKG_VERSION"));
    run(cli.command, &config)
}

fn run(command: Command, config: &EngineConfig) -> Result<()> {
    match command {
        Command::Heat {
            temp,
            humidity,
            dew_point,
            acclimated,
        } => {
            let model = HeatModel::new(config.heat.clone())?;
            let index = model.heat_stress_index(temp, humidity, dew_point)?;
            let adjustment = model.pace_adjustment(index, acclimated)?;
            emit(&adjustment)
        }
        Command::PaceAdjust { index, acclimated } => {
            let model = HeatModel::new(config.heat.clone())?;
            emit(&model.pace_adjustment(index, acclimated)?)
        }
        Command::Altitude {
            altitude,
            days,
            intensity,
        } => {
            let percent = AltitudeModel::new(config.altitude.clone())?.adjustment(altitude, days, intensity)?;
            emit(&serde_json::json!({
                "altitude_m": altitude,
                "acclimatization_days": days,
                "intensity": intensity,
                "slowdown_percent": percent,
            }))
        }
        Command::Wind {
            speed,
            direction,
            runner_direction,
            runner_speed,
        } => {
            let impact = WindModel::new(config.wind.clone())?.resistance(
                speed,
                direction,
                runner_direction,
                runner_speed,
            )?;
            emit(&impact)
        }
        Command::Conditions {
            file,
            intensity,
            runner_speed,
            pace,
        } => {
            let conditions: EnvironmentalConditions = read_json(&file)?;
            let assessment =
                EnvironmentCalculator::from_config(config)?.assess(&conditions, intensity, runner_speed)?;
            let adjusted_pace = pace.map(|p| assessment.adjusted_pace(p));
            emit(&serde_json::json!({
                "assessment": assessment,
                "adjusted_pace_sec_per_km": adjusted_pace,
            }))
        }
        Command::Acwr { file } => {
            let calc = TrainingLoadCalculator::from_settings(config.training_load.clone())?;
            emit(&calc.report(&read_loads(&file)?)?)
        }
        Command::Readiness { check_in, loads } => {
            let check_in: WellnessCheckIn = read_json(&check_in)?;
            let acwr = match loads {
                Some(path) => {
                    let calc = TrainingLoadCalculator::from_settings(config.training_load.clone())?;
                    calc.report(&read_loads(&path)?)?.current()
                }
                None => None,
            };
            let score = ReadinessCalculator::new().score(&check_in, acwr)?;
            let recommendation = score.status.recommendation();
            emit(&serde_json::json!({
                "readiness": score,
                "recommendation": recommendation,
            }))
        }
        Command::Pacing {
            distance,
            goal_time,
            split,
            strategy,
            percent,
            adjust,
        } => {
            let strategy = match strategy {
                StrategyArg::Even => PacingStrategy::Even,
                StrategyArg::Negative => PacingStrategy::NegativeSplit { percent },
                StrategyArg::Positive => PacingStrategy::PositiveSplit { percent },
            };
            let mut plan = PacingPlanner::new().plan(distance, goal_time, split, strategy)?;
            if let Some(adjust) = adjust {
                plan = plan.with_adjustment(adjust)?;
            }
            emit(&plan)
        }
        Command::Lactate { method } => {
            let thresholds = match method {
                LactateCommand::Step { file } => {
                    LactateAnalyzer::from_step_test(&read_json::<Vec<LactateSample>>(&file)?)?
                }
                LactateCommand::TimeTrial { hr, pace } => LactateAnalyzer::from_time_trial(hr, pace)?,
            };
            emit(&thresholds)
        }
        Command::Zones {
            lthr,
            threshold_pace,
        } => {
            if lthr.is_none() && threshold_pace.is_none() {
                anyhow::bail!("provide --lthr and/or --threshold-pace");
            }
            let hr = lthr.map(HrZones::from_lthr).transpose()?;
            let pace = threshold_pace.map(PaceZones::from_threshold_pace).transpose()?;
            emit(&serde_json::json!({ "heart_rate": hr, "pace": pace }))
        }
        Command::Config { write } => {
            if let Some(path) = write {
                config::save_config(config, &path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), "configuration written");
            }
            emit(config)
        }
    }
}

fn read_loads(path: &Path) -> Result<Vec<(NaiveDate, f64)>> {
    let entries: Vec<LoadEntry> = read_json(path)?;
    Ok(entries.into_iter().map(|e| (e.date, e.load)).collect())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn emit<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
