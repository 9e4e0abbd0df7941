//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use conquest_core::commands::PlayerCommand;
use conquest_core::enums::Difficulty;
use conquest_core::types::PlanetId;

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless planetary conquest simulation", long_about = None)]
pub struct CliArgs {
    /// TOML file with rule overrides; unspecified fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// TOML scenario. The built-in skirmish map is used when absent.
    #[arg(long, value_name = "PATH")]
    pub scenario: Option<PathBuf>,
    /// Bot difficulty for the built-in skirmish map.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Medium)]
    pub difficulty: DifficultyArg,
    /// Seed for the simulation's random number generator.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Maximum number of ticks to run.
    #[arg(long, default_value_t = 36_000)]
    pub ticks: u64,
    /// Pace ticks in wall-clock time on the game loop thread.
    #[arg(long)]
    pub realtime: bool,
    /// Speed multiplier for realtime runs.
    #[arg(long, value_name = "SCALE", default_value_t = 1.0)]
    pub time_scale: f64,
    /// Opening player order FROM:TO, toggling a targeting edge. Repeatable.
    #[arg(long = "target", value_name = "FROM:TO")]
    pub targets: Vec<TargetArg>,
    /// Print the final snapshot as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Commands queued before the first tick: start, then the opening orders.
    pub fn opening_commands(&self) -> Vec<PlayerCommand> {
        std::iter::once(PlayerCommand::StartMatch)
            .chain(self.targets.iter().map(|t| PlayerCommand::ToggleTarget {
                from: t.from,
                to: t.to,
            }))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Extreme => Difficulty::Extreme,
        }
    }
}

/// A targeting edge parsed from a FROM:TO argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetArg {
    pub from: PlanetId,
    pub to: PlanetId,
}

impl FromStr for TargetArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (from, to) = value
            .split_once(':')
            .ok_or_else(|| "expected format FROM:TO".to_string())?;

        let from = from
            .trim()
            .parse::<u32>()
            .map_err(|error| format!("invalid source planet: {error}"))?;
        let to = to
            .trim()
            .parse::<u32>()
            .map_err(|error| format!("invalid target planet: {error}"))?;

        if from == to {
            return Err("a planet cannot target itself".to_string());
        }

        Ok(Self {
            from: PlanetId(from),
            to: PlanetId(to),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_arg_parsing() {
        assert_eq!(
            "0:4".parse::<TargetArg>(),
            Ok(TargetArg {
                from: PlanetId(0),
                to: PlanetId(4),
            })
        );
        assert!("3".parse::<TargetArg>().is_err());
        assert!("a:1".parse::<TargetArg>().is_err());
        assert!("2:2".parse::<TargetArg>().is_err());
    }

    #[test]
    fn test_cli_defaults_and_orders() {
        let args = CliArgs::parse_from(["conquest-app", "--target", "0:4", "--target", "1:5"]);
        assert_eq!(args.seed, 42);
        assert!(!args.realtime);
        assert_eq!(Difficulty::from(args.difficulty), Difficulty::Medium);

        let commands = args.opening_commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], PlayerCommand::StartMatch);
        assert_eq!(
            commands[2],
            PlayerCommand::ToggleTarget {
                from: PlanetId(1),
                to: PlanetId(5),
            }
        );
    }

    #[test]
    fn test_cli_difficulty_value() {
        let args = CliArgs::parse_from(["conquest-app", "--difficulty", "extreme", "--realtime"]);
        assert_eq!(args.difficulty, DifficultyArg::Extreme);
        assert!(args.realtime);
    }
}
