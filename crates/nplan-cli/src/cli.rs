use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nplan",
    about = "nplan — pre-deployment plan gate for scheduler jobs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Gate configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decide whether a planned job change should be deployed
    Check(CheckArgs),
    /// Print the effective gate configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Plan response JSON file, or `-` for stdin
    pub plan: String,
    /// The input is a bare job diff rather than a full plan response
    #[arg(long)]
    pub bare_diff: bool,
    /// Keep reporting past edited tasks that carry no object diffs
    #[arg(long)]
    pub skip_empty_tasks: bool,
    /// Proceed when the job diff type is not recognized
    #[arg(long)]
    pub allow_unrecognized: bool,
}

#[derive(Args)]
pub struct ConfigArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["nplan", "check", "plan.json"]).unwrap();
        if let Command::Check(args) = cli.command {
            assert_eq!(args.plan, "plan.json");
            assert!(!args.bare_diff);
            assert!(!args.skip_empty_tasks);
            assert!(!args.allow_unrecognized);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_check_stdin_bare() {
        let cli = Cli::try_parse_from(["nplan", "check", "--bare-diff", "-"]).unwrap();
        if let Command::Check(args) = cli.command {
            assert_eq!(args.plan, "-");
            assert!(args.bare_diff);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_check_overrides() {
        let cli = Cli::try_parse_from([
            "nplan", "check", "--skip-empty-tasks", "--allow-unrecognized", "p.json",
        ])
        .unwrap();
        if let Command::Check(args) = cli.command {
            assert!(args.skip_empty_tasks);
            assert!(args.allow_unrecognized);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn check_requires_plan() {
        assert!(Cli::try_parse_from(["nplan", "check"]).is_err());
    }

    #[test]
    fn parse_config() {
        let cli = Cli::try_parse_from(["nplan", "--config", "gate.toml", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config(_)));
        assert_eq!(cli.config, Some(PathBuf::from("gate.toml")));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["nplan", "-v", "check", "p.json"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["nplan", "check", "p.json", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
