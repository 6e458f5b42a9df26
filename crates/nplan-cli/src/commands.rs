use std::fs;

use anyhow::Context;
use colored::Colorize;

use nplan_gate::{
    run_plan, EmptyTaskPolicy, GateConfig, PlanEvent, PlanGate, PlanReporter, RecordingReporter,
    Severity, TracingReporter, UnrecognizedPolicy,
};

use crate::cli::*;
use crate::source::FilePlanSource;

/// Runs the selected command. `Ok(false)` means the deployment must not
/// proceed.
pub fn run_command(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Check(args) => cmd_check(config, args, &cli.format),
        Command::Config(_) => cmd_config(&config),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<GateConfig> {
    let Some(path) = &cli.config else {
        return Ok(GateConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    GateConfig::from_toml_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

/// Logs every event and keeps a copy for the summary.
struct TeeReporter {
    log: TracingReporter,
    recorded: RecordingReporter,
}

impl PlanReporter for TeeReporter {
    fn report(&mut self, event: PlanEvent) {
        self.log.report(event.clone());
        self.recorded.report(event);
    }
}

fn cmd_check(mut config: GateConfig, args: CheckArgs, format: &OutputFormat) -> anyhow::Result<bool> {
    if args.skip_empty_tasks {
        config.empty_task = EmptyTaskPolicy::SkipTask;
    }
    if args.allow_unrecognized {
        config.unrecognized = UnrecognizedPolicy::Proceed;
    }

    let gate = PlanGate::new(config);
    let source = FilePlanSource::new(&args.plan, args.bare_diff);
    let mut reporter = TeeReporter {
        log: TracingReporter,
        recorded: RecordingReporter::new(),
    };

    let proceed = run_plan(&gate, &source, &mut reporter);
    let events = reporter.recorded.into_events();

    match format {
        OutputFormat::Text => print_verdict(proceed, &events),
        OutputFormat::Json => println!("{}", render_json(proceed, &events)?),
    }

    Ok(proceed)
}

fn print_verdict(proceed: bool, events: &[PlanEvent]) {
    let changes = events
        .iter()
        .filter(|e| matches!(e, PlanEvent::FieldChanged(_)))
        .count();
    if proceed {
        println!("{} Deployment may proceed ({} field changes)", "✓".green().bold(), changes.to_string().bold());
    } else {
        println!("{} Deployment halted", "✗".red().bold());
    }
}

fn render_json(proceed: bool, events: &[PlanEvent]) -> anyhow::Result<String> {
    let events: Vec<_> = events
        .iter()
        .map(|e| {
            let level = match e.severity() {
                Severity::Info => "info",
                Severity::Error => "error",
            };
            serde_json::json!({ "level": level, "message": e.to_string() })
        })
        .collect();
    let summary = serde_json::json!({ "proceed": proceed, "events": events });
    Ok(serde_json::to_string_pretty(&summary)?)
}

fn cmd_config(config: &GateConfig) -> anyhow::Result<bool> {
    print!("{}", config.to_toml_string()?);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn check(plan: &tempfile::NamedTempFile, extra: &[&str]) -> bool {
        let path = plan.path().to_str().unwrap();
        let mut argv = vec!["nplan", "check", path];
        argv.extend_from_slice(extra);
        run_command(Cli::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn added_job_exits_success() {
        let plan = write_temp(r#"{"Diff": {"Type": "Added", "ID": "web"}}"#);
        assert!(check(&plan, &[]));
    }

    #[test]
    fn unchanged_job_exits_failure() {
        let plan = write_temp(r#"{"Diff": {"Type": "None", "ID": "web"}}"#);
        assert!(!check(&plan, &[]));
    }

    #[test]
    fn unrecognized_type_respects_override() {
        let plan = write_temp(r#"{"Type": "Moved", "ID": "web"}"#);
        assert!(!check(&plan, &["--bare-diff"]));
        assert!(check(&plan, &["--bare-diff", "--allow-unrecognized"]));
    }

    #[test]
    fn config_file_is_applied() {
        let config = write_temp("unrecognized = \"proceed\"\n");
        let plan = write_temp(r#"{"Type": "Moved", "ID": "web"}"#);
        let argv = [
            "nplan",
            "--config",
            config.path().to_str().unwrap(),
            "check",
            "--bare-diff",
            plan.path().to_str().unwrap(),
        ];
        assert!(run_command(Cli::try_parse_from(argv).unwrap()).unwrap());
    }

    #[test]
    fn bad_config_file_is_an_error() {
        let config = write_temp("unrecognized = 3\n");
        let cli = Cli::try_parse_from(["nplan", "--config", config.path().to_str().unwrap(), "config"])
            .unwrap();
        assert!(run_command(cli).is_err());
    }

    #[test]
    fn json_summary_lists_events() {
        let rendered = render_json(false, &[PlanEvent::NoChanges]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["proceed"], false);
        assert_eq!(value["events"][0]["level"], "error");
        assert_eq!(value["events"][0]["message"], "no changes detected for job");
    }

    #[test]
    fn tee_reporter_records_what_it_logs() {
        let mut tee = TeeReporter {
            log: TracingReporter,
            recorded: RecordingReporter::new(),
        };
        tee.report(PlanEvent::NewJob);
        assert_eq!(tee.recorded.events(), [PlanEvent::NewJob]);
    }
}
