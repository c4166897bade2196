use anyhow::Context;
use colored::Colorize;
use mixstack_merge::{MergeConfig, MergeEngine, MergeReport};
use tracing::{debug, info};

use crate::cli::*;
use crate::render::render_report;
use crate::snapshot::Snapshot;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args)?;
    let snapshot = Snapshot::load(&args.snapshot)?;
    info!(
        path = %args.snapshot.display(),
        native = snapshot.native.len(),
        script = snapshot.script.len(),
        "loaded snapshot"
    );
    let report = engine.merge_with_report(&snapshot.script, &snapshot.native);
    print_report(&report, !args.no_locals);
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    println!("Call chain: main() -> PyEval -> run() -> PyEval -> process() -> native_func()");
    println!();
    let demo = Snapshot::demo();
    let report = MergeEngine::default().merge_with_report(&demo.script, &demo.native);
    print_report(&report, !args.no_locals);
    Ok(())
}

/// Command-line markers win over the config file, which wins over defaults.
fn build_engine(args: &MergeArgs) -> anyhow::Result<MergeEngine> {
    let config = if !args.markers.is_empty() {
        MergeConfig::with_markers(args.markers.iter().cloned())
    } else if let Some(path) = &args.config {
        MergeConfig::load(path)?
    } else {
        MergeConfig::default()
    };
    let engine = MergeEngine::from_config(&config).context("invalid merge configuration")?;
    debug!(markers = ?config.markers, "merge engine ready");
    Ok(engine)
}

fn print_report(report: &MergeReport, show_locals: bool) {
    print!("{}", render_report(report, show_locals));
    if report.unmatched_markers > 0 {
        println!(
            "{} {} trampoline frame(s) had no script frame; kept as native",
            "!".yellow().bold(),
            report.unmatched_markers
        );
    }
}
