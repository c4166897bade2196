use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mixstack",
    about = "Merge native and script stack snapshots into one call stack",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge a snapshot pair read from a JSON file
    Merge(MergeArgs),
    /// Merge and render a built-in example stack
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// JSON file with `native` and `script` frame arrays
    pub snapshot: PathBuf,
    /// TOML file with merge configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Trampoline function name (repeatable; overrides the config file)
    #[arg(long = "marker")]
    pub markers: Vec<String>,
    /// Do not print script-frame locals
    #[arg(long)]
    pub no_locals: bool,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Do not print script-frame locals
    #[arg(long)]
    pub no_locals: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_merge() {
        let cli = Cli::try_parse_from(["mixstack", "merge", "stacks.json"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.snapshot, PathBuf::from("stacks.json"));
            assert!(args.config.is_none());
            assert!(args.markers.is_empty());
            assert!(!args.no_locals);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_with_markers() {
        let cli = Cli::try_parse_from([
            "mixstack", "merge", "s.json",
            "--marker", "PyEval_EvalFrameDefault",
            "--marker", "_PyEval_EvalFrameDefault",
        ]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.markers, vec!["PyEval_EvalFrameDefault", "_PyEval_EvalFrameDefault"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_with_config() {
        let cli = Cli::try_parse_from(["mixstack", "merge", "s.json", "--config", "merge.toml", "--no-locals"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("merge.toml")));
            assert!(args.no_locals);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn merge_requires_snapshot() {
        assert!(Cli::try_parse_from(["mixstack", "merge"]).is_err());
    }

    #[test]
    fn parse_demo() {
        let cli = Cli::try_parse_from(["mixstack", "demo"]).unwrap();
        assert!(matches!(cli.command, Command::Demo(_)));
    }

    #[test]
    fn no_locals_flags_are_documented() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        for name in ["merge", "demo"] {
            let sub = cmd.find_subcommand(name).unwrap();
            let arg = sub.get_arguments().find(|a| a.get_id() == "no_locals").unwrap();
            assert!(arg.get_help().is_some(), "{name} --no-locals has no help text");
        }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["mixstack", "demo", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
