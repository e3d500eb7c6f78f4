//! mk_design - group design matrix CLI
//!
//! Builds FSL-compatible design matrices from a subject covariate table and
//! writes matching inclusion/exclusion lists plus an all-info record.

use clap::{ArgAction, Parser};
use mk_design::data::Separator;
use mk_design::error::Result;
use mk_design::pipeline::{run_config, DesignConfig};
use std::path::PathBuf;

/// Create FSL compatible design matrices (as text files).
///
/// Writes the matrix to `<PREFIX>`, plus `<PREFIX>.incl.txt`, `<PREFIX>.excl.txt` and
/// `<PREFIX>.all_info.txt`. Quoted lists must not contain spaces
/// (e.g. "sub-001,sub-002,sub-003").
#[derive(Parser)]
#[command(name = "mk_design")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input TSV or CSV file with headers; the first column holds subject IDs
    #[arg(short = 'i', long = "in", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output prefix
    #[arg(short = 'o', long = "out", value_name = "PREFIX")]
    prefix: Option<PathBuf>,

    /// File or comma separated list of subjects (IDs or row indices) to remove
    #[arg(long, value_name = "STR", conflicts_with = "ret_list")]
    rm_list: Option<String>,

    /// File or comma separated list of subjects (IDs or row indices) to retain
    #[arg(long, value_name = "STR")]
    ret_list: Option<String>,

    /// File or comma separated list of covariate column indices to retain
    /// (0 is the first column after the subject ID)
    #[arg(long, value_name = "STR")]
    ret_cols: Option<String>,

    /// File or comma separated list of covariate column indices to demean;
    /// the columns must be numeric and retained
    #[arg(long, value_name = "STR")]
    demean: Option<String>,

    /// Keep subjects with missing data in the retained columns
    #[arg(long)]
    keep_nan: bool,

    /// Output separator: space, tab or comma [default: space]
    #[arg(long, value_name = "SEP")]
    sep: Option<Separator>,

    /// Input separator: space, tab or comma [default: detected]
    #[arg(long, value_name = "SEP")]
    in_sep: Option<Separator>,

    /// YAML configuration file; command-line options override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> DesignConfig {
        DesignConfig {
            input: self.input.clone(),
            prefix: self.prefix.clone(),
            rm_list: self.rm_list.clone(),
            ret_list: self.ret_list.clone(),
            ret_cols: self.ret_cols.clone(),
            demean: self.demean.clone(),
            keep_nan: self.keep_nan,
            in_sep: self.in_sep,
            sep: self.sep,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            log::info!("Loading configuration from {:?}", path);
            DesignConfig::from_yaml_file(path)?.merge(cli.overrides())
        }
        None => cli.overrides(),
    };

    let outcome = run_config(&config)?;
    eprint!("{}", outcome);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_lists_conflict() {
        let err = Cli::try_parse_from([
            "mk_design",
            "-i",
            "in.tsv",
            "-o",
            "out",
            "--rm-list",
            "sub-001",
            "--ret-list",
            "sub-002",
        ])
        .err()
        .unwrap();

        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_separator_flags() {
        let cli = Cli::try_parse_from(["mk_design", "--sep", "tab", "--in-sep", ","]).unwrap();

        assert_eq!(cli.sep, Some(Separator::Tab));
        assert_eq!(cli.in_sep, Some(Separator::Comma));
        assert!(Cli::try_parse_from(["mk_design", "--sep", "pipe"]).is_err());
    }

    #[test]
    fn test_overrides_win_over_config() {
        let cli = Cli::try_parse_from(["mk_design", "-o", "cli", "--keep-nan", "-vv"]).unwrap();
        let file = DesignConfig::from_yaml("input: data.tsv\nprefix: file\nsep: comma\n").unwrap();

        let config = file.merge(cli.overrides());

        assert_eq!(cli.verbose, 2);
        assert_eq!(config.input, Some(PathBuf::from("data.tsv")));
        assert_eq!(config.prefix, Some(PathBuf::from("cli")));
        assert_eq!(config.sep, Some(Separator::Comma));
        assert!(config.keep_nan);
    }
}
