//! Command-line argument surface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Two-way min-cut hypergraph partitioning of a circuit netlist via
/// Fiduccia–Mattheyses, subject to a per-partition capacity bound.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Bookshelf-style `.aux` file naming the `.nodes`/`.nets`
    /// files to load.
    pub aux: PathBuf,

    /// Which quantity the capacity bound is measured in.
    #[arg(long, value_enum, default_value_t = ModeArg::Num)]
    pub mode: ModeArg,

    /// Capacity bound per partition (area units in `area` mode, cell count
    /// in `num` mode).
    #[arg(long)]
    pub cap: u64,

    /// Where to write the partition report. Defaults to
    /// `results/<aux-file-stem>.part`, matching this tool's original
    /// convention.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print a summary of the parsed circuit before partitioning.
    #[arg(long)]
    pub summary: bool,

    /// Logging verbosity.
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Directory to record a JSON run manifest in (run id, params, outcome).
    /// No manifest is written if omitted.
    #[arg(long)]
    pub manifest_dir: Option<PathBuf>,
}

/// The `--mode` argument: mirrors [`fm_algo::Mode`], kept separate so the
/// CLI layer owns its own `clap::ValueEnum` impl rather than leaking
/// `clap` into `fm-algo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Area,
    Num,
}

impl From<ModeArg> for fm_algo::Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Area => fm_algo::Mode::Area,
            ModeArg::Num => fm_algo::Mode::Num,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_arg_maps_to_algo_mode() {
        assert_eq!(fm_algo::Mode::from(ModeArg::Area), fm_algo::Mode::Area);
        assert_eq!(fm_algo::Mode::from(ModeArg::Num), fm_algo::Mode::Num);
    }

    #[test]
    fn parses_minimal_invocation() {
        let cli = Cli::parse_from(["fm-cli", "case.aux", "--cap", "10"]);
        assert_eq!(cli.aux, PathBuf::from("case.aux"));
        assert_eq!(cli.cap, 10);
        assert_eq!(cli.mode, ModeArg::Num);
    }
}
