mod cli;
mod manifest;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use fm_core::FmError;
use manifest::Outcome;

fn default_out_path(aux: &std::path::Path) -> PathBuf {
    let stem = aux
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "result".to_string());
    PathBuf::from("results").join(format!("{stem}.part"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mode: fm_algo::Mode = cli.mode.into();
    let out = cli.out.clone().unwrap_or_else(|| default_out_path(&cli.aux));

    info!(aux = %cli.aux.display(), mode = ?cli.mode, cap = cli.cap, "loading circuit");
    let (circuit, diagnostics) = match fm_io::load_circuit(&cli.aux) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("failed to load circuit: {err}");
            return ExitCode::from(1);
        }
    };
    for issue in diagnostics.issues() {
        match issue.severity {
            fm_core::Severity::Warning => tracing::warn!("{issue}"),
            fm_core::Severity::Error => error!("{issue}"),
        }
    }

    if cli.summary {
        println!("{}", fm_io::output::format_circuit_summary(&circuit));
    }

    match fm_algo::driver::run(&circuit, mode, cli.cap) {
        Ok(result) => {
            info!(
                cut_size = result.cut_size,
                passes_run = result.passes_run,
                "partition complete"
            );
            if let Err(err) = fm_io::output::write_partition_result(&out, &result) {
                error!("failed to write partition result: {err}");
                return ExitCode::from(3);
            }
            if let Some(dir) = &cli.manifest_dir {
                let outcome = Outcome::Partitioned {
                    cut_size: result.cut_size,
                    passes_run: result.passes_run,
                };
                if let Err(err) = manifest::record_manifest(
                    dir,
                    &cli.aux.display().to_string(),
                    &format!("{:?}", cli.mode).to_lowercase(),
                    cli.cap,
                    &out.display().to_string(),
                    outcome,
                ) {
                    error!("failed to record run manifest: {err}");
                }
            }
            ExitCode::from(0)
        }
        Err(partition_err) => {
            let fm_err: FmError = partition_err.into();
            error!("partition infeasible: {fm_err}");
            let message = fm_err.to_string();
            if let Err(err) = fm_io::output::write_infeasible_diagnostic(&out, &message) {
                error!("failed to write infeasibility diagnostic: {err}");
                return ExitCode::from(3);
            }
            if let Some(dir) = &cli.manifest_dir {
                let outcome = Outcome::Infeasible {
                    message: message.clone(),
                };
                if let Err(err) = manifest::record_manifest(
                    dir,
                    &cli.aux.display().to_string(),
                    &format!("{:?}", cli.mode).to_lowercase(),
                    cli.cap,
                    &out.display().to_string(),
                    outcome,
                ) {
                    error!("failed to record run manifest: {err}");
                }
            }
            ExitCode::from(2)
        }
    }
}
