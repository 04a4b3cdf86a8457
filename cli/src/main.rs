mod args;
mod logging;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use bagit_core::digest::DigestAlg;
use bagit_core::metadata::BagInfo;
use bagit_core::{BagBuilder, BagReport};
use clap::Parser;
use tracing::info;

use args::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(args.quiet, args.log.as_deref()) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    let bag_info = args.bag_info.to_bag_info();
    let algorithms = args.algorithms();

    // Each directory is independent: a failure does not stop the next one.
    let mut failed = 0usize;
    for dir in &args.directories {
        match bag_directory(dir, &bag_info, &algorithms, args.processes) {
            Ok(report) => info!(
                path = %report.root.display(),
                oxum = %report.oxum,
                elapsed_ms = report.telemetry.elapsed.as_millis() as u64,
                "done"
            ),
            Err(e) => {
                eprintln!("Error: {e:#}");
                failed += 1;
            }
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn bag_directory(
    dir: &Path,
    bag_info: &BagInfo,
    algorithms: &[DigestAlg],
    processes: usize,
) -> anyhow::Result<BagReport> {
    BagBuilder::new(dir)
        .metadata(bag_info.clone())
        .workers(processes)
        .algorithms(algorithms)
        .build()
        .with_context(|| format!("cannot bag {}", dir.display()))
}
