//! ClinVar table joiner
//!
//! Merges ClinVar's variant summary with the grouped per-allele table,
//! re-derives the consensus pathogenicity classification and the gold-star
//! review score, and writes one combined gzipped table.

use clap::Parser;
use config::ArgCheck;
use log::{error, info, Level};
use simple_logger::init_with_level;

use cv_join::cli::Args;
use cv_join::core::join_variant_summary_with_clinvar_alleles;

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).unwrap();

    let args: Args = Args::parse();

    args.check().unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let _ = join_variant_summary_with_clinvar_alleles(args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}
