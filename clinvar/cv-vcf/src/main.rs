//! ClinVar VCF exporter
//!
//! Reads a combined ClinVar table and writes VCF v4.1: meta headers,
//! per-column ##INFO declarations, contig lines from a FASTA index or a
//! baked-in genome build, then one record per table row.

use clap::Parser;
use config::ArgCheck;
use log::{error, info, Level};
use simple_logger::init_with_level;

use cv_vcf::cli::Args;
use cv_vcf::core::table_to_vcf;

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).unwrap();

    let args: Args = Args::parse();

    args.check().unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    table_to_vcf(args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}
