use anyhow::Result;
use clap::Parser;
use config::ArgCheck;

pub mod cli;
pub mod core;
pub mod utils;

/// In-process entry point used by the `clinvartools` front door.
pub fn lib_cv_vcf(args: Vec<String>) -> Result<()> {
    let args = cli::Args::parse_from(std::iter::once("cv-vcf".to_owned()).chain(args));
    args.check()?;

    crate::core::table_to_vcf(args)
}
