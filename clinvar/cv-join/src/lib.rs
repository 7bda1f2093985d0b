use anyhow::Result;
use clap::Parser;
use config::ArgCheck;
use std::path::PathBuf;

pub mod cli;
pub mod core;
pub mod utils;

/// In-process entry point used by the `clinvartools` front door.
pub fn lib_cv_join(args: Vec<String>) -> Result<PathBuf> {
    let args = cli::Args::parse_from(std::iter::once("cv-join".to_owned()).chain(args));
    args.check()?;

    crate::core::join_variant_summary_with_clinvar_alleles(args)
}
