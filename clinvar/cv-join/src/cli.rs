use clap::Parser;
use config::{ArgCheck, CliError, DEFAULT_GENOME_BUILD, GZ_SUFFIX};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Join ClinVar's variant summary with the grouped alleles table")]
pub struct Args {
    #[arg(
        short = 's',
        long = "summary",
        required = true,
        value_name = "PATH",
        help = "Path to ClinVar variant_summary.txt.gz"
    )]
    pub summary: PathBuf,

    #[arg(
        short = 'a',
        long = "alleles",
        required = true,
        value_name = "PATH",
        help = "Path to the grouped per-allele table [.tsv.gz]"
    )]
    pub alleles: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        required = true,
        value_name = "PATH",
        help = "Output path for the combined table [gzipped, must end in .gz]"
    )]
    pub output: PathBuf,

    #[arg(
        short = 'b',
        long = "build",
        value_name = "BUILD",
        default_value = DEFAULT_GENOME_BUILD,
        help = "Genome build to keep, matched exactly against the assembly column"
    )]
    pub build: String,
}

impl ArgCheck for Args {
    fn get_inputs(&self) -> Vec<&PathBuf> {
        vec![&self.summary, &self.alleles]
    }

    fn check_output(&self) -> Result<(), CliError> {
        let name = self
            .output
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or_default();

        if !name.ends_with(GZ_SUFFIX) {
            return Err(CliError::InvalidInput(format!(
                "output {:?} must end in {} [the combined table is gzipped]",
                self.output, GZ_SUFFIX
            )));
        }
        Ok(())
    }
}
