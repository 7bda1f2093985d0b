use clap::Parser;
use config::{validate, ArgCheck, CliError};
use std::path::PathBuf;

use crate::core::{EscapePolicy, IdSource};

// no auto version flag: `--version` is taken by the release date option
#[derive(Debug, Parser)]
#[command(about = "Export a combined ClinVar table as VCF")]
pub struct Args {
    #[arg(
        short = 'i',
        long = "input",
        required = true,
        value_name = "PATH",
        help = "Tab-separated input table [.tsv or .tsv.gz]"
    )]
    pub input: PathBuf,

    #[arg(
        short = 'r',
        long = "reference",
        value_name = "PATH",
        conflicts_with = "build",
        required_unless_present = "build",
        help = "Reference FASTA; its sibling .fai index drives the ##contig lines"
    )]
    pub reference: Option<PathBuf>,

    #[arg(
        short = 'g',
        long = "build",
        value_name = "BUILD",
        help = "Fixed genome build with baked-in contig lengths [b37|b38]"
    )]
    pub build: Option<String>,

    #[arg(
        short = 'v',
        long = "version",
        value_name = "YYYY-MM",
        help = "ClinVar release the table was derived from, e.g. 2019-02"
    )]
    pub version: Option<String>,

    #[arg(
        long = "id-source",
        value_enum,
        value_name = "COLUMN",
        default_value = "rs",
        help = "Column feeding the VCF ID field"
    )]
    pub id_source: IdSource,

    #[arg(
        long = "escape",
        value_enum,
        value_name = "POLICY",
        default_value = "dots",
        help = "INFO value escaping policy"
    )]
    pub escape: EscapePolicy,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output VCF path [default: stdout]"
    )]
    pub output: Option<PathBuf>,
}

impl ArgCheck for Args {
    fn get_inputs(&self) -> Vec<&PathBuf> {
        vec![&self.input]
    }

    // the .fai sibling has to exist before a single header line goes out
    fn validate_args(&self) -> Result<(), CliError> {
        self.check_inputs()?;

        if let Some(reference) = &self.reference {
            let fai = PathBuf::from(format!("{}.fai", reference.display()));
            validate(&fai)?;
        }

        Ok(())
    }
}
