use anyhow::Result;
use clap::Parser;
use config::{ArgCheck, DEFAULT_GENOME_BUILD};
use log::info;
use std::path::PathBuf;

use cv_vcf::core::{EscapePolicy, IdSource};

/// Arguments of the composite pipeline: one pass from the two ClinVar
/// release tables to a VCF, with the combined table kept on disk.
#[derive(Debug, Parser)]
#[command(name = "run", about = "Join the ClinVar tables and export the result as VCF")]
pub struct RunArgs {
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
        help = "Path for the combined table [gzipped, must end in .gz]"
    )]
    pub output: PathBuf,

    #[arg(
        short = 'b',
        long = "build",
        value_name = "BUILD",
        default_value = DEFAULT_GENOME_BUILD,
        help = "Genome build to keep in the join stage"
    )]
    pub build: String,

    #[arg(
        short = 'r',
        long = "reference",
        value_name = "PATH",
        conflicts_with = "vcf_build",
        required_unless_present = "vcf_build",
        help = "Reference FASTA; its sibling .fai index drives the ##contig lines"
    )]
    pub reference: Option<PathBuf>,

    #[arg(
        long = "vcf-build",
        value_name = "BUILD",
        help = "Fixed genome build with baked-in contig lengths [b37|b38]"
    )]
    pub vcf_build: Option<String>,

    #[arg(
        short = 'v',
        long = "version",
        value_name = "YYYY-MM",
        help = "ClinVar release the tables come from, e.g. 2019-02"
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
        long = "vcf-out",
        value_name = "PATH",
        help = "Output VCF path [default: stdout]"
    )]
    pub vcf_out: Option<PathBuf>,
}

/// Run both stages back to back: the join writes the combined gzipped
/// table, which immediately feeds the VCF export.
pub fn run(args: Vec<String>) -> Result<()> {
    let args = RunArgs::parse_from(std::iter::once("run".to_owned()).chain(args));

    let join_args = cv_join::cli::Args {
        summary: args.summary,
        alleles: args.alleles,
        output: args.output,
        build: args.build,
    };
    join_args.check()?;
    let combined = cv_join::core::join_variant_summary_with_clinvar_alleles(join_args)?;
    info!("Combined table ready at {}", combined.display());

    let vcf_args = cv_vcf::cli::Args {
        input: combined,
        reference: args.reference,
        build: args.vcf_build,
        version: args.version,
        id_source: args.id_source,
        escape: args.escape,
        output: args.vcf_out,
    };
    vcf_args.check()?;

    cv_vcf::core::table_to_vcf(vcf_args)
}
