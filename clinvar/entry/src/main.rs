/// clinvartools: ClinVar release tables to VCF
///
/// This is the entry point for the clinvartools CLI.
/// It is responsible for parsing the CLI arguments
/// and executing the appropriate subcommand.
///
/// This wrapper offers 3 subcommands:
/// - cv-join: merge the variant summary with the grouped alleles table
/// - cv-vcf: export a combined table as VCF
/// - run: both stages back to back
///
/// To get help on the subcommands, you can run:
///
/// ```shell
/// clinvartools cv-join -- --help
/// ```
///
use clap::{Args, Parser, Subcommand};
use log::{error, Level};
use simple_logger::init_with_level;

use clinvartools::run;
use cv_join::lib_cv_join;
use cv_vcf::lib_cv_vcf;

#[derive(Parser)]
#[command(name = "clinvartools")]
#[command(about = "clinvartools: ClinVar release tables to VCF")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "cv-join")]
    Join(ToolArgs),
    #[command(name = "cv-vcf")]
    Vcf(ToolArgs),
    #[command(name = "run")]
    Run(ToolArgs),
}

#[derive(Args)]
struct ToolArgs {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    init_with_level(Level::Info).unwrap();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Join(args) => lib_cv_join(args.args).map(|_| ()),
        Commands::Vcf(args) => lib_cv_vcf(args.args),
        Commands::Run(args) => run(args.args),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
