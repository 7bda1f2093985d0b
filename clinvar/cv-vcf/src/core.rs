//! Core module for exporting ClinVar tables as VCF
//!
//! One emitter serves every header flavor: contig lines either come from a
//! reference FASTA index or from a baked-in genome build, the ID field is
//! fed by a configurable column, and INFO values go through one of two
//! escaping policies. All knobs live in an [`EmitterProfile`] so callers
//! pick a flavor instead of a script.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use log::info;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use config::{
    get_progress_bar, Table, B37_CONTIGS, B38_CONTIGS, VCF_CORE_COLUMNS, VCF_FILE_FORMAT,
    VCF_HEADER_ROW, VCF_SOURCE,
};

use crate::cli::Args;
use crate::utils::{
    default_info_columns, description_for, escape_info_value, month_name, parse_fai,
    parse_version, SINGLE_VALUE_FIELDS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdSource {
    /// dbSNP rsID
    Rs,
    /// HGVS coding-sequence name
    Hgvs,
}

impl IdSource {
    pub fn column(&self) -> &'static str {
        match self {
            IdSource::Rs => "rs",
            IdSource::Hgvs => "clnhgvs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EscapePolicy {
    /// comma to `..`, semicolon to `,`
    Dots,
    /// comma and semicolon both to `|`
    Pipes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenomeBuild {
    B37,
    B38,
}

impl GenomeBuild {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "b37" => Ok(GenomeBuild::B37),
            "b38" => Ok(GenomeBuild::B38),
            _ => bail!("ERROR: unrecognized genome build: {} [expected b37 or b38]", name),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GenomeBuild::B37 => "b37",
            GenomeBuild::B38 => "b38",
        }
    }

    pub fn contigs(&self) -> &'static [(&'static str, u64)] {
        match self {
            GenomeBuild::B37 => &B37_CONTIGS,
            GenomeBuild::B38 => &B38_CONTIGS,
        }
    }
}

/// Where the `##contig` lines come from.
#[derive(Debug, Clone)]
pub enum HeaderMode {
    /// read `<reference>.fai` and mirror its contigs
    Fai(PathBuf),
    /// baked-in contig table for a named build
    Fixed(GenomeBuild),
}

/// Everything that distinguishes one export flavor from another.
#[derive(Debug, Clone)]
pub struct EmitterProfile {
    pub id_source: IdSource,
    pub header: HeaderMode,
    pub info_columns: Vec<String>,
    pub escape: EscapePolicy,
}

impl EmitterProfile {
    pub fn from_args(args: &Args) -> Result<Self> {
        let header = match (&args.reference, &args.build) {
            (Some(reference), None) => HeaderMode::Fai(reference.clone()),
            (None, Some(build)) => HeaderMode::Fixed(GenomeBuild::from_name(build)?),
            _ => bail!("ERROR: provide exactly one of --reference or --build"),
        };

        Ok(Self {
            id_source: args.id_source,
            header,
            info_columns: default_info_columns()
                .iter()
                .map(|col| col.to_string())
                .collect(),
            escape: args.escape,
        })
    }
}

/// Read the input table and write it out as VCF, to a file or stdout.
///
/// # Arguments
///
/// * `args` - The command line arguments
///
/// # Returns
///
/// * `Result<()>` - The result of the operation
pub fn table_to_vcf(args: Args) -> Result<()> {
    let profile = EmitterProfile::from_args(&args)?;

    let table = Table::read_tsv(&args.input)
        .with_context(|| format!("ERROR: cannot read {}", args.input.display()))?;

    let missing = table.missing_columns(&VCF_CORE_COLUMNS);
    if !missing.is_empty() {
        bail!(
            "ERROR: {} is missing columns: {}",
            args.input.display(),
            missing.join(", ")
        );
    }

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            emit(&table, &profile, args.version.as_deref(), &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            emit(&table, &profile, args.version.as_deref(), &mut writer)?;
        }
    }

    info!("Done");
    Ok(())
}

/// Emit the full VCF: meta headers, `##INFO` declarations, optional
/// release metadata, contigs, the column row and one record per table row.
pub fn emit<W: Write>(
    table: &Table,
    profile: &EmitterProfile,
    version: Option<&str>,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "##fileformat={}", VCF_FILE_FORMAT)?;
    writeln!(out, "##source={}", VCF_SOURCE)?;

    // columns the input table does not carry are treated as all-null
    let info_columns: Vec<&str> = profile
        .info_columns
        .iter()
        .map(String::as_str)
        .filter(|col| table.column_index(col).is_some())
        .collect();

    for col in &info_columns {
        let number = if SINGLE_VALUE_FIELDS.contains(col) { "1" } else { "." };
        writeln!(
            out,
            "##INFO=<ID={},Number={},Type=String,Description=\"{}\">",
            col.to_uppercase(),
            number,
            description_for(col)
        )?;
    }

    if let Some(version) = version {
        let (year, month) = parse_version(version)?;
        let month = month_name(month)?;

        writeln!(
            out,
            "##CLINVAR_VCF_VALIDATION=<ID=NUM_TOTAL_VARIANTS,VALUE={},DESCRIPTION=\"Total number of variants in VCF\">",
            table.rows.len()
        )?;
        writeln!(
            out,
            "##CURATED_VARIANT_LIST_INFO=<ID=VERSION,VALUE=\"{}\",DESCRIPTION=\"Version of source data\">",
            version
        )?;
        writeln!(
            out,
            "##CURATED_VARIANT_LIST_INFO=<ID=DESCRIPTION,VALUE=\"ClinVar variants (SNVs and indels) in the {}-{} version of the ClinVar dataset\",DESCRIPTION=\"Description for the Curated Variant List\">",
            year, month
        )?;
    }

    match &profile.header {
        HeaderMode::Fai(reference) => {
            let fai = PathBuf::from(format!("{}.fai", reference.display()));
            for (name, length) in parse_fai(&fai)? {
                writeln!(
                    out,
                    "##contig=<ID={},length={}>",
                    name.strip_prefix("chr").unwrap_or(&name),
                    length
                )?;
            }
            writeln!(out, "##reference={}", reference.display())?;
        }
        HeaderMode::Fixed(build) => {
            for (name, length) in build.contigs() {
                writeln!(out, "##contig=<ID={},length={}>", name, length)?;
            }
            writeln!(out, "##reference={}", build.name())?;
        }
    }

    writeln!(out, "{}", VCF_HEADER_ROW.join("\t"))?;

    emit_records(table, profile, &info_columns, out)
}

fn emit_records<W: Write>(
    table: &Table,
    profile: &EmitterProfile,
    info_columns: &[&str],
    out: &mut W,
) -> Result<()> {
    let col = |name: &str| {
        table
            .column_index(name)
            .with_context(|| format!("ERROR: missing column: {}", name))
    };
    let chrom = col("chrom")?;
    let pos = col("pos")?;
    let reference = col("ref")?;
    let alt = col("alt")?;
    let id = col(profile.id_source.column())
        .with_context(|| "ERROR: the configured ID column is not in the input table")?;

    let info_indices: Vec<(String, usize)> = info_columns
        .iter()
        .filter_map(|name| {
            table
                .column_index(name)
                .map(|idx| (name.to_uppercase(), idx))
        })
        .collect();

    let pb = get_progress_bar(table.rows.len() as u64, "Writing records...");

    for row in &table.rows {
        let id_value = if row[id].is_empty() { "." } else { row[id].as_str() };

        let info = info_indices
            .iter()
            .filter(|(_, idx)| !row[*idx].is_empty())
            .map(|(key, idx)| format!("{}={}", key, escape_info_value(&row[*idx], profile.escape)))
            .collect::<Vec<_>>()
            .join(";");

        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t.\t.\t{}",
            row[chrom], row[pos], id_value, row[reference], row[alt], info
        )?;
        pb.inc(1);
    }

    pb.finish_and_clear();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(header: HeaderMode) -> EmitterProfile {
        EmitterProfile {
            id_source: IdSource::Rs,
            header,
            info_columns: default_info_columns()
                .iter()
                .map(|col| col.to_string())
                .collect(),
            escape: EscapePolicy::Dots,
        }
    }

    fn sample_table() -> Table {
        Table {
            header: vec![
                "chrom".into(),
                "pos".into(),
                "ref".into(),
                "alt".into(),
                "rs".into(),
                "symbol".into(),
                "clnsig".into(),
                "gold_stars".into(),
            ],
            rows: vec![
                vec![
                    "1".into(),
                    "1234".into(),
                    "A".into(),
                    "G".into(),
                    "rs553".into(),
                    "BRCA1".into(),
                    "Pathogenic".into(),
                    "2".into(),
                ],
                vec![
                    "X".into(),
                    "999".into(),
                    "C".into(),
                    "T".into(),
                    "".into(),
                    "".into(),
                    "Benign".into(),
                    "0".into(),
                ],
            ],
        }
    }

    fn emitted(table: &Table, profile: &EmitterProfile, version: Option<&str>) -> Vec<String> {
        let mut buffer = Vec::new();
        emit(table, profile, version, &mut buffer).unwrap();
        String::from_utf8(buffer)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_fixed_header_emission() {
        let table = sample_table();
        let lines = emitted(&table, &profile(HeaderMode::Fixed(GenomeBuild::B37)), None);

        assert_eq!(lines[0], "##fileformat=VCFv4.1");
        assert_eq!(lines[1], "##source=clinvar");
        assert_eq!(lines.iter().filter(|l| l.starts_with("##contig=")).count(), 25);
        assert!(lines.contains(&"##contig=<ID=1,length=249250621>".to_string()));
        assert!(lines.contains(&"##reference=b37".to_string()));
        assert!(lines
            .contains(&"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO".to_string()));
    }

    #[test]
    fn test_info_declarations_follow_table_contents() {
        let table = sample_table();
        let lines = emitted(&table, &profile(HeaderMode::Fixed(GenomeBuild::B37)), None);

        let info: Vec<&String> = lines.iter().filter(|l| l.starts_with("##INFO=")).collect();
        assert_eq!(info.len(), 4); // rs, symbol, clnsig, gold_stars
        assert_eq!(
            info[0],
            "##INFO=<ID=RS,Number=.,Type=String,Description=\"rsID\">"
        );
        assert_eq!(
            info[1],
            "##INFO=<ID=SYMBOL,Number=1,Type=String,Description=\"Gene Symbol\">"
        );
    }

    #[test]
    fn test_record_lines() {
        let table = sample_table();
        let lines = emitted(&table, &profile(HeaderMode::Fixed(GenomeBuild::B38)), None);

        assert_eq!(
            lines[lines.len() - 2],
            "1\t1234\trs553\tA\tG\t.\t.\tRS=rs553;SYMBOL=BRCA1;CLNSIG=Pathogenic;GOLD_STARS=2"
        );
        // empty rs: placeholder ID, value skipped in INFO
        assert_eq!(
            lines[lines.len() - 1],
            "X\t999\t.\tC\tT\t.\t.\tCLNSIG=Benign;GOLD_STARS=0"
        );
    }

    #[test]
    fn test_version_block() {
        let table = sample_table();
        let lines = emitted(
            &table,
            &profile(HeaderMode::Fixed(GenomeBuild::B37)),
            Some("2019-02"),
        );

        assert!(lines.contains(
            &"##CLINVAR_VCF_VALIDATION=<ID=NUM_TOTAL_VARIANTS,VALUE=2,DESCRIPTION=\"Total number of variants in VCF\">"
                .to_string()
        ));
        assert!(lines.iter().any(|l| l.contains("the 2019-February version")));
    }

    #[test]
    fn test_bad_version_month_fails() {
        let table = sample_table();
        let mut buffer = Vec::new();
        let result = emit(
            &table,
            &profile(HeaderMode::Fixed(GenomeBuild::B37)),
            Some("2019-13"),
            &mut buffer,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_build_is_rejected() {
        let err = GenomeBuild::from_name("b39").unwrap_err();
        assert!(err.to_string().contains("b39"));
    }

    #[test]
    fn test_fai_header_strips_chr_prefix() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("genome.fa");
        let mut fai = std::fs::File::create(dir.path().join("genome.fa.fai")).unwrap();
        write!(fai, "chr7\t159138663\t112\t70\t71\nchrM\t16571\t253105714\t70\t71\n").unwrap();

        let table = sample_table();
        let lines = emitted(&table, &profile(HeaderMode::Fai(reference.clone())), None);

        assert!(lines.contains(&"##contig=<ID=7,length=159138663>".to_string()));
        assert!(lines.contains(&"##contig=<ID=M,length=16571>".to_string()));
        assert!(lines.contains(&format!("##reference={}", reference.display())));
    }
}
