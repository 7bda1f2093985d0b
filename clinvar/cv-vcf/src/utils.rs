//! Header bookkeeping and INFO-value escaping for the VCF export

use anyhow::{bail, Result};

use std::io::BufRead;
use std::path::Path;

use config::{reader, FINAL_HEADER, MONTH_NAMES};

use crate::core::EscapePolicy;

/// Human-readable `##INFO` descriptions; anything unlisted falls back to
/// the upper-cased column name.
pub const DESCRIPTIONS: [(&str, &str); 25] = [
    (
        "gold_stars",
        "Number of Gold Stars (numeric representation of review status)",
    ),
    ("clnsig", "Most Severe ClinVar Pathogenicity"),
    ("original_clnsig", "Clinical Significance"),
    ("pathogenic", "Number of 'Pathogenic' Submissions"),
    ("likely_pathogenic", "Number of 'Likely pathogenic' Submissions"),
    (
        "uncertain_significance",
        "Number of 'Uncertain significance' Submissions",
    ),
    ("likely_benign", "Number of 'Likely benign' Submissions"),
    ("benign", "Number of 'Benign' Submissions"),
    ("conflicted", "Conflicting Pathogenicities (0 = False; 1 = True)"),
    ("clnhgvs", "HGVSc"),
    ("clnrevstat", "Review Status"),
    ("clndbn", "Phenotypes"),
    ("clnorigin", "Allele Origin"),
    ("rs", "rsID"),
    ("all_pmids", "Pubmed IDs Documenting Evidence of Phenotypes"),
    ("clnacc", "RCV Accession Number"),
    ("measureset_type", "Measureset Type"),
    ("measureset_id", "Measureset ID"),
    ("allele_id", "Allele ID"),
    ("symbol", "Gene Symbol"),
    ("molecular_consequence", "Molecular Consequence"),
    ("hgvs_p", "HGVSp"),
    ("all_submitters", "Submitters of Variant Phenotype"),
    ("inheritance_modes", "Modes of Inheritance"),
    ("xrefs", "Cross-References to other Data Sources"),
];

/// Columns that feed CHROM/POS/REF/ALT directly or carry bookkeeping no
/// annotation consumer needs; excluded from both `##INFO` lines and the
/// INFO field.
pub const NOT_IN_INFO: [&str; 18] = [
    "chrom",
    "pos",
    "ref",
    "alt",
    "start",
    "stop",
    "strand",
    "clinical_significance_ordered",
    "review_status_ordered",
    "dates_ordered",
    "last_evaluated",
    "submitters_ordered",
    "scv",
    "type",
    "inheritance_modes",
    "age_of_onset",
    "prevalence",
    "disease_mechanism",
];

/// Fields guaranteed to hold a single value [`Number=1`]; everything else
/// is declared multi-value [`Number=.`].
pub const SINGLE_VALUE_FIELDS: [&str; 9] = [
    "symbol",
    "pathogenic",
    "likely_pathogenic",
    "uncertain_significance",
    "likely_benign",
    "benign",
    "clnsig",
    "gold_stars",
    "conflicted",
];

/// The combined-table columns exported into INFO, in table order.
pub fn default_info_columns() -> Vec<&'static str> {
    FINAL_HEADER
        .iter()
        .filter(|col| !NOT_IN_INFO.contains(col))
        .copied()
        .collect()
}

pub fn description_for(column: &str) -> String {
    DESCRIPTIONS
        .iter()
        .find(|(col, _)| *col == column)
        .map(|(_, description)| description.to_string())
        .unwrap_or_else(|| column.to_uppercase())
}

/// Make a table value safe for an INFO field: no whitespace, semicolons
/// or equals signs survive. Commas absorb their surrounding whitespace,
/// semicolons are swapped literally, and whatever spaces remain become
/// underscores.
pub fn escape_info_value(value: &str, policy: EscapePolicy) -> String {
    let (comma_marker, semi_marker) = match policy {
        EscapePolicy::Dots => ("..", ","),
        EscapePolicy::Pipes => ("|", "|"),
    };

    let parts: Vec<&str> = value.split(',').collect();
    let collapsed = if parts.len() == 1 {
        value.to_owned()
    } else {
        let last = parts.len() - 1;
        parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let part = if i > 0 { part.trim_start() } else { part };
                if i < last {
                    part.trim_end()
                } else {
                    part
                }
            })
            .collect::<Vec<_>>()
            .join(comma_marker)
    };

    collapsed
        .replace(';', semi_marker)
        .replace('=', " eq ")
        .replace(' ', "_")
}

/// Read contig names and lengths from a FASTA index. Only the first two
/// of its five columns are used.
pub fn parse_fai<P: AsRef<Path>>(path: P) -> Result<Vec<(String, u64)>> {
    let path = path.as_ref();
    let mut contigs = Vec::new();

    for (i, line) in reader(path)?.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let name = match fields.next() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => bail!("ERROR: {} line {}: missing contig name", path.display(), i + 1),
        };
        let length = match fields.next() {
            Some(length) => length.parse::<u64>().map_err(|_| {
                anyhow::anyhow!(
                    "ERROR: {} line {}: cannot parse contig length {:?}",
                    path.display(),
                    i + 1,
                    length
                )
            })?,
            None => bail!("ERROR: {} line {}: missing contig length", path.display(), i + 1),
        };

        contigs.push((name, length));
    }

    Ok(contigs)
}

/// Pull the leading `YYYY-MM` out of a release version string.
pub fn parse_version(version: &str) -> Result<(&str, u32)> {
    let bytes = version.as_bytes();

    for i in 0..bytes.len().saturating_sub(6) {
        let window = &bytes[i..i + 7];
        let matches = window[..4].iter().all(u8::is_ascii_digit)
            && window[4] == b'-'
            && window[5..].iter().all(u8::is_ascii_digit);

        if matches {
            let year = &version[i..i + 4];
            let month = version[i + 5..i + 7]
                .parse::<u32>()
                .unwrap_or_default();
            return Ok((year, month));
        }
    }

    bail!("ERROR: cannot parse a YYYY-MM version from {:?}", version)
}

/// Human month name for a 1-12 month number.
pub fn month_name(month: u32) -> Result<&'static str> {
    if !(1..=12).contains(&month) {
        bail!(
            "ERROR: cannot convert version month value \"{:02}\" to a known month (must be between 01-12)",
            month
        );
    }
    Ok(MONTH_NAMES[(month - 1) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_escape_dots_policy() {
        assert_eq!(
            escape_info_value("foo; bar, baz", EscapePolicy::Dots),
            "foo,_bar..baz"
        );
        assert_eq!(escape_info_value("a=b", EscapePolicy::Dots), "a_eq_b");
        assert_eq!(escape_info_value("plain", EscapePolicy::Dots), "plain");
        assert_eq!(
            escape_info_value("one value, another", EscapePolicy::Dots),
            "one_value..another"
        );
    }

    #[test]
    fn test_escape_pipes_policy() {
        assert_eq!(
            escape_info_value("foo; bar, baz", EscapePolicy::Pipes),
            "foo|_bar|baz"
        );
    }

    #[test]
    fn test_description_fallback_uppercases() {
        assert_eq!(description_for("rs"), "rsID");
        assert_eq!(description_for("new_column"), "NEW_COLUMN");
    }

    #[test]
    fn test_default_info_columns_order() {
        let columns = default_info_columns();
        assert!(!columns.contains(&"chrom"));
        assert!(!columns.contains(&"type"));
        assert_eq!(columns.last(), Some(&"conflicted"));

        let rs = columns.iter().position(|c| *c == "rs").unwrap();
        let clnsig = columns.iter().position(|c| *c == "clnsig").unwrap();
        assert!(rs < clnsig);
    }

    #[test]
    fn test_parse_fai() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "chr1\t248956422\t112\t70\t71\nMT\t16569\t253105714\t70\t71\n").unwrap();

        let contigs = parse_fai(file.path()).unwrap();
        assert_eq!(contigs.len(), 2);
        assert_eq!(contigs[0], ("chr1".to_string(), 248956422));
        assert_eq!(contigs[1].1, 16569);
    }

    #[test]
    fn test_parse_fai_bad_length_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "chr1\tnot-a-number\t112\t70\t71\n").unwrap();

        assert!(parse_fai(file.path()).is_err());
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("2019-02").unwrap(), ("2019", 2));
        assert_eq!(parse_version("clinvar_2021-11_grch37").unwrap(), ("2021", 11));
        assert!(parse_version("february 2019").is_err());
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1).unwrap(), "January");
        assert_eq!(month_name(12).unwrap(), "December");
        assert!(month_name(0).is_err());
        assert!(month_name(13).is_err());
    }
}
