//! Core module for combining ClinVar release tables
//!
//! ClinVar ships pathogenicity evidence split across two tables: the
//! variant summary [one row per variant placement per assembly] and a
//! grouped per-allele table. This module merges the two on the allele
//! identifier, re-derives a single consensus classification from the
//! free-text submission terms, scores the review status on the 0-4
//! gold-star scale, and writes one combined gzipped table with a fixed
//! column order.

use anyhow::{bail, Context, Result};
use log::{info, warn};

use std::path::PathBuf;

use config::{get_progress_bar, Table, FINAL_HEADER};

use crate::cli::Args;
use crate::utils::{
    convert_terms_to_clnsig, determine_most_pathogenic_submission, gold_stars_for, is_conflicted,
    SUBMISSION_TIERS,
};

/// Normalized name of the variant summary's leading column. The rename to
/// `allele_id` only happens when the file actually leads with it.
const SUMMARY_KEY_COLUMN: &str = "alleleid";

/// Variant-summary columns carried into the join, with the names they get.
const SUMMARY_COLUMNS: [(&str, &str); 5] = [
    ("allele_id", "allele_id"),
    ("clinicalsignificance", "original_clnsig"),
    ("reviewstatus", "clnrevstat"),
    ("lastevaluated", "last_evaluated"),
    ("type", "type"),
];

/// Per-allele columns superseded by the variant summary's versions.
const SUPERSEDED_COLUMNS: [&str; 3] = ["original_clnsig", "clnrevstat", "last_evaluated"];

/// Join the variant summary with the grouped per-allele table and write
/// the combined, classification-annotated table.
///
/// # Arguments
///
/// * `args` - The command line arguments
///
/// # Returns
///
/// * `Result<PathBuf>` - path of the written gzipped table
pub fn join_variant_summary_with_clinvar_alleles(args: Args) -> Result<PathBuf> {
    let mut summary = Table::read_tsv(&args.summary)
        .with_context(|| format!("ERROR: cannot read {}", args.summary.display()))?;
    info!("variant_summary raw: {:?}", summary.shape());

    let mut alleles = Table::read_tsv(&args.alleles)
        .with_context(|| format!("ERROR: cannot read {}", args.alleles.display()))?;
    info!("clinvar_alleles raw: {:?}", alleles.shape());

    let summary = prepare_variant_summary(&mut summary, &args.build)
        .with_context(|| format!("ERROR: malformed variant summary {}", args.summary.display()))?;
    info!("variant_summary after filter: {:?}", summary.shape());

    alleles
        .drop_columns(&SUPERSEDED_COLUMNS)
        .with_context(|| format!("ERROR: malformed alleles table {}", args.alleles.display()))?;
    info!("clinvar_alleles after filter: {:?}", alleles.shape());

    let mut merged = inner_join(&alleles, &summary, "allele_id")?;
    info!("merged raw: {:?}", merged.shape());

    derive_classifications(&mut merged)?;

    let combined = merged.select(&FINAL_HEADER)?;
    info!("merged final: {:?}", combined.shape());

    combined.write_tsv_gz(&args.output)?;
    info!("Wrote combined table to {}", args.output.display());

    Ok(args.output)
}

/// Normalize the variant summary down to the five join columns for the
/// requested genome build, de-duplicated.
fn prepare_variant_summary(summary: &mut Table, build: &str) -> Result<Table> {
    // lowercase names, `.` to `_`
    summary.normalize_header(|col| col.to_lowercase().replace('.', "_"));

    // the allele identifier is expected up front; a positional rename
    // alone would silently mangle a reordered release
    let first = summary
        .header
        .first()
        .map(|col| col.trim_start_matches('#'))
        .unwrap_or_default();
    if first != SUMMARY_KEY_COLUMN {
        bail!(
            "ERROR: first column is {:?}, expected the allele identifier {:?}",
            first,
            SUMMARY_KEY_COLUMN
        );
    }
    summary.header[0] = "allele_id".to_owned();

    summary.filter_eq("assembly", build)?;

    let wanted: Vec<&str> = SUMMARY_COLUMNS.iter().map(|(from, _)| *from).collect();
    let mut summary = summary.select(&wanted)?;
    for (from, to) in SUMMARY_COLUMNS.iter() {
        summary.rename_column(from, to);
    }

    // alternative loci [PAR regions] duplicate whole rows; exact
    // de-duplication is known to be imperfect for translocations
    summary.dedup_rows();

    Ok(summary)
}

/// Strict inner join on `key`. Left row order is preserved and duplicate
/// keys multiply pairwise; rows without a partner on either side are
/// silently dropped.
fn inner_join(left: &Table, right: &Table, key: &str) -> Result<Table> {
    let left_key = match left.column_index(key) {
        Some(idx) => idx,
        None => bail!("ERROR: left table is missing join key: {}", key),
    };
    let right_key = match right.column_index(key) {
        Some(idx) => idx,
        None => bail!("ERROR: right table is missing join key: {}", key),
    };

    let right_index = right.index_by(key)?;

    let mut header = left.header.clone();
    header.extend(
        right
            .header
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != right_key)
            .map(|(_, col)| col.clone()),
    );

    let mut rows = Vec::new();
    for left_row in &left.rows {
        let Some(matches) = right_index.get(left_row[left_key].as_str()) else {
            continue;
        };

        for &r in matches {
            let mut row = left_row.clone();
            row.extend(
                right.rows[r]
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != right_key)
                    .map(|(_, value)| value.clone()),
            );
            rows.push(row);
        }
    }

    Ok(Table { header, rows })
}

/// Derive `clnsig`, `gold_stars` and `conflicted` for every merged row.
/// Conflicted rows get their consensus from the per-tier submission counts
/// instead of the free-text terms.
fn derive_classifications(merged: &mut Table) -> Result<()> {
    let clnsig_idx = match merged.column_index("original_clnsig") {
        Some(idx) => idx,
        None => bail!("ERROR: merged table is missing column: original_clnsig"),
    };
    let revstat_idx = match merged.column_index("clnrevstat") {
        Some(idx) => idx,
        None => bail!("ERROR: merged table is missing column: clnrevstat"),
    };

    let count_names: Vec<&str> = SUBMISSION_TIERS.iter().map(|(col, _)| *col).collect();
    let missing = merged.missing_columns(&count_names);
    if !missing.is_empty() {
        bail!(
            "ERROR: merged table is missing submission counts: {}",
            missing.join(", ")
        );
    }
    let count_indices: Vec<usize> = count_names
        .iter()
        .filter_map(|col| merged.column_index(col))
        .collect();

    let pb = get_progress_bar(merged.rows.len() as u64, "Classifying...");

    let mut clnsig = Vec::with_capacity(merged.rows.len());
    let mut gold_stars = Vec::with_capacity(merged.rows.len());
    let mut conflicted = Vec::with_capacity(merged.rows.len());

    for row in &merged.rows {
        let terms = row[clnsig_idx].as_str();

        // every row goes through the term classifier so that an unknown
        // term aborts the run; conflicted rows then take their consensus
        // from the submission counts instead
        let mut consensus = convert_terms_to_clnsig(terms)?;
        if is_conflicted(terms) {
            conflicted.push("1".to_owned());
            consensus = determine_most_pathogenic_submission(&submission_counts(row, &count_indices)?);
        } else {
            conflicted.push("0".to_owned());
        }
        clnsig.push(consensus.to_owned());

        let review_status = row[revstat_idx].as_str();
        match gold_stars_for(review_status) {
            Some(stars) => gold_stars.push(stars.to_owned()),
            None => {
                warn!("unmapped review status {:?}, leaving gold_stars blank", review_status);
                gold_stars.push(String::new());
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    merged.push_column("clnsig", clnsig)?;
    merged.push_column("gold_stars", gold_stars)?;
    merged.push_column("conflicted", conflicted)?;

    Ok(())
}

fn submission_counts(row: &[String], indices: &[usize]) -> Result<[f64; 5]> {
    let mut counts = [0.0; 5];
    for (slot, (&idx, (col, _))) in counts
        .iter_mut()
        .zip(indices.iter().zip(SUBMISSION_TIERS.iter()))
    {
        *slot = row[idx]
            .parse::<f64>()
            .with_context(|| format!("ERROR: non-numeric {} count: {:?}", col, row[idx]))?;
    }
    Ok(counts)
}
