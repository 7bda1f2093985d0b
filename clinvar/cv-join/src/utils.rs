//! Pathogenicity term mapping and review-status scoring

use anyhow::{bail, Result};

/// Consensus tiers checked most-severe-first; the first tier whose synonym
/// set intersects the submitted terms wins. The empty tier collects terms
/// that carry no pathogenicity classification at all.
pub const CLASSIFICATION_TIERS: [(&str, &[&str]); 6] = [
    ("Pathogenic", &["pathogenic/likely pathogenic", "pathogenic"]),
    ("Likely pathogenic", &["likely pathogenic"]),
    ("Uncertain significance", &["uncertain significance"]),
    ("Likely benign", &["benign/likely benign", "likely benign"]),
    ("Benign", &["benign"]),
    (
        "",
        &[
            "association not found",
            "affects",
            "drug response",
            "confers sensitivity",
            "risk factor",
            "other",
            "association",
            "protective",
            "not provided",
            "conflicting data from submitters",
            "conflicting interpretations of pathogenicity",
            "no interpretation for the single variant",
        ],
    ),
];

/// Submission-count columns, most severe first, paired with the tier each
/// one resolves to.
pub const SUBMISSION_TIERS: [(&str, &str); 5] = [
    ("pathogenic", "Pathogenic"),
    ("likely_pathogenic", "Likely pathogenic"),
    ("uncertain_significance", "Uncertain significance"),
    ("likely_benign", "Likely benign"),
    ("benign", "Benign"),
];

/// Review-status strings mapped to their gold-star score. The `-` sentinel
/// maps to itself.
pub const GOLD_STAR_MAP: [(&str, &str); 9] = [
    ("no assertion provided", "0"),
    ("no assertion for the individual variant", "0"),
    ("no assertion criteria provided", "0"),
    ("criteria provided, single submitter", "1"),
    ("criteria provided, conflicting interpretations", "1"),
    ("criteria provided, multiple submitters, no conflicts", "2"),
    ("reviewed by expert panel", "3"),
    ("practice guideline", "4"),
    ("-", "-"),
];

/// Collapse a comma-separated list of free-text clinical-significance terms
/// into a single consensus tier.
///
/// # Arguments
///
/// * `terms` - comma-separated submitter terms, case-insensitive
///
/// # Returns
///
/// * `Result<&'static str>` - the winning tier, or an error when no term is
///   recognized anywhere [a malformed ClinVar release; the run must stop]
pub fn convert_terms_to_clnsig(terms: &str) -> Result<&'static str> {
    let observed: Vec<String> = terms
        .split(',')
        .map(|term| term.trim().to_lowercase())
        .collect();

    for (tier, synonyms) in CLASSIFICATION_TIERS.iter() {
        if observed.iter().any(|term| synonyms.contains(&term.as_str())) {
            return Ok(tier);
        }
    }

    bail!(
        "ERROR: unrecognised clinical significance term in {:?}",
        observed
    )
}

/// Resolve a conflicted record from its per-tier submission counts: the
/// first tier with at least one submission wins. All-zero counts yield an
/// empty string, leaving the consensus blank for downstream consumers.
pub fn determine_most_pathogenic_submission(counts: &[f64; 5]) -> &'static str {
    for (count, (_, tier)) in counts.iter().zip(SUBMISSION_TIERS.iter()) {
        if *count > 0.0 {
            return tier;
        }
    }
    ""
}

/// Gold-star score for a review-status string, `None` when unmapped.
pub fn gold_stars_for(review_status: &str) -> Option<&'static str> {
    GOLD_STAR_MAP
        .iter()
        .find(|(status, _)| *status == review_status)
        .map(|(_, stars)| *stars)
}

/// ClinVar flags conflicting aggregate records with a "Conflicting ..."
/// phrase; matching on the bare stem catches both capitalizations.
pub fn is_conflicted(original_clnsig: &str) -> bool {
    original_clnsig.to_lowercase().contains("onflicting")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_severe_term_wins() {
        assert_eq!(convert_terms_to_clnsig("Pathogenic, Benign").unwrap(), "Pathogenic");
        assert_eq!(convert_terms_to_clnsig("Benign, Pathogenic").unwrap(), "Pathogenic");
        assert_eq!(
            convert_terms_to_clnsig("Likely benign, Uncertain significance").unwrap(),
            "Uncertain significance"
        );
    }

    #[test]
    fn test_unclassified_terms_map_to_empty() {
        assert_eq!(convert_terms_to_clnsig("not provided").unwrap(), "");
        assert_eq!(
            convert_terms_to_clnsig("Conflicting interpretations of pathogenicity").unwrap(),
            ""
        );
    }

    #[test]
    fn test_unrecognised_term_fails() {
        assert!(convert_terms_to_clnsig("totally new category").is_err());
        assert!(convert_terms_to_clnsig("").is_err());
    }

    #[test]
    fn test_fallback_first_nonzero_tier() {
        assert_eq!(
            determine_most_pathogenic_submission(&[0.0, 2.0, 1.0, 0.0, 0.0]),
            "Likely pathogenic"
        );
        assert_eq!(
            determine_most_pathogenic_submission(&[1.0, 2.0, 1.0, 0.0, 4.0]),
            "Pathogenic"
        );
        assert_eq!(determine_most_pathogenic_submission(&[0.0, 0.0, 0.0, 0.0, 0.0]), "");
    }

    #[test]
    fn test_gold_star_lookup() {
        assert_eq!(gold_stars_for("reviewed by expert panel"), Some("3"));
        assert_eq!(gold_stars_for("practice guideline"), Some("4"));
        assert_eq!(gold_stars_for("-"), Some("-"));
        assert_eq!(gold_stars_for("somebody's new status"), None);
    }

    #[test]
    fn test_conflicted_matches_both_cases() {
        assert!(is_conflicted("Conflicting interpretations of pathogenicity"));
        assert!(is_conflicted("conflicting data from submitters"));
        assert!(!is_conflicted("Pathogenic"));
    }
}
