pub mod fns;
pub mod table;

pub use fns::*;
pub use table::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_GENOME_BUILD: &str = "GRCh37";
pub const GZ_SUFFIX: &str = ".gz";

// VCF surface
pub const VCF_FILE_FORMAT: &str = "VCFv4.1";
pub const VCF_SOURCE: &str = "clinvar";
pub const VCF_CORE_COLUMNS: [&str; 4] = ["chrom", "pos", "ref", "alt"];
pub const VCF_HEADER_ROW: [&str; 8] =
    ["#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Column order of the combined alleles table. The four trailing columns
/// are derived during the join, everything before them comes from the
/// grouped per-allele table.
pub const FINAL_HEADER: [&str; 42] = [
    "chrom",
    "pos",
    "ref",
    "alt",
    "start",
    "stop",
    "strand",
    "measureset_type",
    "measureset_id",
    "rs",
    "clnacc",
    "allele_id",
    "symbol",
    "clnhgvs",
    "hgvs_p",
    "molecular_consequence",
    "original_clnsig",
    "clinical_significance_ordered",
    "pathogenic",
    "likely_pathogenic",
    "uncertain_significance",
    "likely_benign",
    "benign",
    "clnrevstat",
    "review_status_ordered",
    "last_evaluated",
    "scv",
    "all_submitters",
    "submitters_ordered",
    "clndbn",
    "all_pmids",
    "inheritance_modes",
    "age_of_onset",
    "prevalence",
    "disease_mechanism",
    "clnorigin",
    "xrefs",
    "dates_ordered",
    "clnsig",
    "type",
    "gold_stars",
    "conflicted",
];

/// GRCh37 contig lengths, chromosome-name keyed, MT included.
pub const B37_CONTIGS: [(&str, u64); 25] = [
    ("1", 249250621),
    ("2", 243199373),
    ("3", 198022430),
    ("4", 191154276),
    ("5", 180915260),
    ("6", 171115067),
    ("7", 159138663),
    ("8", 146364022),
    ("9", 141213431),
    ("10", 135534747),
    ("11", 135006516),
    ("12", 133851895),
    ("13", 115169878),
    ("14", 107349540),
    ("15", 102531392),
    ("16", 90354753),
    ("17", 81195210),
    ("18", 78077248),
    ("19", 59128983),
    ("20", 63025520),
    ("21", 48129895),
    ("22", 51304566),
    ("X", 155270560),
    ("Y", 59373566),
    ("MT", 16569),
];

/// GRCh38 contig lengths.
pub const B38_CONTIGS: [(&str, u64); 25] = [
    ("1", 248956422),
    ("2", 242193529),
    ("3", 198295559),
    ("4", 190214555),
    ("5", 181538259),
    ("6", 170805979),
    ("7", 159345973),
    ("8", 145138636),
    ("9", 138394717),
    ("10", 133797422),
    ("11", 135086622),
    ("12", 133275309),
    ("13", 114364328),
    ("14", 107043718),
    ("15", 101991189),
    ("16", 90338345),
    ("17", 83257441),
    ("18", 80373285),
    ("19", 58617616),
    ("20", 64444167),
    ("21", 46709983),
    ("22", 50818468),
    ("X", 156040895),
    ("Y", 57227415),
    ("MT", 16569),
];
