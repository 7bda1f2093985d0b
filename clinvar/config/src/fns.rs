use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::GZ_SUFFIX;

// os
#[cfg(not(windows))]
const TICK_SETTINGS: (&str, u64) = ("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ", 80);
#[cfg(windows)]
const TICK_SETTINGS: (&str, u64) = (r"+-x| ", 200);

/// return a pre-configured progress bar
pub fn get_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let progressbar_style = ProgressStyle::default_spinner()
        .tick_chars(TICK_SETTINGS.0)
        .template(" {spinner} {msg:<30} {wide_bar} ETA {eta_precise} ")
        .expect("no template error");

    let progress_bar = ProgressBar::new(length);

    progress_bar.set_style(progressbar_style);
    progress_bar.enable_steady_tick(Duration::from_millis(TICK_SETTINGS.1));
    progress_bar.set_message(msg.to_owned());

    progress_bar
}

/// error handling for CLI
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// argument validation
pub fn validate(arg: &PathBuf) -> Result<(), CliError> {
    if !arg.exists() {
        return Err(CliError::InvalidInput(format!("{:?} does not exist", arg)));
    }

    if !arg.is_file() {
        return Err(CliError::InvalidInput(format!("{:?} is not a file", arg)));
    }

    match std::fs::metadata(arg) {
        Ok(metadata) if metadata.len() == 0 => {
            Err(CliError::InvalidInput(format!("file {:?} is empty", arg)))
        }
        Ok(_) => Ok(()),
        Err(e) => Err(CliError::IoError(e)),
    }
}

/// argument checker for all subcommands
pub trait ArgCheck {
    fn check(&self) -> Result<(), CliError> {
        self.validate_args()
    }

    fn validate_args(&self) -> Result<(), CliError> {
        self.check_inputs()?;
        self.check_output()
    }

    fn check_inputs(&self) -> Result<(), CliError> {
        if self.get_inputs().is_empty() {
            let err = "No input files provided".to_string();
            return Err(CliError::InvalidInput(err));
        }
        for input in self.get_inputs() {
            validate(input)?;
        }

        Ok(())
    }

    fn check_output(&self) -> Result<(), CliError> {
        Ok(())
    }

    fn get_inputs(&self) -> Vec<&PathBuf>;
}

/// open a tab-separated file for reading, gzip-decoded when the
/// filename carries a .gz suffix
pub fn reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, CliError> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let is_gz = path
        .file_name()
        .and_then(|f| f.to_str())
        .map(|f| f.ends_with(GZ_SUFFIX))
        .unwrap_or(false);

    if is_gz {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// create a gzip-compressed writer
pub fn gz_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<GzEncoder<File>>, CliError> {
    let file = File::create(path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    Ok(BufWriter::new(encoder))
}
