//! Image assigner service
//!
//! Lists the media image directory, reduces every filename and every record
//! name to a normalized key, and points each matching record at its image.
//! Records are saved one at a time as they match; there is no transaction
//! spanning the run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::text_utils::{filename_key, normalize_key};
use crate::error::AssignError;
use crate::orm::{ImageRecord, RecordStore};

/// Prefix stored in front of every assigned filename, relative to the media root
pub const DEFAULT_IMAGE_PREFIX: &str = "car/images";

/// Lookup table from normalized key to the original filename.
#[derive(Debug, Default)]
pub struct CandidateIndex {
    by_key: HashMap<String, String>,
    collisions: usize,
}

impl CandidateIndex {
    /// Build the index in iteration order. A later filename with the same key
    /// replaces the earlier one.
    pub fn from_filenames<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for filename in filenames {
            index.insert(filename.into());
        }
        index
    }

    fn insert(&mut self, filename: String) {
        let key = filename_key(&filename);
        if let Some(previous) = self.by_key.insert(key.clone(), filename) {
            self.collisions += 1;
            warn!(
                key = %key,
                replaced = %previous,
                kept = %self.by_key[&key],
                "Filenames collide after normalization; keeping the later one"
            );
        }
    }

    /// List the immediate entries of `dir`. Returns `None` when the directory
    /// does not exist.
    pub fn scan(dir: &Path) -> Result<Option<Self>, AssignError> {
        if !dir.is_dir() {
            return Ok(None);
        }

        let mut index = Self::default();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| AssignError::ListDirectory {
                path: dir.to_path_buf(),
                source,
            })?;

            match entry.file_name().to_str() {
                Some(name) => index.insert(name.to_string()),
                None => {
                    warn!(path = %entry.path().display(), "Skipping non UTF-8 filename");
                }
            }
        }

        debug!(dir = %dir.display(), candidates = index.candidates(), "Scanned media directory");
        Ok(Some(index))
    }

    /// Find the filename whose key matches the normalized `name`
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.by_key.get(&normalize_key(name)).map(String::as_str)
    }

    /// Number of distinct keys
    pub fn candidates(&self) -> usize {
        self.by_key.len()
    }

    /// Number of filenames that were shadowed by a later one
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

/// Join the stored prefix and a filename. Always `/` separated, whatever the host.
pub fn relative_image_path(prefix: &str, filename: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", prefix, filename)
    }
}

/// Assigner settings
#[derive(Debug, Clone)]
pub struct ImageAssignerConfig {
    /// Directory holding the candidate images
    pub media_dir: PathBuf,
    /// Prefix written in front of the filename (e.g. `car/images`)
    pub image_prefix: String,
    /// Compute matches without saving them
    pub dry_run: bool,
}

/// One record that matched an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub record_id: i64,
    pub name: String,
    pub image: String,
    pub previous: Option<String>,
}

/// Outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct AssignReport {
    pub media_dir: String,
    pub directory_found: bool,
    pub candidates: usize,
    pub collisions: usize,
    pub records_scanned: usize,
    pub updated: usize,
    pub dry_run: bool,
    pub assignments: Vec<Assignment>,
}

impl AssignReport {
    pub fn summary_line(&self) -> String {
        if self.dry_run {
            format!("Would update images for {} cars", self.updated)
        } else {
            format!("Updated images for {} cars", self.updated)
        }
    }
}

/// Matches records to image files and saves the matches
pub struct ImageAssigner {
    config: ImageAssignerConfig,
}

impl ImageAssigner {
    pub fn new(config: ImageAssignerConfig) -> Self {
        Self { config }
    }

    /// Notice printed when there is no directory to scan
    pub fn missing_notice(&self) -> String {
        format!("{} not found", self.config.media_dir.display())
    }

    /// List the media directory. `None` means it does not exist.
    pub fn scan(&self) -> Result<Option<CandidateIndex>, AssignError> {
        let scanned = CandidateIndex::scan(&self.config.media_dir)?;
        if scanned.is_none() {
            warn!(path = %self.config.media_dir.display(), "Media directory not found");
        }
        Ok(scanned)
    }

    /// Run the full scan, match and save pass against `store`.
    ///
    /// A store error aborts the run; records saved before it stay saved.
    pub async fn run<S: RecordStore>(&self, store: &S) -> Result<AssignReport, AssignError> {
        let scanned = self.scan()?;
        self.assign(scanned, store).await
    }

    /// Match and save against the result of an earlier [`scan`](Self::scan).
    pub async fn assign<S: RecordStore>(
        &self,
        scanned: Option<CandidateIndex>,
        store: &S,
    ) -> Result<AssignReport, AssignError> {
        let media_dir = &self.config.media_dir;
        let directory_found = scanned.is_some();
        let index = scanned.unwrap_or_default();

        info!(
            path = %media_dir.display(),
            candidates = index.candidates(),
            dry_run = self.config.dry_run,
            "Starting image assignment"
        );

        let records = store.list_all().await.map_err(AssignError::LoadRecords)?;
        let records_scanned = records.len();
        let mut assignments = Vec::new();

        for mut record in records {
            let Some(filename) = index.lookup(record.name()) else {
                continue;
            };

            let image = relative_image_path(&self.config.image_prefix, filename);
            let previous = record.image().map(str::to_string);
            record.set_image(image.clone());

            if !self.config.dry_run {
                store
                    .save(&record)
                    .await
                    .map_err(|source| AssignError::SaveRecord {
                        id: record.id(),
                        name: record.name().to_string(),
                        source,
                    })?;
            }

            debug!(id = record.id(), name = %record.name(), image = %image, "Assigned image");
            assignments.push(Assignment {
                record_id: record.id(),
                name: record.name().to_string(),
                image,
                previous,
            });
        }

        let report = AssignReport {
            media_dir: media_dir.display().to_string(),
            directory_found,
            candidates: index.candidates(),
            collisions: index.collisions(),
            records_scanned,
            updated: assignments.len(),
            dry_run: self.config.dry_run,
            assignments,
        };

        info!(
            records = report.records_scanned,
            updated = report.updated,
            collisions = report.collisions,
            "Image assignment completed"
        );

        Ok(report)
    }
}
