//! Local files used by a run: the fixtures, the downloaded copy, and the
//! upload form built from them.

use crate::error::{StepError, StepResult};
use reqwest::multipart::{Form, Part};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const MOD_FIXTURE: &str = "test_mod.gz";
pub const THUMBNAIL_FIXTURE: &str = "test_thumbnail.png";
pub const DOWNLOADED_MOD: &str = "downloaded_mod.gz";

pub const MOD_CONTENT: &str = "Test mod content";
pub const THUMBNAIL_CONTENT: &str = "Test thumbnail content";

/// Filenames the server sees for the two file parts
pub const THUMBNAIL_UPLOAD_NAME: &str = "thumbnail.png";
pub const MOD_UPLOAD_NAME: &str = "mod.gz";

/// Removal order used by cleanup
pub const CLEANUP_FILES: [&str; 3] = [MOD_FIXTURE, DOWNLOADED_MOD, THUMBNAIL_FIXTURE];

/// Write both fixture files into `dir`, returning their names.
pub fn create_fixtures(dir: &Path) -> StepResult<Vec<&'static str>> {
    let mut created = Vec::new();
    for (name, content) in [(MOD_FIXTURE, MOD_CONTENT), (THUMBNAIL_FIXTURE, THUMBNAIL_CONTENT)] {
        let path = dir.join(name);
        std::fs::write(&path, content).map_err(|e| StepError::io(&path, e))?;
        log::debug!("created fixture {}", path.display());
        created.push(name);
    }
    Ok(created)
}

/// Plain fields of an upload
#[derive(Debug, Clone)]
pub struct UploadFields {
    pub id: String,
    pub title: String,
    pub version: String,
}

impl UploadFields {
    pub fn describe(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "title": self.title,
            "version": self.version,
            "files": [THUMBNAIL_UPLOAD_NAME, MOD_UPLOAD_NAME],
        })
    }
}

/// Build the multipart form for `POST /upload` from the fixtures in `dir`.
///
/// Fixture handles live only inside [`read_fixture`], so they are closed
/// before this returns, whether it succeeds or not.
pub fn build_upload_form(dir: &Path, fields: &UploadFields) -> StepResult<Form> {
    let thumbnail = read_fixture(&dir.join(THUMBNAIL_FIXTURE))?;
    let package = read_fixture(&dir.join(MOD_FIXTURE))?;

    Ok(Form::new()
        .text("id", fields.id.clone())
        .text("title", fields.title.clone())
        .text("version", fields.version.clone())
        .part("thumbnail", Part::bytes(thumbnail).file_name(THUMBNAIL_UPLOAD_NAME))
        .part("file", Part::bytes(package).file_name(MOD_UPLOAD_NAME)))
}

fn read_fixture(path: &Path) -> StepResult<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| StepError::io(path, e))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| StepError::io(path, e))?;
    Ok(buf)
}

/// Persist downloaded bytes as [`DOWNLOADED_MOD`] in `dir`.
pub fn write_download(dir: &Path, bytes: &[u8]) -> StepResult<PathBuf> {
    let path = dir.join(DOWNLOADED_MOD);
    std::fs::write(&path, bytes).map_err(|e| StepError::io(&path, e))?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// Byte-level comparison of the fixture and the downloaded copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub original_size: usize,
    pub downloaded_size: usize,
    pub matches: bool,
}

impl Comparison {
    pub fn of(original: &[u8], downloaded: &[u8]) -> Self {
        Self {
            original_size: original.len(),
            downloaded_size: downloaded.len(),
            matches: original == downloaded,
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "original_size": self.original_size,
            "downloaded_size": self.downloaded_size,
            "match": self.matches,
        })
    }
}

pub fn compare_download(dir: &Path) -> StepResult<Comparison> {
    let original_path = dir.join(MOD_FIXTURE);
    let downloaded_path = dir.join(DOWNLOADED_MOD);
    let original = std::fs::read(&original_path).map_err(|e| StepError::io(&original_path, e))?;
    let downloaded =
        std::fs::read(&downloaded_path).map_err(|e| StepError::io(&downloaded_path, e))?;
    Ok(Comparison::of(&original, &downloaded))
}

/// Remove whichever of [`CLEANUP_FILES`] exist in `dir`.
pub fn remove_artifacts(dir: &Path) -> StepResult<Vec<String>> {
    let mut removed = Vec::new();
    for name in CLEANUP_FILES {
        let path = dir.join(name);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| StepError::io(&path, e))?;
            log::debug!("removed {}", path.display());
            removed.push(name.to_string());
        }
    }
    Ok(removed)
}
