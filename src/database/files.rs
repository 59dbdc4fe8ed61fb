use std::path::{Path, PathBuf};

use serde_derive::Deserialize;
use serde_json::Value;

use crate::{
    data_types::{progress::ProgressTable, segment::SegmentTable},
    error::AppResult,
    logvbln,
};

use super::{
    rows::{parse_progress, parse_segments, Rows},
    ChallengeSource,
};

/// Same shape as a Sheets `values.get` response, so an export can be dropped in as is.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct SheetValues {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

pub struct JsonFileSource {
    progress_path: PathBuf,
    segments_path: PathBuf,
}

impl JsonFileSource {
    const CC: &str = "JsonFileSource";

    pub fn new(progress_path: PathBuf, segments_path: PathBuf) -> Self {
        Self {
            progress_path,
            segments_path,
        }
    }

    fn read(&self, table: &'static str, path: &Path) -> AppResult<Rows> {
        logvbln!("Reading {} from {}", table, path.display());

        let content = std::fs::read_to_string(path)?;
        let sheet: SheetValues = serde_json::from_str(&content)?;

        Ok(Rows::from_json(table, sheet.values))
    }
}

impl ChallengeSource for JsonFileSource {
    fn fetch_progress(&self) -> AppResult<ProgressTable> {
        parse_progress(&self.read("progress", &self.progress_path)?)
    }

    fn fetch_segments(&self) -> AppResult<SegmentTable> {
        parse_segments(&self.read("segments", &self.segments_path)?)
    }
}
