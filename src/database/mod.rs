use crate::{
    data_types::{progress::ProgressTable, segment::SegmentTable},
    error::AppResult,
    util::settings::{Secrets, Settings, SourceKind},
};

pub mod files;
pub mod memory;
pub mod rows;
pub mod sheets;

/// Read-only access to the two challenge tables.
pub trait ChallengeSource: Send + Sync {
    fn fetch_progress(&self) -> AppResult<ProgressTable>;

    fn fetch_segments(&self) -> AppResult<SegmentTable>;
}

pub fn source_from_settings(settings: &Settings) -> AppResult<Box<dyn ChallengeSource>> {
    let source = &settings.source;

    Ok(match source.kind {
        SourceKind::GoogleSheets => Box::new(sheets::GoogleSheetsSource::new(
            source,
            Secrets::load()?.api_key,
        )),
        SourceKind::JsonFiles => Box::new(files::JsonFileSource::new(
            source.progress_path.clone(),
            source.segments_path.clone(),
        )),
    })
}
