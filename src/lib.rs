use chrono::NaiveDate;

use data_types::{
    day::{ChallengeStatus, DayView},
    Meters,
};
use database::ChallengeSource;
use error::{AppError, AppResult};
use processors::{locator::SegmentLocator, map_builder::MapBuilder};
use util::{
    map_cache::{MapCache, MapKey},
    settings::Settings,
    time::Benchmark,
    DateTimeUtils,
};

pub mod data_types;
pub mod database;
pub mod error;
pub mod processors;
pub mod render;
pub mod util;

pub struct App {
    settings: Settings,
    source: Box<dyn ChallengeSource>,
    cache: MapCache,
}

impl App {
    const CC: &str = "App";

    pub fn new(settings: Settings, source: Box<dyn ChallengeSource>) -> Self {
        settings.apply_logging();

        Self {
            settings,
            source,
            cache: MapCache::new(),
        }
    }

    /// Builds the data source the settings ask for.
    pub fn from_settings(settings: Settings) -> AppResult<Self> {
        let source = database::source_from_settings(&settings)?;
        Ok(App::new(settings, source))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &MapCache {
        &self.cache
    }

    pub fn today(&self) -> NaiveDate {
        DateTimeUtils::today(self.settings.challenge.utc_offset_hours)
    }

    /// Selectable days: challenge start through today.
    pub fn available_dates(&self) -> AppResult<Vec<NaiveDate>> {
        Ok(DateTimeUtils::date_range(
            self.settings.start_date()?,
            self.today(),
        ))
    }

    pub fn progress_at(&self, date: NaiveDate) -> AppResult<Meters> {
        let progress = self.source.fetch_progress()?;
        SegmentLocator::progress_at(date, &progress)
    }

    pub fn day_view(&self, date: NaiveDate) -> AppResult<DayView> {
        let _bench = Benchmark::start("day view");

        let overall_m = self.progress_at(date)?;
        let segments = self.source.fetch_segments()?;

        let (segment_index, within_segment_m, status) =
            match SegmentLocator::locate_segment(overall_m, &segments) {
                Ok((_, index)) => (
                    index,
                    SegmentLocator::within_segment_progress(overall_m, index, &segments)?,
                    ChallengeStatus::Swimming,
                ),
                Err(AppError::ChallengeComplete { final_threshold, .. }) => {
                    logln!(
                        "{}: {} m swum, challenge of {} m is complete",
                        date,
                        overall_m,
                        final_threshold
                    );
                    let index = segments.len() - 1;
                    (index, segments.last().length_m, ChallengeStatus::Finished)
                }
                Err(err) => return Err(err),
            };

        let segment = segments
            .get(segment_index)
            .ok_or(AppError::SegmentIndexOutOfRange {
                index: segment_index,
                len: segments.len(),
            })?;

        let key = MapKey {
            date,
            segment_index,
            distance_m: overall_m,
        };
        let map = self.cache.get_or_try_insert_with(key, || {
            MapBuilder::new(&self.settings.map, &self.settings.challenge)
                .build(segment, within_segment_m)
        })?;

        Ok(DayView {
            date,
            overall_m,
            segment_index,
            segment_count: segments.len(),
            segment_length_m: segment.length_m,
            within_segment_m,
            remaining_m: segment.length_m.saturating_sub(within_segment_m),
            description: segment.description.clone(),
            status,
            map,
        })
    }

    /// Drops cached maps for one day, or all of them. Returns how many were removed.
    pub fn invalidate_cache(&self, date: Option<NaiveDate>) -> usize {
        match date {
            Some(date) => self.cache.invalidate_date(date),
            None => self.cache.clear(),
        }
    }
}
