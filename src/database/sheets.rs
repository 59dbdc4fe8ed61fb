use curl::easy::{Easy, List};

use crate::{
    data_types::{progress::ProgressTable, segment::SegmentTable},
    error::{AppError, AppResult},
    logln, logvbln,
    util::{settings::SourceSettings, time::Benchmark},
};

use super::{
    files::SheetValues,
    rows::{parse_progress, parse_segments, Rows},
    ChallengeSource,
};

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets/";
const TIMEOUT_SECS: u64 = 20;

/// Reads both tables from one Google spreadsheet with an API key.
pub struct GoogleSheetsSource {
    file_id: String,
    api_key: String,
    progress_sheet: String,
    segments_sheet: String,
    cell_range: String,
}

impl GoogleSheetsSource {
    const CC: &str = "GoogleSheetsSource";

    pub fn new(settings: &SourceSettings, api_key: String) -> Self {
        Self {
            file_id: settings.file_id.clone(),
            api_key,
            progress_sheet: settings.progress_sheet.clone(),
            segments_sheet: settings.segments_sheet.clone(),
            cell_range: settings.cell_range.clone(),
        }
    }

    /// `values.get` URL for `sheet`. Sheet names may be Cyrillic, so they are percent-encoded.
    pub fn values_url(&self, sheet: &str) -> String {
        let mut handle = Easy::new();
        let range = handle.url_encode(format!("{}!{}", sheet, self.cell_range).as_bytes());
        let key = handle.url_encode(self.api_key.as_bytes());

        format!(
            "{}{}/values/{}?key={}",
            SHEETS_BASE_URL, self.file_id, range, key
        )
    }

    fn get_request(url: &str) -> AppResult<(u32, Vec<u8>)> {
        let mut handle = Easy::new();
        let mut list = List::new();

        list.append("Accept: application/json")?;
        handle.http_headers(list)?;
        handle.get(true)?;
        handle.timeout(std::time::Duration::from_secs(TIMEOUT_SECS))?;
        handle.url(url)?;

        let mut buffer_response = Vec::new();
        {
            let mut transfer = handle.transfer();
            transfer.write_function(|data| {
                buffer_response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        Ok((handle.response_code()?, buffer_response))
    }

    /// Turns an HTTP answer into sheet values, surfacing the API's own error message.
    pub(crate) fn verify_if_error(status: u32, body: &[u8]) -> AppResult<SheetValues> {
        let json: serde_json::Value = match serde_json::from_slice(body) {
            Ok(json) => json,
            Err(err) if status < 400 => return Err(err.into()),
            Err(_) => {
                return Err(AppError::Remote {
                    status,
                    message: String::from_utf8_lossy(body).into_owned(),
                })
            }
        };

        if let Some(error) = json.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());

            return Err(AppError::Remote { status, message });
        }

        if status >= 400 {
            return Err(AppError::Remote {
                status,
                message: json.to_string(),
            });
        }

        Ok(serde_json::from_value(json)?)
    }

    fn fetch(&self, table: &'static str, sheet: &str) -> AppResult<Rows> {
        let _bench = Benchmark::start("sheet fetch");
        logvbln!("Fetching {} from sheet '{}'", table, sheet);

        let (status, body) = GoogleSheetsSource::get_request(&self.values_url(sheet))?;
        let values = GoogleSheetsSource::verify_if_error(status, &body).map_err(|err| {
            logln!("Fetching '{}' failed: {}", sheet, err);
            err
        })?;

        Ok(Rows::from_json(table, values.values))
    }
}

impl ChallengeSource for GoogleSheetsSource {
    fn fetch_progress(&self) -> AppResult<ProgressTable> {
        parse_progress(&self.fetch("progress", &self.progress_sheet)?)
    }

    fn fetch_segments(&self) -> AppResult<SegmentTable> {
        parse_segments(&self.fetch("segments", &self.segments_sheet)?)
    }
}
