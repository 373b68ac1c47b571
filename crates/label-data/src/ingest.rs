//! CSV point ingestion for geolabel.
//!
//! Discovers and parses delimited point files into [`SamplePoint`] lists for
//! the annotation session. Rows are matched to columns by header name, so
//! column order does not matter; individually invalid rows are filtered
//! silently so operators can hand-edit files without strict pre-validation.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use label_core::error::{LabelError, Result};
use label_core::models::SamplePoint;
use tracing::{debug, warn};
use uuid::Uuid;

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Points path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Resolve the points directory: use `points_dir` when given, otherwise fall
/// back to `~/.geolabel/points`.
pub fn resolve_points_dir(points_dir: Option<&Path>) -> PathBuf {
    if let Some(p) = points_dir {
        return p.to_path_buf();
    }

    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".geolabel").join("points")
}

/// Read and parse a point file.
///
/// Unreadable content (missing file, bad encoding) is a structural failure
/// reported to the caller; the session is never handed a partial list.
pub fn load_points_file(path: &Path) -> Result<Vec<SamplePoint>> {
    let content = std::fs::read_to_string(path).map_err(|source| LabelError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_points(&content)
}

/// Parse delimited text into an ordered point list.
///
/// The first row names the columns; recognised names are `id`, `lat`, `lon`
/// and `note` (case-insensitive), extra columns are ignored. Rows survive in
/// input order when both coordinates are present and coerce to numbers;
/// everything else is dropped silently. Surviving rows without a usable id
/// get a randomly synthesized one.
pub fn parse_points(content: &str) -> Result<Vec<SamplePoint>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LabelError::CsvParse(e.to_string()))?
        .clone();
    let columns = ColumnMap::from_headers(&headers);

    let mut points: Vec<SamplePoint> = Vec::new();
    let mut rows_read = 0u64;
    let mut rows_dropped = 0u64;

    for record in reader.records() {
        let record = record.map_err(|e| LabelError::CsvParse(e.to_string()))?;
        rows_read += 1;
        match columns.map_record(&record) {
            Some(point) => points.push(point),
            None => rows_dropped += 1,
        }
    }

    debug!(
        rows_read,
        rows_dropped,
        points = points.len(),
        "parsed point rows"
    );

    Ok(points)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Header-name → column-index resolution for one parse.
struct ColumnMap {
    id: Option<usize>,
    lat: Option<usize>,
    lon: Option<usize>,
    note: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        Self {
            id: position("id"),
            lat: position("lat"),
            lon: position("lon"),
            note: position("note"),
        }
    }

    fn field<'r>(&self, record: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
        index.and_then(|i| record.get(i))
    }

    /// Map one data row to a point, or `None` when the row is dropped.
    fn map_record(&self, record: &StringRecord) -> Option<SamplePoint> {
        // Missing or empty coordinate fields drop the row before coercion.
        let lat_raw = self.field(record, self.lat).filter(|s| !s.is_empty())?;
        let lon_raw = self.field(record, self.lon).filter(|s| !s.is_empty())?;

        // Coercion failures (including literal NaN) drop the row.
        let lat = lat_raw.parse::<f64>().ok().filter(|v| !v.is_nan())?;
        let lon = lon_raw.parse::<f64>().ok().filter(|v| !v.is_nan())?;

        let id = match self.field(record, self.id).filter(|s| !s.is_empty()) {
            Some(id) => id.to_string(),
            None => synthesize_id(),
        };
        let note = self.field(record, self.note).unwrap_or("").to_string();

        Some(SamplePoint { id, lat, lon, note })
    }
}

/// Random session-unique id for rows that arrive without one.
///
/// Ids are drawn from a random source by policy; they must not be derivable
/// from row content.
fn synthesize_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
