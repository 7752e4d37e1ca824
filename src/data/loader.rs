use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Date32Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::error::DataError;
use super::model::{RentalDataset, RentalRecord, WeatherSituation};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a rental dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the canonical bike-share export with a header row
/// * `.json`    – records-oriented array, `df.to_json(orient='records')`
/// * `.parquet` – flat columns of the same names
///
/// Each format carries at least the columns `dteday` (YYYY-MM-DD), `hr`
/// (0–23), `weathersit` (1–4) and `cnt` (non-negative); anything else is
/// ignored. Validation failures abort the whole load, there is no partial
/// dataset.
pub fn load_file(path: &Path) -> Result<RentalDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Field validation shared by all loaders
// ---------------------------------------------------------------------------

/// Check the raw field values of one input row and build the record.
/// `row` is the 1-based data row used in error messages.
fn validate_fields(
    row: usize,
    date: NaiveDate,
    hour: i64,
    weather_code: i64,
    count: i64,
) -> Result<RentalRecord, DataError> {
    if !(0..=23).contains(&hour) {
        return Err(DataError::HourOutOfRange { row, hour });
    }
    let weather = WeatherSituation::from_code(weather_code, row)?;
    if count < 0 {
        return Err(DataError::NegativeCount { row, count });
    }
    Ok(RentalRecord {
        date,
        hour: hour as u8,
        weather,
        count: count as u32,
    })
}

fn parse_date(raw: &str, row: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Row {row}: 'dteday' value '{raw}' is not a YYYY-MM-DD date"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. The four required columns are
/// located by name; the bike-share export's extra columns (season, temp,
/// casual, registered, …) are skipped.
fn load_csv(path: &Path) -> Result<RentalDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let date_idx = headers
        .iter()
        .position(|h| h == "dteday")
        .context("CSV missing 'dteday' column")?;
    let hour_idx = headers
        .iter()
        .position(|h| h == "hr")
        .context("CSV missing 'hr' column")?;
    let weather_idx = headers
        .iter()
        .position(|h| h == "weathersit")
        .context("CSV missing 'weathersit' column")?;
    let count_idx = headers
        .iter()
        .position(|h| h == "cnt")
        .context("CSV missing 'cnt' column")?;

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.with_context(|| format!("CSV row {row}"))?;

        let date = parse_date(record.get(date_idx).unwrap_or(""), row)?;
        let hour = parse_int(record.get(hour_idx).unwrap_or(""), row, "hr")?;
        let weather_code = parse_int(record.get(weather_idx).unwrap_or(""), row, "weathersit")?;
        let count = parse_int(record.get(count_idx).unwrap_or(""), row, "cnt")?;

        records.push(validate_fields(row, date, hour, weather_code, count)?);
    }

    Ok(RentalDataset::from_records(records)?)
}

fn parse_int(s: &str, row: usize, col: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .with_context(|| format!("Row {row}, '{col}': '{s}' is not an integer"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One raw record of the records-oriented JSON export. Unknown keys are
/// ignored by serde, mirroring the CSV loader's extra-column tolerance.
#[derive(Debug, Deserialize)]
struct RawJsonRecord {
    dteday: String,
    hr: i64,
    weathersit: i64,
    cnt: i64,
}

/// Expected JSON schema:
///
/// ```json
/// [
///   { "dteday": "2011-01-01", "hr": 0, "weathersit": 1, "cnt": 16 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<RentalDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let raw: Vec<RawJsonRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    let mut records = Vec::with_capacity(raw.len());
    for (i, rec) in raw.iter().enumerate() {
        let row = i + 1;
        let date = parse_date(&rec.dteday, row)?;
        records.push(validate_fields(row, date, rec.hr, rec.weathersit, rec.cnt)?);
    }

    Ok(RentalDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing rental data.
///
/// Expected schema (flat columns, as written by both Pandas and Polars):
/// - `dteday`: Utf8 `YYYY-MM-DD` strings or Date32
/// - `hr`, `weathersit`, `cnt`: Int32 or Int64
fn load_parquet(path: &Path) -> Result<RentalDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let date_idx = schema
            .index_of("dteday")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'dteday' column"))?;
        let hour_idx = schema
            .index_of("hr")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'hr' column"))?;
        let weather_idx = schema
            .index_of("weathersit")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'weathersit' column"))?;
        let count_idx = schema
            .index_of("cnt")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'cnt' column"))?;

        let date_col = batch.column(date_idx);
        let hour_col = batch.column(hour_idx);
        let weather_col = batch.column(weather_idx);
        let count_col = batch.column(count_idx);

        for batch_row in 0..batch.num_rows() {
            row += 1;
            let date = extract_date(date_col, batch_row, row)?;
            let hour = extract_int(hour_col, batch_row, row, "hr")?;
            let weather_code = extract_int(weather_col, batch_row, row, "weathersit")?;
            let count = extract_int(count_col, batch_row, row, "cnt")?;

            records.push(validate_fields(row, date, hour, weather_code, count)?);
        }
    }

    Ok(RentalDataset::from_records(records)?)
}

// -- Parquet / Arrow helpers --

fn extract_date(col: &Arc<dyn Array>, batch_row: usize, row: usize) -> Result<NaiveDate> {
    if col.is_null(batch_row) {
        bail!("Row {row}: null value in 'dteday' column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            parse_date(arr.value(batch_row), row)
        }
        DataType::Date32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .context("expected Date32Array")?;
            arr.value_as_date(batch_row)
                .with_context(|| format!("Row {row}: 'dteday' value out of date range"))
        }
        other => bail!("Column 'dteday' has type {other:?}, expected Utf8 or Date32"),
    }
}

fn extract_int(col: &Arc<dyn Array>, batch_row: usize, row: usize, name: &str) -> Result<i64> {
    if col.is_null(batch_row) {
        bail!("Row {row}: null value in '{name}' column");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(batch_row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(batch_row))
        }
        other => bail!("Column '{name}' has type {other:?}, expected Int32 or Int64"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_loads_required_columns_and_ignores_extras() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "main_data.csv",
            "instant,dteday,season,hr,weathersit,temp,cnt\n\
             1,2011-01-01,1,0,1,0.24,16\n\
             2,2011-01-01,1,1,2,0.22,40\n\
             3,2011-01-02,1,5,3,0.20,7\n",
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.records[1],
            RentalRecord {
                date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
                hour: 1,
                weather: WeatherSituation::Mist,
                count: 40,
            }
        );
        assert_eq!(ds.first_date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(ds.last_date, NaiveDate::from_ymd_opt(2011, 1, 2).unwrap());
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", "dteday,hr,cnt\n2011-01-01,0,16\n");

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("weathersit"));
    }

    #[test]
    fn csv_with_headers_only_is_an_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.csv", "dteday,hr,weathersit,cnt\n");

        let err = load_file(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::EmptyDataset)
        );
    }

    #[test]
    fn out_of_domain_hour_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "hours.csv",
            "dteday,hr,weathersit,cnt\n2011-01-01,0,1,16\n2011-01-01,24,1,3\n",
        );

        let err = load_file(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::HourOutOfRange { row: 2, hour: 24 })
        );
    }

    #[test]
    fn unknown_weather_code_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "weather.csv",
            "dteday,hr,weathersit,cnt\n2011-01-01,0,5,16\n",
        );

        let err = load_file(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::UnknownWeatherCode { row: 1, code: 5 })
        );
    }

    #[test]
    fn negative_count_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "counts.csv",
            "dteday,hr,weathersit,cnt\n2011-01-01,0,1,-4\n",
        );

        let err = load_file(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::NegativeCount { row: 1, count: -4 })
        );
    }

    #[test]
    fn malformed_date_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "dates.csv",
            "dteday,hr,weathersit,cnt\n01/01/2011,0,1,16\n",
        );

        assert!(load_file(&path).is_err());
    }

    #[test]
    fn json_records_load_with_unknown_keys_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "main_data.json",
            r#"[
                {"dteday": "2011-01-01", "hr": 8, "weathersit": 1, "cnt": 50, "season": 1},
                {"dteday": "2011-01-01", "hr": 17, "weathersit": 2, "cnt": 90}
            ]"#,
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].hour, 17);
        assert_eq!(ds.records[1].count, 90);
    }

    #[test]
    fn parquet_flat_columns_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main_data.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("dteday", DataType::Utf8, false),
            Field::new("hr", DataType::Int64, false),
            Field::new("weathersit", DataType::Int64, false),
            Field::new("cnt", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["2011-01-01", "2011-01-02"])),
                Arc::new(Int64Array::from(vec![8, 17])),
                Arc::new(Int64Array::from(vec![1, 4])),
                Arc::new(Int64Array::from(vec![50, 90])),
            ],
        )
        .unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].hour, 8);
        assert_eq!(ds.records[1].weather, WeatherSituation::HeavyPrecipitation);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("main_data.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
