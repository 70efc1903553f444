//! Parquet storage for daily bars and move exports

use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Int64Array, StringArray, UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::types::DataError;
use crate::analysis::{DailyBar, Move};

const PARQUET_EXTENSION: &str = "parquet";

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

fn to_date32(date: NaiveDate) -> i32 {
    (date - epoch()).num_days() as i32
}

fn from_date32(days: i32) -> Result<NaiveDate, DataError> {
    epoch()
        .checked_add_signed(Duration::days(days as i64))
        .ok_or(DataError::InvalidDate(days))
}

fn writer_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn column<'a, T: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T, DataError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| DataError::InvalidColumn(name.to_string()))
}

fn parse_decimal(column: &str, value: &str) -> Result<Decimal, DataError> {
    Decimal::from_str(value).map_err(|_| DataError::InvalidDecimal {
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Daily bar schema: prices stored as strings for Decimal precision
pub fn daily_bar_schema() -> Schema {
    Schema::new(vec![
        Field::new("date", DataType::Date32, false),
        Field::new("open", DataType::Utf8, false),
        Field::new("high", DataType::Utf8, false),
        Field::new("low", DataType::Utf8, false),
        Field::new("close", DataType::Utf8, false),
        Field::new("volume", DataType::UInt64, false),
    ])
}

/// Move export schema
pub fn move_schema() -> Schema {
    Schema::new(vec![
        Field::new("ticker", DataType::Utf8, false),
        Field::new("exchange", DataType::Utf8, true),
        Field::new("start_date", DataType::Date32, false),
        Field::new("end_date", DataType::Date32, false),
        Field::new("start_price", DataType::Utf8, false),
        Field::new("peak_price", DataType::Utf8, false),
        Field::new("growth_percentage", DataType::Utf8, false),
        Field::new("duration_days", DataType::Int64, false),
        Field::new("superperformance", DataType::Utf8, false),
        Field::new("drawdowns", DataType::Utf8, false),
        Field::new("continuation", DataType::Boolean, false),
        Field::new("termination_reason", DataType::Utf8, true),
    ])
}

/// One Parquet file of daily bars per ticker
#[derive(Debug, Clone)]
pub struct BarStore {
    dir: PathBuf,
}

impl BarStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a ticker
    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", ticker, PARQUET_EXTENSION))
    }

    /// Tickers with a stored file, sorted
    pub fn list_tickers(&self) -> Result<Vec<String>, DataError> {
        let mut tickers = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PARQUET_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                tickers.push(stem.to_string());
            }
        }
        tickers.sort();
        Ok(tickers)
    }

    /// Write (replace) a ticker's bars
    pub fn write_bars(&self, ticker: &str, bars: &[DailyBar]) -> Result<PathBuf, DataError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(ticker);
        let schema = Arc::new(daily_bar_schema());
        let file = File::create(&path)?;
        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(writer_props()))?;

        let dates: Vec<i32> = bars.iter().map(|b| to_date32(b.date)).collect();
        let opens: Vec<String> = bars.iter().map(|b| b.open.to_string()).collect();
        let highs: Vec<String> = bars.iter().map(|b| b.high.to_string()).collect();
        let lows: Vec<String> = bars.iter().map(|b| b.low.to_string()).collect();
        let closes: Vec<String> = bars.iter().map(|b| b.close.to_string()).collect();
        let volumes: Vec<u64> = bars.iter().map(|b| b.volume).collect();

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Date32Array::from(dates)) as ArrayRef,
                Arc::new(StringArray::from(opens)) as ArrayRef,
                Arc::new(StringArray::from(highs)) as ArrayRef,
                Arc::new(StringArray::from(lows)) as ArrayRef,
                Arc::new(StringArray::from(closes)) as ArrayRef,
                Arc::new(UInt64Array::from(volumes)) as ArrayRef,
            ],
        )?;

        writer.write(&batch)?;
        writer.close()?;

        tracing::debug!(ticker, path = ?path, count = bars.len(), "Wrote daily bars to Parquet");

        Ok(path)
    }

    /// Read a ticker's bars in file order
    pub fn read_bars(&self, ticker: &str) -> Result<Vec<DailyBar>, DataError> {
        let path = self.path_for(ticker);
        if !path.exists() {
            return Err(DataError::NotFound(ticker.to_string()));
        }

        let file = File::open(&path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let mut bars = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;

            let dates = column::<Date32Array>(&batch, "date")?;
            let opens = column::<StringArray>(&batch, "open")?;
            let highs = column::<StringArray>(&batch, "high")?;
            let lows = column::<StringArray>(&batch, "low")?;
            let closes = column::<StringArray>(&batch, "close")?;
            let volumes = column::<UInt64Array>(&batch, "volume")?;

            for i in 0..batch.num_rows() {
                bars.push(DailyBar {
                    date: from_date32(dates.value(i))?,
                    open: parse_decimal("open", opens.value(i))?,
                    high: parse_decimal("high", highs.value(i))?,
                    low: parse_decimal("low", lows.value(i))?,
                    close: parse_decimal("close", closes.value(i))?,
                    volume: volumes.value(i),
                });
            }
        }

        Ok(bars)
    }
}

/// Write moves to a single Parquet file
pub fn write_moves(path: &Path, moves: &[Move]) -> Result<(), DataError> {
    if moves.is_empty() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let schema = Arc::new(move_schema());
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(writer_props()))?;

    let tickers: Vec<&str> = moves.iter().map(|m| m.ticker.as_str()).collect();
    let exchanges: Vec<Option<&str>> = moves.iter().map(|m| m.exchange.as_deref()).collect();
    let starts: Vec<i32> = moves.iter().map(|m| to_date32(m.start_date)).collect();
    let ends: Vec<i32> = moves.iter().map(|m| to_date32(m.end_date)).collect();
    let start_prices: Vec<String> = moves.iter().map(|m| m.start_price.to_string()).collect();
    let peak_prices: Vec<String> = moves.iter().map(|m| m.peak_price.to_string()).collect();
    let growth: Vec<String> = moves
        .iter()
        .map(|m| m.growth_percentage.round_dp(4).to_string())
        .collect();
    let durations: Vec<i64> = moves.iter().map(|m| m.duration_days).collect();
    let classes: Vec<String> = moves.iter().map(|m| m.superperformance.to_string()).collect();
    let drawdowns: Vec<String> = moves
        .iter()
        .map(|m| {
            m.drawdowns
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    let continuation: Vec<bool> = moves.iter().map(|m| m.continuation).collect();
    let reasons: Vec<Option<String>> = moves
        .iter()
        .map(|m| m.termination_reason.as_ref().map(|r| r.to_string()))
        .collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(tickers)) as ArrayRef,
            Arc::new(StringArray::from(exchanges)) as ArrayRef,
            Arc::new(Date32Array::from(starts)) as ArrayRef,
            Arc::new(Date32Array::from(ends)) as ArrayRef,
            Arc::new(StringArray::from(start_prices)) as ArrayRef,
            Arc::new(StringArray::from(peak_prices)) as ArrayRef,
            Arc::new(StringArray::from(growth)) as ArrayRef,
            Arc::new(Int64Array::from(durations)) as ArrayRef,
            Arc::new(StringArray::from(classes)) as ArrayRef,
            Arc::new(StringArray::from(drawdowns)) as ArrayRef,
            Arc::new(BooleanArray::from(continuation)) as ArrayRef,
            Arc::new(StringArray::from(reasons)) as ArrayRef,
        ],
    )?;

    writer.write(&batch)?;
    writer.close()?;

    tracing::debug!(path = ?path, count = moves.len(), "Wrote moves to Parquet");

    Ok(())
}
