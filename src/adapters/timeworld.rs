use crate::domain::model::WatchRemnant;
use crate::domain::ports::StockSource;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use calamine::{Data, Reader, Xls};
use reqwest::Client;
use std::io::{Cursor, Read};

const CODE_COLUMN: &str = "Код";
const QUANTITY_COLUMN: &str = "Количество";
const PRICE_COLUMN: &str = "Цена";

/// Inventory source backed by the timeworld.ru stock export.
///
/// The site publishes a zip archive containing a single `.xls` sheet
/// with a multi-row preamble before the column headers.
pub struct TimeworldSource {
    client: Client,
    stock_url: String,
}

impl TimeworldSource {
    pub fn new(stock_url: &str) -> Self {
        Self {
            client: Client::new(),
            stock_url: stock_url.to_string(),
        }
    }

    async fn fetch_archive(&self) -> Result<Vec<u8>> {
        tracing::debug!("Downloading stock archive from {}", self.stock_url);
        let response = self
            .client
            .get(&self.stock_url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl StockSource for TimeworldSource {
    async fn fetch_remnants(&self) -> Result<Vec<WatchRemnant>> {
        let archive = self.fetch_archive().await?;
        let workbook = extract_workbook(&archive)?;
        parse_workbook(workbook)
    }
}

/// Pull the spreadsheet out of the downloaded zip archive.
fn extract_workbook(archive: &[u8]) -> Result<Vec<u8>> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive))?;

    let index = (0..zip.len())
        .find(|&i| {
            zip.by_index(i)
                .map(|entry| entry.name().ends_with(".xls"))
                .unwrap_or(false)
        })
        .ok_or_else(|| SyncError::ProcessingError {
            message: "Stock archive contains no .xls entry".to_string(),
        })?;

    let mut entry = zip.by_index(index)?;
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;
    Ok(data)
}

fn parse_workbook(data: Vec<u8>) -> Result<Vec<WatchRemnant>> {
    let mut workbook = Xls::new(Cursor::new(data))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SyncError::ProcessingError {
            message: "Stock workbook has no sheets".to_string(),
        })??;

    remnants_from_rows(range.rows())
}

/// Build remnants from sheet rows.
///
/// The export starts with a preamble (supplier details, export date);
/// the real table begins at the row holding the `Код` header. Rows
/// with an empty code cell are dividers or totals and are skipped.
fn remnants_from_rows<'a, I>(rows: I) -> Result<Vec<WatchRemnant>>
where
    I: Iterator<Item = &'a [Data]>,
{
    let mut columns: Option<(usize, usize, usize)> = None;
    let mut remnants = Vec::new();

    for row in rows {
        match columns {
            None => {
                if let Some(found) = find_columns(row) {
                    columns = Some(found);
                }
            }
            Some((code_col, quantity_col, price_col)) => {
                let code = cell_to_string(row.get(code_col));
                if code.is_empty() {
                    continue;
                }
                remnants.push(WatchRemnant {
                    code,
                    quantity: cell_to_string(row.get(quantity_col)),
                    price: cell_to_string(row.get(price_col)),
                });
            }
        }
    }

    if columns.is_none() {
        return Err(SyncError::ProcessingError {
            message: format!("Stock sheet has no '{}' header row", CODE_COLUMN),
        });
    }

    tracing::debug!("Parsed {} remnant rows", remnants.len());
    Ok(remnants)
}

fn find_columns(row: &[Data]) -> Option<(usize, usize, usize)> {
    let position = |name: &str| {
        row.iter()
            .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
    };
    Some((
        position(CODE_COLUMN)?,
        position(QUANTITY_COLUMN)?,
        position(PRICE_COLUMN)?,
    ))
}

fn cell_to_string(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.trim().to_string(),
        // Numeric codes come back as floats; render them without ".0"
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{}", *f as i64),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
