use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

use crate::dataset::{Cell, Dataset};
use crate::records::{ProcessedReport, QueryRecord};

pub const CLEAN_SHEET: &str = "Семантическое ядро";
pub const FILTERED_SHEET: &str = "Отфильтровано";
pub const WORDS_SHEET: &str = "Статистика слов";

// Report column labels, kept byte-for-byte from the original export format.
pub const RECORD_HEADERS: [&str; 12] = [
    "Query",
    "Относительный URL",
    "Полный URL",
    "Число слов в запросе",
    "position",
    "Demand",
    "Shows",
    "Сум. показов",
    "Сум. частотность",
    "Ср. число кликов",
    "Сум. кликов",
    "CTR",
];

/// Reads the first worksheet of an xlsx/xls workbook into a [`Dataset`].
/// The first row is the header. Missing or locked files are terminal.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        anyhow::bail!("Input file not found at {:?}", path);
    }

    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {path:?} (is it open in Excel?)"))?;
    let range = workbook
        .worksheet_range_at(0)
        .context("Workbook has no worksheets")?
        .context("Failed to read the first worksheet")?;

    let mut rows_iter = range.rows();
    let header = rows_iter.next().context("Input report is empty")?;
    let columns: Vec<String> = header
        .iter()
        .map(|cell| data_to_cell(cell).as_text().trim().to_string())
        .collect();
    let rows: Vec<Vec<Cell>> = rows_iter
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();

    info!(
        action = "complete",
        component = "workbook_load",
        file_path = ?path,
        row_count = rows.len(),
        column_count = columns.len(),
        "Loaded input report"
    );
    Ok(Dataset { columns, rows })
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Writes the three report sheets. The URL-like sheet is omitted entirely
/// when that partition is empty.
pub fn save_report(path: &Path, report: &ProcessedReport) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(CLEAN_SHEET)?;
        write_record_sheet(sheet, &report.clean, &header_format)?;
    }

    if !report.filtered.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(FILTERED_SHEET)?;
        write_record_sheet(sheet, &report.filtered, &header_format)?;
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(WORDS_SHEET)?;
        sheet.write_string_with_format(0, 0, "Слово", &header_format)?;
        sheet.write_string_with_format(0, 1, "Количество", &header_format)?;
        for (i, word_count) in report.words.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string(row, 0, word_count.word.as_str())?;
            sheet.write_number(row, 1, word_count.count as f64)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save report to {path:?} (is it open in Excel?)"))?;

    info!(
        action = "complete",
        component = "workbook_save",
        file_path = ?path,
        clean_count = report.clean.len(),
        filtered_count = report.filtered.len(),
        "Report saved"
    );
    Ok(())
}

fn write_record_sheet(
    sheet: &mut Worksheet,
    records: &[QueryRecord],
    header_format: &Format,
) -> Result<()> {
    for (col, name) in RECORD_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, record.query.as_str())?;
        sheet.write_string(row, 1, record.relative_url.as_str())?;
        sheet.write_string(row, 2, record.full_url.as_str())?;
        sheet.write_number(row, 3, record.word_count as f64)?;
        sheet.write_number(row, 4, record.avg_position)?;
        sheet.write_number(row, 5, record.avg_demand)?;
        sheet.write_number(row, 6, record.avg_shows)?;
        sheet.write_number(row, 7, record.sum_shows)?;
        sheet.write_number(row, 8, record.sum_demand)?;
        sheet.write_number(row, 9, record.avg_clicks)?;
        sheet.write_number(row, 10, record.sum_clicks)?;
        sheet.write_number(row, 11, record.ctr)?;
    }
    Ok(())
}

/// Output file name incorporating the site domain and the current date.
pub fn output_file_name(domain: &str) -> String {
    let date = chrono::Local::now().format("%Y-%m-%d");
    format!("{domain}-webmaster-{date}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_name_contains_domain_and_extension() {
        let name = output_file_name("example.com");
        assert!(name.starts_with("example.com-webmaster-"));
        assert!(name.ends_with(".xlsx"));
    }

    #[test]
    fn data_conversion_keeps_numbers_and_text_apart() {
        assert_eq!(data_to_cell(&Data::Float(1.5)), Cell::Number(1.5));
        assert_eq!(data_to_cell(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(
            data_to_cell(&Data::String("Query".into())),
            Cell::Text("Query".into())
        );
        assert_eq!(data_to_cell(&Data::Empty), Cell::Empty);
    }
}
