//! Helper functions to generate GOLD path tables for testing
//!
//! Every generated table has a leading row-key column, like the published
//! GOLD ecosystem classification workbook.

use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Path position headers of the GOLD ecosystem classification
pub const GOLD_HEADERS: [&str; 5] = [
    "ECOSYSTEM",
    "ECOSYSTEM CATEGORY",
    "ECOSYSTEM TYPE",
    "ECOSYSTEM SUBTYPE",
    "SPECIFIC ECOSYSTEM",
];

/// Abstract five-row scenario used across the compiler tests
pub fn scenario_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["a1", "b1", "c1", "d1", "e1"],
        vec!["a1", "b2", "c2", "d2", "e2"],
        vec!["a2", "b3", "c3", "d3", "e3"],
        vec!["a2", "b3", "c3", "d2", "e4"],
        vec!["a3", "b4", "c4", "d4", "e5"],
    ]
}

/// A few real GOLD paths
pub fn gold_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["Environmental", "Aquatic", "Marine", "Oceanic", "Abyssal plane"],
        vec!["Environmental", "Aquatic", "Marine", "Oceanic", "Aphotic zone"],
        vec!["Environmental", "Aquatic", "Freshwater", "Lake", "Unclassified"],
        vec!["Environmental", "Terrestrial", "Soil", "Loam", "Agricultural land"],
        vec!["Host-associated", "Plants", "Roots", "Rhizosphere", "Soil"],
        vec!["Engineered", "Wastewater", "Activated Sludge", "Unclassified", "Unclassified"],
    ]
}

/// Write `rows` under `headers` to the first worksheet of a new workbook,
/// preceded by a numeric row-key column
pub fn create_gold_workbook(
    path: &Path,
    headers: &[&str],
    rows: &[Vec<&str>],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("GOLD")?;
    write_sheet(sheet, headers, rows)?;
    workbook.save(path)?;
    Ok(())
}

/// Write a workbook whose first worksheet is a cover sheet and whose second
/// worksheet, named `sheet_name`, holds the table
pub fn create_workbook_with_cover(
    path: &Path,
    sheet_name: &str,
    headers: &[&str],
    rows: &[Vec<&str>],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let cover = workbook.add_worksheet();
    cover.set_name("About")?;
    cover.write(0, 0, "GOLD ecosystem classification export")?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;
    write_sheet(sheet, headers, rows)?;
    workbook.save(path)?;
    Ok(())
}

fn write_sheet(
    sheet: &mut rust_xlsxwriter::Worksheet,
    headers: &[&str],
    rows: &[Vec<&str>],
) -> Result<(), Box<dyn std::error::Error>> {
    let header_format = Format::new().set_bold();
    sheet.write_with_format(0, 0, "ID", &header_format)?;
    for (col, header) in (1u16..).zip(headers) {
        sheet.write_with_format(0, col, *header, &header_format)?;
    }

    for (row_idx, row) in (1u32..).zip(rows) {
        sheet.write_number(row_idx, 0, f64::from(row_idx))?;
        for (col, value) in (1u16..).zip(row) {
            if !value.is_empty() {
                sheet.write(row_idx, col, *value)?;
            }
        }
    }
    Ok(())
}

/// Write the same table as CSV (with a row-key column)
pub fn create_gold_csv(
    path: &Path,
    headers: &[&str],
    rows: &[Vec<&str>],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header_row = vec!["ID"];
    header_row.extend_from_slice(headers);
    writer.write_record(&header_row)?;
    for (idx, row) in rows.iter().enumerate() {
        let key = (idx + 1).to_string();
        let mut record = vec![key.as_str()];
        record.extend(row.iter().copied());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
