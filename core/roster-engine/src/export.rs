//! FILENAME: core/roster-engine/src/export.rs
//! PURPOSE: Export adapters - CSV text and a printable HTML document.
//! CONTEXT: Pure string builders over an already-filtered (or selected)
//! record set. Triggering the actual download or print dialog is the
//! shell's job. The CSV output is the one byte-exact external contract:
//! UTF-8 with BOM, comma-delimited, every cell quoted, internal quotes
//! doubled, rows joined by `\n`.

use chrono::NaiveDateTime;
use engine::{FieldDescriptor, Record};

/// Printable documents include only the first N columns so a page stays
/// legible.
pub const PRINT_FIELD_LIMIT: usize = 10;

/// Byte-order mark prefixed to CSV output so spreadsheet applications detect
/// UTF-8 instead of guessing a legacy encoding.
const BOM: char = '\u{feff}';

fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Renders records as CSV: a header row built from field labels, then one
/// row per record with every value resolved through the dual-key accessor.
pub fn to_csv(records: &[Record], fields: &[FieldDescriptor]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    let header: Vec<String> = fields.iter().map(|f| csv_cell(f.label)).collect();
    lines.push(header.join(","));
    for record in records {
        let row: Vec<String> = fields
            .iter()
            .map(|f| csv_cell(&record.text(f.key)))
            .collect();
        lines.push(row.join(","));
    }
    format!("{}{}", BOM, lines.join("\n"))
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders a self-contained printable HTML document: title, generation
/// timestamp, and a table over the first `PRINT_FIELD_LIMIT` columns.
/// Empty cells print as `-`.
pub fn to_printable_document(
    records: &[Record],
    fields: &[FieldDescriptor],
    title: &str,
    generated_at: NaiveDateTime,
) -> String {
    let print_fields = &fields[..fields.len().min(PRINT_FIELD_LIMIT)];

    let mut out = String::new();
    out.push_str("<html>\n<head>\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str("body { font-family: sans-serif; padding: 20px; }\n");
    out.push_str("table { width: 100%; border-collapse: collapse; font-size: 12px; }\n");
    out.push_str("th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n");
    out.push_str("th { background: #f5f5f5; font-weight: bold; }\n");
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    out.push_str(&format!(
        "<p>Generated: {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str("<table>\n<thead>\n<tr>");
    for f in print_fields {
        out.push_str(&format!("<th>{}</th>", html_escape(f.label)));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for record in records {
        out.push_str("<tr>");
        for f in print_fields {
            let value = record.text(f.key);
            let cell = if value.is_empty() { "-".to_string() } else { html_escape(&value) };
            out.push_str(&format!("<td>{}</td>", cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::DISPATCH_FIELDS;

    fn name_and_wage_fields() -> Vec<FieldDescriptor> {
        DISPATCH_FIELDS
            .iter()
            .filter(|f| f.key == "fullName" || f.key == "hourlyWage")
            .copied()
            .collect()
    }

    #[test]
    fn test_csv_starts_with_bom_and_header() {
        let fields = name_and_wage_fields();
        let out = to_csv(&[], &fields);
        assert!(out.starts_with('\u{feff}'));
        assert_eq!(&out[3..], "\"氏名\",\"時給\"");
    }

    #[test]
    fn test_csv_doubles_internal_quotes() {
        let fields = name_and_wage_fields();
        let record = Record::new()
            .with("fullName", "He said \"hi\"")
            .with("hourlyWage", 1200);
        let out = to_csv(&[record], &fields);
        let row = out.lines().nth(1);
        assert_eq!(row, Some("\"He said \"\"hi\"\"\",\"1200\""));
    }

    #[test]
    fn test_csv_unescape_round_trip() {
        let fields = name_and_wage_fields();
        let original = "He said \"hi\"";
        let record = Record::new().with("fullName", original);
        let out = to_csv(&[record], &fields);
        let row = out.lines().nth(1);
        assert!(row.is_some());
        if let Some(row) = row {
            let first_cell = row.split("\",\"").next();
            assert!(first_cell.is_some());
            if let Some(cell) = first_cell {
                let unescaped = cell.trim_start_matches('"').replace("\"\"", "\"");
                assert_eq!(unescaped, original);
            }
        }
    }

    #[test]
    fn test_csv_resolves_storage_schema_values() {
        let fields = name_and_wage_fields();
        let record = Record::new().with("full_name", "鈴木").with("hourly_wage", 1450);
        let out = to_csv(&[record], &fields);
        assert_eq!(out.lines().nth(1), Some("\"鈴木\",\"1450\""));
    }

    #[test]
    fn test_printable_document_caps_columns() {
        let now = chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let record = Record::new().with("status", "現在");
        let doc = to_printable_document(&[record], DISPATCH_FIELDS, "Staff List", now);
        let header_cells = doc.matches("<th>").count();
        assert_eq!(header_cells, PRINT_FIELD_LIMIT);
        assert!(doc.contains("Generated: 2026-01-01 09:30"));
        // Empty cells render as a dash
        assert!(doc.contains("<td>-</td>"));
    }

    #[test]
    fn test_printable_document_escapes_markup() {
        let now = chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let record = Record::new().with("status", "<b>現在</b>");
        let doc = to_printable_document(&[record], DISPATCH_FIELDS, "a < b", now);
        assert!(doc.contains("&lt;b&gt;現在&lt;/b&gt;"));
        assert!(doc.contains("<h1>a &lt; b</h1>"));
    }
}
