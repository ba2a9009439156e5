//! Generic record-sequence table rendering.

use serde_json::Value;

use super::{escape, NO_DATA};
use crate::data::Record;

/// Render an ordered sequence of records as an HTML table fragment.
///
/// Column headers come from the first record's keys, in that record's own
/// iteration order; every record contributes one body row. Null and missing
/// values render as empty cells, everything else as its plain string form.
/// An empty sequence yields the [`NO_DATA`] placeholder and no table at all.
pub fn records_table(records: &[Record]) -> String {
    if records.is_empty() {
        return NO_DATA.to_string();
    }

    let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();

    let mut html = String::from(r#"<div class="table-wrap"><table><thead><tr>"#);
    for key in &keys {
        html.push_str("<th>");
        html.push_str(&escape(key));
        html.push_str("</th>");
    }
    html.push_str("</tr></thead><tbody>");

    for record in records {
        html.push_str("<tr>");
        for key in &keys {
            html.push_str("<td>");
            if let Some(value) = record.get(*key) {
                html.push_str(&escape(&cell_text(value)));
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}

/// Plain string form of a cell value: null becomes empty, strings lose their
/// quotes, everything else uses its JSON rendering.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
