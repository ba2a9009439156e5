//! HTML fragment rendering.
//!
//! Every renderer is a pure function from a data snapshot to an HTML string;
//! nothing here touches the page model or the network, so all of it is
//! testable in isolation. All dynamic text goes through [`escape`]: one
//! injection-safe path for headers, cells, station lines, and status text
//! alike.

mod live;
mod table;

pub use live::{messages_table, stations_list};
pub use table::records_table;

use crate::page::RegionSnapshot;

/// Placeholder fragment for empty table data.
pub const NO_DATA: &str = r#"<div class="small muted">No data</div>"#;

/// Escape text for safe use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a standalone console page from a set of region snapshots.
///
/// The result is a self-contained document (embedded stylesheet, no external
/// assets) that a browser can display straight from disk. Region content is
/// inserted as-is: it is markup already produced by the fragment renderers.
pub fn document(title: &str, regions: &[RegionSnapshot]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"2\">\n",
    );
    html.push_str("<title>");
    html.push_str(&escape(title));
    html.push_str("</title>\n<style>\n");
    html.push_str(STYLESHEET);
    html.push_str("</style>\n</head>\n<body>\n<h1>");
    html.push_str(&escape(title));
    html.push_str("</h1>\n");

    for region in regions {
        if let Some(label) = &region.label {
            html.push_str("<h2>");
            html.push_str(&escape(label));
            html.push_str("</h2>\n");
        }
        html.push_str("<div id=\"");
        html.push_str(&escape(&region.id));
        if !region.class.is_empty() {
            html.push_str("\" class=\"");
            html.push_str(&escape(&region.class));
        }
        html.push_str("\">");
        html.push_str(&region.html);
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

const STYLESHEET: &str = "\
body{font-family:system-ui,sans-serif;margin:24px;background:#fafafa;color:#222}
h1{font-size:18px}
h2{font-size:14px;margin:18px 0 6px}
table{border-collapse:collapse;font-size:13px}
th,td{border:1px solid #ddd;padding:4px 8px;text-align:left}
th{background:#f0f0f0}
.table-wrap{overflow-x:auto}
.small{font-size:12px}
.muted{color:#888}
.station-list{margin:0;padding-left:18px}
.health-ok{color:#1a7f37}
.health-warn{color:#b58900}
.health-bad{color:#c0392b}
";
