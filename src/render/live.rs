//! Live-feed fragment rendering: station list and message table.

use super::{escape, NO_DATA};
use crate::data::{SensorMessage, Station};

/// Empty-state fragment for the stations region.
const NO_STATIONS: &str = r#"<div class="small muted">Sin estaciones</div>"#;

/// Fixed columns of the live message table.
const MESSAGE_COLUMNS: [&str; 6] = ["Sensor", "Recorded", "Temp", "Humid", "AQI", "Lux"];

/// Render the recent-stations region: one "sensor id — last seen" line per
/// station, or a localized empty-state message.
pub fn stations_list(stations: &[Station]) -> String {
    if stations.is_empty() {
        return NO_STATIONS.to_string();
    }

    let mut html = String::from(r#"<ul class="station-list">"#);
    for station in stations {
        html.push_str("<li>");
        html.push_str(&escape(&station.sensor_id));
        if let Some(last_seen) = &station.last_seen {
            html.push_str(" — ");
            html.push_str(&escape(last_seen));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

/// Render the recent-messages region as a six-column table, one row per
/// message. Null readings render as empty cells.
pub fn messages_table(messages: &[SensorMessage]) -> String {
    if messages.is_empty() {
        return NO_DATA.to_string();
    }

    let mut html = String::from(r#"<div class="table-wrap"><table><thead><tr>"#);
    for column in MESSAGE_COLUMNS {
        html.push_str("<th>");
        html.push_str(column);
        html.push_str("</th>");
    }
    html.push_str("</tr></thead><tbody>");

    for message in messages {
        html.push_str("<tr>");
        push_cell(&mut html, &message.sensor_id);
        push_cell(&mut html, message.recorded_at.as_deref().unwrap_or(""));
        push_cell(&mut html, &reading_text(message.temp));
        push_cell(&mut html, &reading_text(message.humid));
        push_cell(&mut html, &reading_text(message.aqi));
        push_cell(&mut html, &reading_text(message.lux));
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}

fn push_cell(html: &mut String, text: &str) {
    html.push_str("<td>");
    html.push_str(&escape(text));
    html.push_str("</td>");
}

fn reading_text<T: ToString>(reading: Option<T>) -> String {
    reading.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(sensor_id: &str, last_seen: Option<&str>) -> Station {
        Station {
            sensor_id: sensor_id.to_string(),
            last_seen: last_seen.map(str::to_string),
        }
    }

    fn message(sensor_id: &str) -> SensorMessage {
        SensorMessage {
            sensor_id: sensor_id.to_string(),
            recorded_at: Some("2024-05-01 12:33:19".to_string()),
            temp: Some(21.4),
            humid: None,
            aqi: Some(42),
            lux: None,
        }
    }

    #[test]
    fn test_stations_render_one_line_each() {
        let html = stations_list(&[
            station("esp32-01", Some("2024-05-01 12:33:19")),
            station("esp32-02", None),
        ]);

        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.contains("<li>esp32-01 — 2024-05-01 12:33:19</li>"));
        // No trailing separator when last_seen is unknown.
        assert!(html.contains("<li>esp32-02</li>"));
    }

    #[test]
    fn test_empty_stations_show_localized_message() {
        assert_eq!(stations_list(&[]), NO_STATIONS);
    }

    #[test]
    fn test_messages_table_has_fixed_columns() {
        let html = messages_table(&[message("esp32-01")]);
        assert_eq!(html.matches("<th>").count(), 6);
        assert!(html.contains("<th>Sensor</th><th>Recorded</th><th>Temp</th>"));
    }

    #[test]
    fn test_null_readings_render_empty_cells() {
        let html = messages_table(&[message("esp32-01")]);
        assert!(html.contains(
            "<td>esp32-01</td><td>2024-05-01 12:33:19</td>\
             <td>21.4</td><td></td><td>42</td><td></td>"
        ));
    }

    #[test]
    fn test_null_timestamp_renders_empty() {
        let mut msg = message("esp32-01");
        msg.recorded_at = None;
        let html = messages_table(&[msg]);
        assert!(html.contains("<td>esp32-01</td><td></td>"));
    }

    #[test]
    fn test_empty_messages_show_placeholder() {
        assert_eq!(messages_table(&[]), NO_DATA);
    }

    #[test]
    fn test_message_cells_are_escaped() {
        let mut msg = message("<script>alert(1)</script>");
        msg.recorded_at = Some("now & then".to_string());
        let html = messages_table(&[msg]);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("now &amp; then"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_sensor_id_is_escaped() {
        let html = stations_list(&[station("<img src=x>", None)]);
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(!html.contains("<img"));
    }
}
