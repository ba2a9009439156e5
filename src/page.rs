//! Console page model.
//!
//! A page is a fixed, ordered set of named regions. Pollers and the query
//! path write rendered fragments into regions; the document writer reads
//! them back out. Regions are shared as `Arc<Region>` so writer tasks and
//! the renderer can hold them concurrently, with a `parking_lot` lock around
//! each region's content.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::data::Record;
use crate::render;

/// Region id of the health status line.
pub const HEALTH_STATUS: &str = "healthStatus";
/// Region id of the recent-stations list.
pub const LIVE_STATIONS: &str = "liveStations";
/// Region id of the recent-messages table.
pub const LIVE_MESSAGES: &str = "liveMessages";
/// Region id of the readings query results table.
pub const QUERY_RESULTS: &str = "queryResults";

/// A named page area whose content a renderer fully replaces.
#[derive(Debug)]
pub struct Region {
    id: String,
    label: Option<String>,
    content: RwLock<RegionContent>,
    notify: Arc<watch::Sender<u64>>,
}

#[derive(Debug, Default)]
struct RegionContent {
    html: String,
    class: String,
}

/// Point-in-time copy of one region, for document rendering.
#[derive(Debug, Clone)]
pub struct RegionSnapshot {
    pub id: String,
    pub label: Option<String>,
    pub class: String,
    pub html: String,
}

impl Region {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the region's markup wholesale.
    ///
    /// The caller is responsible for passing fragment-renderer output (or
    /// otherwise already-escaped markup).
    pub fn set_html(&self, html: String) {
        {
            let mut content = self.content.write();
            content.html = html;
        }
        self.notify.send_modify(|version| *version += 1);
    }

    /// Replace the region's content with escaped plain text and set its
    /// display class.
    pub fn set_status(&self, text: &str, class: &str) {
        {
            let mut content = self.content.write();
            content.html = render::escape(text);
            content.class = class.to_string();
        }
        self.notify.send_modify(|version| *version += 1);
    }

    pub fn html(&self) -> String {
        self.content.read().html.clone()
    }

    pub fn class(&self) -> String {
        self.content.read().class.clone()
    }

    pub fn snapshot(&self) -> RegionSnapshot {
        let content = self.content.read();
        RegionSnapshot {
            id: self.id.clone(),
            label: self.label.clone(),
            class: content.class.clone(),
            html: content.html.clone(),
        }
    }
}

/// The console page: an ordered set of regions created up front.
#[derive(Debug)]
pub struct Page {
    regions: Vec<Arc<Region>>,
    notify: Arc<watch::Sender<u64>>,
}

impl Page {
    pub fn new() -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            regions: Vec::new(),
            notify: Arc::new(notify),
        }
    }

    /// The admin console page: health line, recent stations, recent
    /// messages, and a query results area.
    pub fn admin() -> Self {
        let mut page = Page::new();
        page.add_region(HEALTH_STATUS, Some("Estado del servidor"));
        page.add_region(LIVE_STATIONS, Some("Estaciones recientes"));
        page.add_region(LIVE_MESSAGES, Some("Mensajes recientes"));
        page.add_region(QUERY_RESULTS, Some("Resultados"));
        page
    }

    /// Add a region at the end of the page. Document sections keep this
    /// insertion order.
    pub fn add_region(&mut self, id: &str, label: Option<&str>) -> Arc<Region> {
        let region = Arc::new(Region {
            id: id.to_string(),
            label: label.map(str::to_string),
            content: RwLock::new(RegionContent::default()),
            notify: self.notify.clone(),
        });
        self.regions.push(region.clone());
        region
    }

    /// Look up a region by id.
    pub fn region(&self, id: &str) -> Option<Arc<Region>> {
        self.regions.iter().find(|region| region.id == id).cloned()
    }

    /// Render a record sequence into a named region.
    ///
    /// Returns `false` without rendering anything when no such region
    /// exists.
    pub fn show_table(&self, container: &str, records: &[Record]) -> bool {
        match self.region(container) {
            Some(region) => {
                region.set_html(render::records_table(records));
                true
            }
            None => false,
        }
    }

    /// Receiver for a counter bumped on every region update, so a writer
    /// can re-render only when something changed.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Snapshot all regions in page order.
    pub fn snapshot(&self) -> Vec<RegionSnapshot> {
        self.regions.iter().map(|region| region.snapshot()).collect()
    }

    /// Render the whole page as a standalone HTML document.
    pub fn document(&self, title: &str) -> String {
        render::document(title, &self.snapshot())
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
