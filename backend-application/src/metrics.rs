use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    map_requests: AtomicU64,
    map_rows: AtomicU64,
    store_errors: AtomicU64,
}

impl Metrics {
    pub fn record_map_request(&self) {
        self.map_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rows(&self, row_count: usize) {
        self.map_rows.fetch_add(row_count as u64, Ordering::Relaxed);
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let requests = self.map_requests.load(Ordering::Relaxed);
        let rows = self.map_rows.load(Ordering::Relaxed);
        let errors = self.store_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE rovemap_map_requests_total counter\n\
rovemap_map_requests_total {}\n\
# TYPE rovemap_map_rows_total counter\n\
rovemap_map_rows_total {}\n\
# TYPE rovemap_store_errors_total counter\n\
rovemap_store_errors_total {}\n",
            requests, rows, errors
        )
    }
}
