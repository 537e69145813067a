use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::LeaderboardMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for leaderboard metrics snapshots.
///
/// Writes the text exposition format so the output can be scraped by
/// Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<LeaderboardMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LeaderboardMetricsSnapshot) {
        let counters = [
            ("inserts_total", snapshot.inserts),
            ("updates_total", snapshot.updates),
            ("removes_total", snapshot.removes),
            ("not_found_total", snapshot.not_found),
            ("rejected_total", snapshot.rejected),
            ("rank_queries_total", snapshot.rank_queries),
            ("top_k_queries_total", snapshot.top_k_queries),
            ("snapshots_total", snapshot.snapshots),
            ("batches_total", snapshot.batches),
            ("batch_mutations_total", snapshot.batch_mutations),
            ("batch_rollbacks_total", snapshot.batch_rollbacks),
            ("loads_total", snapshot.loads),
            ("loaded_entities_total", snapshot.loaded_entities),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", suffix, value);
        }
        self.write_metric("gauge", "entities", snapshot.len as u64);
        self.write_metric("gauge", "tree_height", u64::from(snapshot.tree_height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prometheus_exporter_writes_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("board", Vec::new());
        let snapshot = LeaderboardMetricsSnapshot {
            inserts: 3,
            len: 3,
            tree_height: 2,
            ..Default::default()
        };
        exporter.export(&snapshot);
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE board_inserts_total counter\nboard_inserts_total 3\n"));
        assert!(text.contains("# TYPE board_entities gauge\nboard_entities 3\n"));
        assert!(text.contains("board_tree_height 2"));
    }

    #[test]
    fn prometheus_exporter_without_prefix() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&LeaderboardMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\nremoves_total 0\n"));
    }
}
