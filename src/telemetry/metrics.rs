//! Screener metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Per-ticker outcome counters
#[derive(Debug, Clone, Copy)]
pub enum ScanMetric {
    /// Ticker history analyzed
    TickerAnalyzed,
    /// Ticker had no bars in the requested window
    TickerNoData,
    /// Ticker below the average volume threshold
    TickerLowVolume,
    /// Ticker fetch failed
    TickerFailed,
    /// Qualifying moves found
    MovesFound,
}

impl ScanMetric {
    fn name(self) -> &'static str {
        match self {
            ScanMetric::TickerAnalyzed => "screener_tickers_analyzed_total",
            ScanMetric::TickerNoData => "screener_tickers_no_data_total",
            ScanMetric::TickerLowVolume => "screener_tickers_low_volume_total",
            ScanMetric::TickerFailed => "screener_tickers_failed_total",
            ScanMetric::MovesFound => "screener_moves_found_total",
        }
    }
}

/// Increment a scan counter
pub fn record_count(metric: ScanMetric, value: u64) {
    metrics::counter!(metric.name()).increment(value);
}

/// Record how long one ticker's analysis took
pub fn record_analysis_latency(duration: Duration) {
    metrics::histogram!("screener_ticker_analysis_seconds").record(duration.as_secs_f64());
}

/// Start the Prometheus exporter on the given port
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}
