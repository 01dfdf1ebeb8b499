//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出

use catalog_telemetry::init_metrics;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusHandle};

/// Metrics 记录器
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus recorder
    pub fn install() -> Result<Self, BuildError> {
        Ok(Self {
            handle: init_metrics()?,
        })
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 记录 gRPC 请求
pub fn record_grpc_request(service: &str, method: &str, status: &str, duration_ms: f64) {
    let labels = [
        ("service", service.to_string()),
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];

    counter!("grpc_requests_total", &labels).increment(1);
    histogram!("grpc_request_duration_ms", &labels).record(duration_ms);
}

/// 记录服务端流式响应推送的条数
pub fn record_grpc_stream_items(service: &str, method: &str, items: u64) {
    let labels = [
        ("service", service.to_string()),
        ("method", method.to_string()),
    ];

    counter!("grpc_stream_items_total", &labels).increment(items);
}

/// 记录数据库操作
pub fn record_db_query(operation: &str, collection: &str, duration_ms: f64, success: bool) {
    let labels = [
        ("operation", operation.to_string()),
        ("collection", collection.to_string()),
        ("success", success.to_string()),
    ];

    counter!("db_queries_total", &labels).increment(1);
    histogram!("db_query_duration_ms", &labels).record(duration_ms);
}
