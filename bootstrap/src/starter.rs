//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use catalog_config::AppConfig;
use catalog_errors::AppResult;
use tonic::transport::Server;
use tonic::transport::server::Router;
use tracing::{error, info};

use crate::health::{HealthChecker, HealthServer};
use crate::infrastructure::Infrastructure;
use crate::metrics::MetricsRecorder;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 gRPC 服务
///
/// 所有微服务的统一入口点。它负责：
/// 1. 加载 `.env` 和配置
/// 2. 初始化运行时（日志）
/// 3. 安装 Prometheus recorder
/// 4. 创建基础设施资源（MongoDB，带重试）
/// 5. 启动健康检查 HTTP 服务器（gRPC 端口 + 1000）
/// 6. 调用用户提供的闭包注册 gRPC 服务
/// 7. 启动服务器，收到 Ctrl+C / SIGTERM 后停止接收新请求并释放监听端口
///
/// # 示例
///
/// ```ignore
/// use catalog_bootstrap::{Infrastructure, run_server};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_server("config", |infra: Infrastructure, mut server| async move {
///         let service = MyServiceImpl::new(infra.mongo_database());
///         Ok(server.add_service(MyServiceServer::new(service)))
///     })
///     .await
/// }
/// ```
pub async fn run_server<F, Fut>(
    config_dir: &str,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure, Server) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 1. 加载配置
    dotenvy::dotenv().ok();
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    // 3. 初始化 Metrics 记录器
    let metrics = Arc::new(MetricsRecorder::install()?);

    // 4. 创建基础设施（带重试）
    let infra = Infrastructure::from_config(config.clone()).await?;

    // 5. 启动健康检查 HTTP 服务器
    let health_checker = Arc::new(HealthChecker::new(infra.mongo_database()));
    let health_port = config.server.port.saturating_add(1000);
    let health_server = HealthServer::new(health_checker, metrics, health_port);

    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve().await {
            error!("Health server error: {}", e);
        }
    });

    // 6. 构建服务地址和路由
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let router = router_builder(infra, Server::builder()).await?;

    info!(%addr, "gRPC server starting");

    // 7. 启动服务器
    router.serve_with_shutdown(addr, shutdown_signal()).await?;

    // 8. 清理
    health_handle.abort();

    info!("Service stopped");

    Ok(())
}
