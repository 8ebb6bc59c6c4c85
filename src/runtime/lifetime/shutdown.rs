use tokio::signal;
use tracing::{info, warn};

/// 等待 Ctrl+C 信号
///
/// 服务无持久化状态，收到信号后直接返回，由调用方停止 HTTP 服务。
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}
