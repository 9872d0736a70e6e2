// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 由宿主程序在加载项目目录前调用一次
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 默认日志级别过滤器
const DEFAULT_FILTER: &str = "info";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=solar_install_batching=debug 可看到每次选择拒绝的原因
///
/// # 示例
/// ```no_run
/// use solar_install_batching::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    log_startup();
}

/// 初始化 JSON 格式日志（宿主以结构化方式采集日志时使用）
pub fn init_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt().json().with_env_filter(filter).with_target(true).init();

    log_startup();
}

/// 初始化测试环境的日志系统
///
/// 使用 debug 级别,可重复调用
pub fn init_test() {
    if fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init()
        .is_ok()
    {
        log_startup();
    }
}

fn log_startup() {
    tracing::info!(app = crate::APP_NAME, version = crate::VERSION, "日志系统已初始化");
}
