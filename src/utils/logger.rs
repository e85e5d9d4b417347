use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 建立日誌過濾器：RUST_LOG 優先，其次是設定檔，最後是預設值
fn build_filter(verbose: bool, configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match configured {
        Some(directives) => EnvFilter::new(directives),
        None if verbose => EnvFilter::new("xnat_models=debug,info"),
        None => EnvFilter::new("xnat_models=info"),
    })
}

pub fn init_cli_logger(verbose: bool, configured: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, configured))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(configured: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(false, configured))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}
