use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログ出力を初期化（`RUST_LOG`が未設定なら`default_level`を使用）
///
/// 計測結果は標準出力に出すため、ログは標準エラーへ出力する。
pub fn init_subscriber(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let formatter = fmt::layer().with_target(false).with_writer(std::io::stderr);

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(formatter)
        .try_init()
    {
        eprintln!("Warning: ログ出力を初期化できません: {err}");
    }
}
