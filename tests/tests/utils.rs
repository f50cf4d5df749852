use mock_service::MockBank;
use std::sync::OnceLock;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

/// Install logging once per test binary and start a fresh mock bank.
#[allow(unused)]
pub async fn init() -> MockBank {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = FmtSubscriber::builder()
            .with_env_filter("gotobank=debug,mock_service=debug")
            .with_test_writer()
            .try_init();
    });

    MockBank::start().await
}
