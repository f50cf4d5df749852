use mock_service::{tps_measure_task, MockBank};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    FmtSubscriber::builder()
        .with_env_filter("mock_service=debug,tower_http=info")
        .init();

    let bank = MockBank::bind("0.0.0.0:4000".parse().unwrap()).await;
    println!("Mock bank listening on {}", bank.url());

    tps_measure_task(bank).await;
}
