use clap::Parser;
use gotobank::cli::{Cli, Command};
use gotobank::console::Console;
use gotobank::fanout::{self, FanoutConfig};
use gotobank::{load, LoadConfig};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_env_filter(cli.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Client(args) => {
            let mut console = Console::new(std::io::stdin().lock(), std::io::stdout());
            console.run(&args.host).await?;
        }
        Command::Load(args) => {
            let config = LoadConfig::from(args);
            match load::run(&config).await? {}
        }
        Command::Fanout(args) => {
            let config = FanoutConfig::for_load(&LoadConfig::from(args.load))?
                .processes(args.processes);
            fanout::launch(&config).wait().await?;
        }
    }

    Ok(())
}
