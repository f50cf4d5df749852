use clap::{Args, Parser, Subcommand};
use gotobank_core::{
    LoadConfig, DEFAULT_BATCH_SIZE, DEFAULT_HOST, DEFAULT_PROCESS_COUNT, DEFAULT_ROUTE,
};
use std::num::NonZeroU32;

const DEFAULT_LOG_FILTER: &str = "gotobank=info";

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// `tracing` filter directives. Logs go to stderr.
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive session: read a token, then run operations by name.
    Client(ClientArgs),
    /// Request one route forever and print requests per second.
    Load(LoadArgs),
    /// Start many load generators as separate processes.
    Fanout(FanoutArgs),
}

#[derive(Args, Debug)]
pub struct ClientArgs {
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
}

#[derive(Args, Debug)]
pub struct LoadArgs {
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(short, long, default_value = DEFAULT_ROUTE)]
    pub route: String,

    #[arg(short, long)]
    pub token: String,

    #[arg(short('n'), long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: NonZeroU32,
}

#[derive(Args, Debug)]
pub struct FanoutArgs {
    #[arg(short, long, default_value_t = DEFAULT_PROCESS_COUNT)]
    pub processes: usize,

    #[command(flatten)]
    pub load: LoadArgs,
}

impl From<LoadArgs> for LoadConfig {
    fn from(args: LoadArgs) -> Self {
        LoadConfig::new(&args.token)
            .host(&args.host)
            .route(&args.route)
            .batch_size(args.batch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults() {
        let cli = Cli::try_parse_from(["gotobank", "load", "--token", "abc"]).unwrap();
        let Command::Load(args) = cli.command else {
            panic!("expected load");
        };
        assert_eq!(LoadConfig::from(args), LoadConfig::new("abc"));
        assert_eq!(cli.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn load_requires_token() {
        assert!(Cli::try_parse_from(["gotobank", "load"]).is_err());
    }

    #[test]
    fn batch_size_must_be_positive() {
        let res = Cli::try_parse_from(["gotobank", "load", "-t", "abc", "-n", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn fanout_forwards_load_args() {
        let cli = Cli::try_parse_from([
            "gotobank",
            "fanout",
            "-p",
            "3",
            "--token",
            "abc",
            "--route",
            "codes",
        ])
        .unwrap();
        let Command::Fanout(args) = cli.command else {
            panic!("expected fanout");
        };
        assert_eq!(args.processes, 3);
        assert_eq!(
            LoadConfig::from(args.load),
            LoadConfig::new("abc").route("codes")
        );
    }

    fn reparse_as_child(config: &LoadConfig) -> LoadConfig {
        let mut argv = vec!["gotobank".to_string(), "load".to_string()];
        argv.extend(config.to_args());

        let Command::Load(args) = Cli::try_parse_from(argv).unwrap().command else {
            panic!("expected load");
        };
        LoadConfig::from(args)
    }

    #[test]
    fn load_config_round_trips_through_child_args() {
        let config = LoadConfig::new("abc")
            .host("http://10.1.1.1:4000")
            .route("account")
            .batch_size(NonZeroU32::new(9).unwrap());
        assert_eq!(reparse_as_child(&config), config);

        // Opaque tokens may look like flags.
        let config = LoadConfig::new("-Xk9q");
        assert_eq!(reparse_as_child(&config), config);

        let config = LoadConfig::new("--token").route("-r");
        assert_eq!(reparse_as_child(&config), config);
    }

    #[test]
    fn fanout_accepts_dash_leading_token() {
        let cli = Cli::try_parse_from(["gotobank", "fanout", "--token=-Xk9q"]).unwrap();
        let Command::Fanout(args) = cli.command else {
            panic!("expected fanout");
        };
        let config = LoadConfig::from(args.load);
        assert_eq!(config.token, "-Xk9q");
        assert_eq!(reparse_as_child(&config), config);
    }

    #[test]
    fn client_host_default() {
        let cli = Cli::try_parse_from(["gotobank", "client"]).unwrap();
        let Command::Client(args) = cli.command else {
            panic!("expected client");
        };
        assert_eq!(args.host, "http://localhost:4000");
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
