//! Load generator
//!
//! Hammers one route forever in fixed-size batches of sequential requests, printing one
//! throughput sample per batch over the previous one. Any failed request ends the run.
use crate::client::BankClient;
use crate::error::Error;
use gotobank_core::{LoadConfig, Throughput};
use humantime::format_duration;
use std::convert::Infallible;
use std::io::Write;
use std::num::NonZeroU32;
use std::time::Instant;
#[allow(unused_imports)]
use tracing::{debug, info, instrument, trace};

/// Run against `config` until a request fails, printing samples to stdout.
pub async fn run(config: &LoadConfig) -> Result<Infallible, Error> {
    run_with_output(config, &mut std::io::stdout()).await
}

#[instrument(name = "load", skip_all, fields(route = %config.route, batch = config.batch_size.get()))]
pub async fn run_with_output<W: Write>(
    config: &LoadConfig,
    out: &mut W,
) -> Result<Infallible, Error> {
    let client = BankClient::new(&config.client_config())?;
    info!("Sending batches to {}", client.url(&config.route));

    loop {
        let sample = run_batch(&client, &config.route, config.batch_size).await?;
        write!(out, "{sample}\r")?;
        out.flush()?;
    }
}

/// Issue `batch_size` GETs to `route`, one after another, and time the whole batch.
pub async fn run_batch(
    client: &BankClient,
    route: &str,
    batch_size: NonZeroU32,
) -> Result<Throughput, Error> {
    let start = Instant::now();
    for _ in 0..batch_size.get() {
        let req_start = Instant::now();
        client.get_route(route).await?;

        #[cfg(feature = "metrics")]
        {
            metrics::counter!("gotobank.load.requests").increment(1);
            metrics::histogram!("gotobank.load.latency").record(req_start.elapsed().as_secs_f64());
        }
        #[cfg(not(feature = "metrics"))]
        let _ = req_start;
    }
    let sample = Throughput::new(batch_size.get(), start.elapsed());

    #[cfg(feature = "metrics")]
    metrics::histogram!("gotobank.load.throughput").record(sample.per_second());

    trace!(
        "Batch of {} took {}",
        sample.requests,
        format_duration(sample.elapsed)
    );
    Ok(sample)
}
