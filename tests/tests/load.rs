mod utils;
#[allow(unused)]
use utils::*;

use gotobank::load::{run_batch, run_with_output};
use gotobank::{BankClient, Error, LoadConfig};
use std::num::NonZeroU32;

#[tokio::test]
#[ntest::timeout(10_000)]
async fn samples_overwrite_one_line() {
    let bank = init().await;
    bank.fail_after(3 * 4);

    let config = LoadConfig::new("tok")
        .host(&bank.url())
        .batch_size(NonZeroU32::new(3).unwrap());

    let mut out = Vec::new();
    let res = run_with_output(&config, &mut out).await;
    assert!(matches!(res, Err(Error::Http(_))));

    let printed = String::from_utf8(out).unwrap();
    let samples: Vec<f64> = printed
        .split_terminator('\r')
        .map(|s| s.parse().unwrap())
        .collect();
    assert_eq!(samples.len(), 4);
    for sample in samples {
        assert!(sample > 0.);
        // At most three decimal places.
        assert_eq!((sample * 1_000.).round() / 1_000., sample);
    }
}

#[tokio::test]
async fn batch_follows_the_configured_route() {
    let bank = init().await;
    let config = LoadConfig::new("tok").host(&bank.url()).route("codes");
    let client = BankClient::new(&config.client_config()).unwrap();

    run_batch(&client, &config.route, config.batch_size)
        .await
        .unwrap();

    let requests = bank.requests();
    assert_eq!(requests.len(), 5);
    assert!(requests.iter().all(|r| r.path == "/api/codes"));
}

#[cfg(feature = "integration")]
mod sustained {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn sustained_batches() {
        let bank = init().await;
        let config = LoadConfig::new("tok").host(&bank.url());
        let client = BankClient::new(&config.client_config()).unwrap();

        let mut total = 0;
        for _ in 0..200 {
            let sample = run_batch(&client, &config.route, config.batch_size)
                .await
                .unwrap();
            total += sample.requests as u64;
        }

        assert_eq!(total, 1_000);
        assert_eq!(bank.take_served(), 1_000);
    }
}
