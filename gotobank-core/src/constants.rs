use std::num::NonZeroU32;

/// Base URL of the banking API when none is given.
pub const DEFAULT_HOST: &str = "http://localhost:4000";

/// Route hammered by the load generator by default.
pub const DEFAULT_ROUTE: &str = "balance";

/// Sequential requests per throughput sample.
pub const DEFAULT_BATCH_SIZE: NonZeroU32 = unsafe { NonZeroU32::new_unchecked(5) };

/// Load generator processes started by the fan-out launcher.
pub const DEFAULT_PROCESS_COUNT: usize = 50;

/// Every route of the banking API lives under this prefix.
pub const API_PREFIX: &str = "/api/";

/// Header carrying the raw account token. No scheme prefix is added.
pub const AUTHORIZATION_HEADER: &str = "authorization";
