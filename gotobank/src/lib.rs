//! Tools for exercising the gotobank HTTP API: an interactive operator console, a single-route
//! load generator, and a launcher that runs many load generators as separate processes.

pub mod cli;
pub mod client;
pub mod console;
pub mod fanout;
pub mod load;

mod error;

pub use client::BankClient;
pub use error::Error;
pub use gotobank_core::{ClientConfig, LoadConfig, Operation, Throughput};
