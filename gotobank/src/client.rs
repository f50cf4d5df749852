//! HTTP client for the banking API.
//!
//! A [`BankClient`] is built once per process from a [`ClientConfig`] and carries the account
//! token as a default header, so every request issued through it is authenticated the same way.
use crate::error::Error;
use gotobank_core::{
    ClientConfig, Payment, Transfer, Verification, API_PREFIX, AUTHORIZATION_HEADER,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Method, RequestBuilder, StatusCode,
};
use serde::Serialize;
use serde_json::Value;
#[allow(unused)]
use tracing::{debug, trace};

/// Status and raw body of one API call. The status is never inspected.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json(&self) -> Result<Value, Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[derive(Debug, Clone)]
pub struct BankClient {
    http: reqwest::Client,
    host: String,
}

impl BankClient {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut token = HeaderValue::from_str(&config.token)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(AUTHORIZATION_HEADER), token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            host: config.host.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{API_PREFIX}{route}", self.host)
    }

    pub async fn account(&self) -> Result<ApiResponse, Error> {
        self.send(self.request(Method::GET, "account")).await
    }

    pub async fn balance(&self) -> Result<ApiResponse, Error> {
        self.send(self.request(Method::GET, "balance")).await
    }

    pub async fn codes(&self) -> Result<ApiResponse, Error> {
        self.send(self.request(Method::GET, "codes")).await
    }

    /// Look up a transaction. `id` goes into the query string as typed.
    pub async fn transaction(&self, id: &str) -> Result<ApiResponse, Error> {
        let req = self.request(Method::GET, "transaction").query(&[("id", id)]);
        self.send(req).await
    }

    pub async fn transfer(&self, transfer: &Transfer) -> Result<ApiResponse, Error> {
        self.post("transfer", transfer).await
    }

    pub async fn payment(&self, payment: &Payment) -> Result<ApiResponse, Error> {
        self.post("payment", payment).await
    }

    pub async fn verify(&self, verification: &Verification) -> Result<ApiResponse, Error> {
        self.post("verify", verification).await
    }

    /// GET `route` with an empty JSON body and drain the response.
    ///
    /// Unlike the operator calls above, a non-2xx status is an error here.
    pub async fn get_route(&self, route: &str) -> Result<(), Error> {
        let res = self
            .request(Method::GET, route)
            .json(&serde_json::json!({}))
            .send()
            .await?
            .error_for_status()?;
        let _ = res.bytes().await?;
        Ok(())
    }

    async fn post<T: Serialize>(&self, route: &str, body: &T) -> Result<ApiResponse, Error> {
        self.send(self.request(Method::POST, route).json(body)).await
    }

    fn request(&self, method: Method, route: &str) -> RequestBuilder {
        trace!("{method} {}", self.url(route));
        self.http.request(method, self.url(route))
    }

    async fn send(&self, req: RequestBuilder) -> Result<ApiResponse, Error> {
        let res = req.send().await?;
        let status = res.status();
        let body = res.bytes().await?.to_vec();
        debug!("Response {status} ({} bytes)", body.len());
        Ok(ApiResponse { status, body })
    }
}
