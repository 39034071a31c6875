//! Request/response calls against the node.

use reqwest::{Client, RequestBuilder};
use url::Url;

use super::ClientError;
use super::stream::ChannelEventStream;
use crate::objects::{ChannelRecord, ListChannelsResponse};

/// Header the REST gateway reads the hex-encoded macaroon from.
pub const MACAROON_HEADER: &str = "Grpc-Metadata-macaroon";

/// Typed HTTP client for the node's channel endpoints.
///
/// The client is cheap to clone. Use [`with_http_client`](Self::with_http_client)
/// to give unary calls a request timeout and streaming calls none.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: Client,
    base_url: Url,
    macaroon: Option<String>,
}

impl NodeClient {
    /// Create a new `NodeClient`.
    ///
    /// * `base_url` – root URL of the REST gateway (e.g. `https://127.0.0.1:8080`).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
            macaroon: None,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Authenticate every request with the given hex-encoded macaroon.
    pub fn with_macaroon(mut self, macaroon_hex: impl Into<String>) -> Self {
        self.macaroon = Some(macaroon_hex.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let req = self.http.get(url);
        match &self.macaroon {
            Some(macaroon) => req.header(MACAROON_HEADER, macaroon),
            None => req,
        }
    }

    /// `GET /v1/channels` – full snapshot of the node's open channels.
    pub async fn list_channels(&self) -> Result<Vec<ChannelRecord>, ClientError> {
        let url = self.base_url.join("/v1/channels")?;
        let resp = self.get(url).send().await?;
        let body: ListChannelsResponse = parse_response(resp).await?;
        Ok(body.channels)
    }

    /// `GET /v1/channels/subscribe` – open the channel event stream.
    ///
    /// The returned stream yields updates until the gateway closes the
    /// connection.
    pub async fn subscribe_channel_events(&self) -> Result<ChannelEventStream, ClientError> {
        let url = self.base_url.join("/v1/channels/subscribe")?;
        let resp = self.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, body });
        }
        Ok(ChannelEventStream::new(resp))
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
