//! REST gateway adapter for the core's Node API seam.

use crate::config::NodeSettings;
use async_trait::async_trait;
use chanwatch_core::node::{NodeApi, NodeApiError};
use chanwatch_sdk::client::{ClientError, NodeClient};
use chanwatch_sdk::objects::ChannelRecord;
use reqwest::StatusCode;

/// [`NodeApi`] backed by the REST gateway.
pub struct RestNode {
    client: NodeClient,
}

impl RestNode {
    pub fn new(client: NodeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NodeApi for RestNode {
    async fn list_channels(&self) -> Result<Vec<ChannelRecord>, NodeApiError> {
        self.client.list_channels().await.map_err(into_node_error)
    }
}

fn into_node_error(e: ClientError) -> NodeApiError {
    match e {
        ClientError::Json(e) => NodeApiError::Malformed(e.to_string()),
        ClientError::Api { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE => {
            NodeApiError::Unavailable
        }
        other => NodeApiError::Transport(other.to_string()),
    }
}

/// Build the two clients the daemon needs: one for unary calls with a
/// request timeout, one for the long-lived event stream without.
pub fn build_clients(settings: &NodeSettings) -> Result<(NodeClient, NodeClient), reqwest::Error> {
    let unary = http_builder(settings)?.timeout(settings.timeout).build()?;
    let streaming = http_builder(settings)?
        .connect_timeout(settings.timeout)
        .build()?;

    let base = match &settings.macaroon_hex {
        Some(macaroon) => NodeClient::new(settings.url.clone()).with_macaroon(macaroon.clone()),
        None => NodeClient::new(settings.url.clone()),
    };
    Ok((
        base.clone().with_http_client(unary),
        base.with_http_client(streaming),
    ))
}

fn http_builder(settings: &NodeSettings) -> Result<reqwest::ClientBuilder, reqwest::Error> {
    let builder = reqwest::Client::builder();
    match &settings.tls_cert_pem {
        Some(pem) => Ok(builder.add_root_certificate(reqwest::Certificate::from_pem(pem)?)),
        None => Ok(builder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        let json_err = serde_json_error();
        assert!(matches!(
            into_node_error(ClientError::Json(json_err)),
            NodeApiError::Malformed(_)
        ));
        assert_eq!(
            into_node_error(ClientError::Api {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: String::new(),
            }),
            NodeApiError::Unavailable
        );
        assert!(matches!(
            into_node_error(ClientError::Stream {
                code: 14,
                message: "closing".to_owned(),
            }),
            NodeApiError::Transport(msg) if msg == "stream error 14: closing"
        ));
    }

    fn serde_json_error() -> serde_json::Error {
        serde_json::from_str::<u8>("x").unwrap_err()
    }
}
