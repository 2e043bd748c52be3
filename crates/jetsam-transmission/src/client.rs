//! HTTP client for the daemon's RPC endpoint.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use jetsam_core::{
    DaemonError, DaemonResult, RemovalExecutor, Transfer, TransferId, TransferSource,
    TransferStatus,
};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

const RPC_PATH: &str = "/transmission/rpc";
const HEADER_SESSION_ID: &str = "X-Transmission-Session-Id";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fields requested from `torrent-get`; everything the policy engine and
/// the listing table consume, nothing more.
const TRANSFER_FIELDS: [&str; 7] = [
    "id",
    "name",
    "totalSize",
    "uploadRatio",
    "addedDate",
    "percentDone",
    "status",
];

/// Client for a Transmission-compatible RPC daemon.
#[derive(Debug)]
pub struct DaemonClient {
    client: Client,
    endpoint: Url,
    username: String,
    password: String,
    session_id: Mutex<Option<String>>,
}

impl DaemonClient {
    /// Build a client for the daemon at `host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError::Endpoint`] when the host/port pair does not
    /// form a valid URL, and a connection-class error when the underlying
    /// HTTP client cannot be constructed.
    pub fn new(
        host: &str,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> DaemonResult<Self> {
        let raw = format!("http://{host}:{port}{RPC_PATH}");
        let endpoint = raw.parse::<Url>().map_err(|_| DaemonError::Endpoint {
            value: raw.clone(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|source| DaemonError::connection("client_build", source))?;
        Ok(Self {
            client,
            endpoint,
            username: username.into(),
            password: password.into(),
            session_id: Mutex::new(None),
        })
    }

    /// Issue one RPC call, transparently performing the session handshake:
    /// a 409 response carries the session token, which is cached and the
    /// request retried exactly once.
    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: &str,
        arguments: Value,
    ) -> DaemonResult<Option<T>> {
        let body = json!({ "method": method, "arguments": arguments });
        let mut handshake_done = false;

        loop {
            let mut request = self
                .client
                .post(self.endpoint.clone())
                .basic_auth(&self.username, Some(&self.password))
                .json(&body);
            if let Some(token) = self.session_token() {
                request = request.header(HEADER_SESSION_ID, token);
            }

            let response = request
                .send()
                .await
                .map_err(|source| DaemonError::connection(operation, source))?;

            match response.status() {
                StatusCode::CONFLICT if !handshake_done => {
                    let token = response
                        .headers()
                        .get(HEADER_SESSION_ID)
                        .and_then(|value| value.to_str().ok())
                        .ok_or(DaemonError::Rejected {
                            operation,
                            reason: "session conflict without a session id".to_string(),
                        })?
                        .to_string();
                    debug!(operation, "adopted daemon session id");
                    self.store_session_token(token);
                    handshake_done = true;
                    continue;
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    return Err(DaemonError::Unauthorized { operation });
                }
                status if !status.is_success() => {
                    return Err(DaemonError::Rejected {
                        operation,
                        reason: format!("http status {status}"),
                    });
                }
                _ => {}
            }

            let envelope: RpcResponse<T> = response
                .json()
                .await
                .map_err(|source| DaemonError::malformed(operation, source))?;
            if envelope.result != "success" {
                return Err(DaemonError::Rejected {
                    operation,
                    reason: envelope.result,
                });
            }
            return Ok(envelope.arguments);
        }
    }

    fn session_token(&self) -> Option<String> {
        self.session_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_session_token(&self, token: String) {
        *self
            .session_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }
}

#[async_trait]
impl TransferSource for DaemonClient {
    async fn list(&self) -> DaemonResult<Vec<Transfer>> {
        let arguments: TorrentGetArguments = self
            .call("torrent-get", "torrent-get", json!({ "fields": TRANSFER_FIELDS }))
            .await?
            .ok_or(DaemonError::Rejected {
                operation: "torrent-get",
                reason: "success without arguments".to_string(),
            })?;
        Ok(arguments
            .torrents
            .into_iter()
            .map(WireTransfer::into_transfer)
            .collect())
    }
}

#[async_trait]
impl RemovalExecutor for DaemonClient {
    async fn remove(&self, ids: &[TransferId], delete_data: bool) -> DaemonResult<()> {
        let ids: Vec<i64> = ids.iter().map(|id| id.0).collect();
        self.call::<Value>(
            "torrent-remove",
            "torrent-remove",
            json!({ "ids": ids, "delete-local-data": delete_data }),
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: String,
    arguments: Option<T>,
}

#[derive(Debug, Deserialize)]
struct TorrentGetArguments {
    #[serde(default)]
    torrents: Vec<WireTransfer>,
}

#[derive(Debug, Deserialize)]
struct WireTransfer {
    id: i64,
    name: String,
    #[serde(rename = "totalSize", default)]
    total_size: u64,
    #[serde(rename = "uploadRatio", default)]
    upload_ratio: f64,
    #[serde(rename = "addedDate", default)]
    added_date: i64,
    #[serde(rename = "percentDone", default)]
    percent_done: f64,
    #[serde(default)]
    status: i64,
}

impl WireTransfer {
    /// The daemon reports `-1` for ratios it cannot compute yet; the domain
    /// model requires non-negative ratios, so those clamp to zero.
    fn into_transfer(self) -> Transfer {
        Transfer {
            id: TransferId(self.id),
            name: self.name,
            total_size_bytes: self.total_size,
            ratio: self.upload_ratio.max(0.0),
            added_at: DateTime::from_timestamp(self.added_date, 0)
                .unwrap_or(DateTime::UNIX_EPOCH),
            progress: self.percent_done.clamp(0.0, 1.0),
            status: TransferStatus::from_code(self.status),
        }
    }
}
