//! gRPC service implementation for the encryption benchmark.
//!
//! The service exposes a single unary operation, `ShowEncryption`, which
//! normalizes the request payload, encrypts it with AES-CTR under the
//! configured key and an all-zero IV, and returns a formatted diagnostic
//! report. Handlers only read immutable settings, so concurrent dispatch by
//! the transport needs no coordination.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::debug;

use crate::cipher;
use crate::config::ServerSettings;
use crate::proto::aes_server::{Aes, AesServer};
use crate::proto::{PlainTextMessage, ReturnEncryptionInfo};

/// Tag embedded in every response identifying this implementation.
const RUNTIME_TAG: &str = "rust";

/// Payload value that, like the empty string, selects the configured default
/// plaintext.
const DEFAULT_PAYLOAD_SENTINEL: &str = "world";

/// Implementation of the `Aes` encryption showcase service.
pub struct AesService {
    /// Immutable service settings shared across concurrent handlers
    settings: Arc<ServerSettings>,
}

impl AesService {
    /// Creates a new service instance around the given settings.
    pub fn new(settings: Arc<ServerSettings>) -> Self {
        Self { settings }
    }

    /// Wraps the service in the generated tonic server type.
    pub fn into_service(self) -> AesServer<AesService> {
        AesServer::new(self)
    }
}

/// Applies the request normalization rule: an empty or `"world"` payload is
/// replaced by the configured default plaintext, anything else is used
/// verbatim.
fn resolve_plaintext<'a>(message: &'a str, default: &'a str) -> &'a str {
    if message.is_empty() || message == DEFAULT_PAYLOAD_SENTINEL {
        default
    } else {
        message
    }
}

/// Formats the response report for one encryption.
fn format_report(plaintext: &str, ciphertext: &[u8]) -> String {
    format!(
        "fn: AES | plaintext: {} | ciphertext: {} | runtime: {}",
        plaintext,
        hex::encode(ciphertext),
        RUNTIME_TAG
    )
}

#[tonic::async_trait]
impl Aes for AesService {
    async fn show_encryption(
        &self,
        request: Request<PlainTextMessage>,
    ) -> Result<Response<ReturnEncryptionInfo>, Status> {
        let message = request.into_inner().plaintext_message;
        let plaintext = resolve_plaintext(&message, &self.settings.default_plaintext);

        // The key is re-decoded on every call and each request gets a fresh
        // zero IV; the handler keeps no state between requests.
        let ciphertext = cipher::encrypt_with_hex_key(&self.settings.key_hex, plaintext.as_bytes())
            .map_err(Status::from)?;

        debug!(bytes = plaintext.len(), "encrypted request payload");

        Ok(Response::new(ReturnEncryptionInfo {
            encryption_info: format_report(plaintext, &ciphertext),
        }))
    }
}
