use thiserror::Error;

/// Errors surfaced by the reconciler, the MQTT client and the orphan collector.
///
/// Per-descriptor publish failures never propagate out of a reconciliation; they
/// are recorded on the `Published` condition (see [`crate::descriptor::status`]) and
/// trigger a fixed retry instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed discovery topic: {0}")]
    MalformedTopic(String),

    #[error("device reference {namespace}/{name} could not be resolved")]
    DeviceRefUnresolved { namespace: String, name: String },

    #[error("publish failed: {cause}")]
    PublishFailed { cause: String },

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("client is disconnecting")]
    Disconnecting,

    #[error("connect failed: {0}")]
    ConnectFailed(String),

    #[error("listing {kind} failed: {source}")]
    ListFailed {
        kind: String,
        #[source]
        source: kube::Error,
    },

    #[error("status write failed: {0}")]
    StatusWriteFailed(#[source] kube::Error),

    #[error(transparent)]
    Kube(#[from] kube::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
