use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::RoundReport;
use crate::live::LiveMoneyState;

/// Failure to encode or decode a compact snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    Empty,
    Encode(String),
    Decode(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty snapshot"),
            Self::Encode(e) => write!(f, "snapshot encode error: {e}"),
            Self::Decode(e) => write!(f, "snapshot decode error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// MessagePack-encode any engine value for broadcast.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SnapshotError> {
    rmp_serde::to_vec(value).map_err(|e| SnapshotError::Encode(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SnapshotError> {
    if bytes.is_empty() {
        return Err(SnapshotError::Empty);
    }
    rmp_serde::from_slice(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))
}

pub fn encode_report(report: &RoundReport) -> Result<Vec<u8>, SnapshotError> {
    encode(report)
}

pub fn decode_report(bytes: &[u8]) -> Result<RoundReport, SnapshotError> {
    decode(bytes)
}

pub fn encode_live_state(state: &LiveMoneyState) -> Result<Vec<u8>, SnapshotError> {
    encode(state)
}

pub fn decode_live_state(bytes: &[u8]) -> Result<LiveMoneyState, SnapshotError> {
    decode(bytes)
}
