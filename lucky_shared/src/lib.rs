use serde::{Deserialize, Serialize};

/// Client-visible projection of a frame. Carries no redeem code.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FrameView {
    pub tick_id: i64,
    pub unix_seconds: i64,
    pub reels: Vec<u8>,
    pub jackpot_preview: u32,
    pub sample_ints: Vec<i32>,
    pub sample_bytes_hex: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub tick_id: i64,
    #[serde(default)]
    pub code: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RedeemResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl RedeemResponse {
    pub fn jackpot(tick_id: i64, flag: String) -> Self {
        Self {
            success: true,
            message: "Jackpot!".into(),
            tick_id: Some(tick_id),
            flag: Some(flag),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            tick_id: None,
            flag: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Unknown tickId")]
    NotFound,
    #[error("Wrong code.")]
    Forbidden,
    #[error("No frame yet.")]
    NoFrameYet,
}
