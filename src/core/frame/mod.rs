//! 手部骨骼帧：数据模型与原始帧归一化

use thiserror::Error;

pub mod model;
pub mod normalizer;

pub use model::{Bone, DistalBone, Finger, FingerType, Frame, FrameTag, Hand, HandType, Point};
pub use normalizer::{normalize, normalize_str, DefaultedField, Normalized};

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("required field missing: {path}")]
    RequiredFieldMissing { path: String },
    #[error("malformed field {path}: {reason}")]
    MalformedField { path: String, reason: String },
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl FrameError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        FrameError::MalformedField {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
