use thiserror::Error;

use crate::core::features::FeatureError;
use crate::core::frame::FrameError;
use crate::core::recognition::RecognitionError;
use crate::core::settings::SettingsError;

pub mod models;
pub mod recognizer;

pub use recognizer::SignRecognizer;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    #[error("feature error: {0}")]
    Feature(#[from] FeatureError),
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("no frames recorded")]
    NoFrames,
}
