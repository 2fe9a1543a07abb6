//! 手语识别器 - 帧缓冲 + 特征提取 + 远端识别

use log::{info, warn};

use crate::api::models::reco::{RecoResponse, TestCase};
use crate::api::ApiError;
use crate::core::features::{to_list, to_shape_and_track, FrameList};
use crate::core::frame::Frame;
use crate::core::recognition::{HttpRecognizer, Recognizer};
use crate::core::session::{ConnectionEvent, ConnectionStatus, EventOutcome, FrameSession};
use crate::core::settings::AppSettings;

/// 手语识别器
///
/// ```ignore
/// let mut recognizer = SignRecognizer::create(AppSettings::default())?;
/// recognizer.start_recording();
/// recognizer.handle_event(ConnectionEvent::Frame(raw))?;
/// let result = recognizer.recognize()?;
/// println!("{}", result.data);
/// ```
pub struct SignRecognizer {
    settings: AppSettings,
    session: FrameSession,
    recognizer: Box<dyn Recognizer>,
}

impl SignRecognizer {
    /// 使用 HTTP 识别服务创建
    pub fn create(settings: AppSettings) -> Result<Self, ApiError> {
        crate::init_logging();
        settings.validate()?;
        let recognizer = HttpRecognizer::new(settings.server.clone())?;
        info!("🤟 SignRecognizer: created, server = {}", settings.server.address);
        Ok(Self::with_recognizer(settings, Box::new(recognizer)))
    }

    pub fn with_recognizer(settings: AppSettings, recognizer: Box<dyn Recognizer>) -> Self {
        Self {
            settings,
            session: FrameSession::new(),
            recognizer,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn set_frame_mod(&mut self, frame_mod: usize) -> Result<(), ApiError> {
        let mut settings = self.settings.clone();
        settings.capture.frame_mod = frame_mod;
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn status(&self) -> ConnectionStatus {
        self.session.status()
    }

    pub fn handle_event(&mut self, event: ConnectionEvent) -> Result<EventOutcome, ApiError> {
        Ok(self.session.handle_event(event)?)
    }

    pub fn start_recording(&mut self) {
        self.session.start_recording();
    }

    pub fn stop_recording(&mut self) {
        self.session.stop_recording();
    }

    pub fn frame_count(&self) -> usize {
        self.session.frame_count()
    }

    /// 识别缓存帧，成功后才清空缓冲区，失败时可以重试
    pub fn recognize(&mut self) -> Result<RecoResponse, ApiError> {
        self.session.stop_recording();
        let result = self.recognize_frames(self.session.frames())?;
        self.session.take_frames();
        Ok(result)
    }

    pub fn recognize_frames(&self, frames: &[Frame]) -> Result<RecoResponse, ApiError> {
        if frames.is_empty() {
            warn!("⚠️ recognize called without frames");
            return Err(ApiError::NoFrames);
        }

        let param = to_shape_and_track(frames, self.settings.capture.frame_mod)?;
        info!("🔍 recognizing {} frames ({} kept)", frames.len(), param.len());
        let result = self.recognizer.recognize(&param)?;
        info!("✅ recognized: {} (code {})", result.data, result.code);
        Ok(result)
    }

    pub fn recognize_test_case(&self, case: &TestCase) -> Result<RecoResponse, ApiError> {
        info!("🧪 recognizing test case, expected: {}", case.label);
        Ok(self.recognizer.recognize(&case.to_shape_track())?)
    }

    /// 取出缓存帧导出为逐帧列表
    pub fn export_list(&mut self) -> FrameList {
        self.session.stop_recording();
        to_list(&self.session.take_frames())
    }
}
