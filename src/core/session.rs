//! 连接状态与帧缓冲
//!
//! 实时连接层逐帧推送原始数据，这里负责归一化并按时间戳顺序缓存。

use log::{debug, info, warn};
use serde_json::Value;

use crate::core::frame::{normalize, Frame, FrameError};

/// 连接状态：未连接服务器 / 仅连接服务器 / 客户端已配对
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    ServerOnly,
    Paired,
}

impl ConnectionStatus {
    pub fn from_flags(server_connected: bool, client_connected: bool) -> Self {
        match (server_connected, client_connected) {
            (false, _) => ConnectionStatus::Disconnected,
            (true, false) => ConnectionStatus::ServerOnly,
            (true, true) => ConnectionStatus::Paired,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    ServerConnected,
    ServerDisconnected,
    ClientPaired,
    ClientLeft,
    Frame(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotRecording,
    /// 时间戳早于缓冲区中最后一帧
    OutOfOrder { last: i64, got: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    StatusChanged(ConnectionStatus),
    FrameBuffered,
    FrameSkipped(SkipReason),
}

#[derive(Debug, Default)]
pub struct FrameSession {
    server_connected: bool,
    client_connected: bool,
    recording: bool,
    frames: Vec<Frame>,
}

impl FrameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ConnectionStatus {
        ConnectionStatus::from_flags(self.server_connected, self.client_connected)
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// 开始录制，丢弃上一次残留的帧
    pub fn start_recording(&mut self) {
        if !self.frames.is_empty() {
            debug!("discarding {} stale frames", self.frames.len());
        }
        self.frames.clear();
        self.recording = true;
        info!("⏺️ recording started");
    }

    pub fn stop_recording(&mut self) {
        if self.recording {
            info!("⏹️ recording stopped with {} frames", self.frames.len());
        }
        self.recording = false;
    }

    /// 取出全部已缓存的帧
    pub fn take_frames(&mut self) -> Vec<Frame> {
        std::mem::take(&mut self.frames)
    }

    pub fn handle_event(&mut self, event: ConnectionEvent) -> Result<EventOutcome, FrameError> {
        match event {
            ConnectionEvent::ServerConnected => self.server_connected = true,
            ConnectionEvent::ServerDisconnected => {
                self.server_connected = false;
                self.client_connected = false;
                self.on_lost_connection();
            }
            ConnectionEvent::ClientPaired => self.client_connected = true,
            ConnectionEvent::ClientLeft => {
                self.client_connected = false;
                self.on_lost_connection();
            }
            ConnectionEvent::Frame(raw) => return self.push_raw(&raw),
        }

        let status = self.status();
        info!("🔌 connection status: {:?}", status);
        Ok(EventOutcome::StatusChanged(status))
    }

    /// 归一化一帧并在录制中时缓存
    pub fn push_raw(&mut self, raw: &Value) -> Result<EventOutcome, FrameError> {
        let normalized = normalize(raw).map_err(|e| {
            warn!("⚠️ dropping malformed frame: {}", e);
            e
        })?;
        if !normalized.defaulted.is_empty() {
            debug!("frame defaulted fields: {:?}", normalized.defaulted);
        }
        Ok(self.push_frame(normalized.frame))
    }

    pub fn push_frame(&mut self, frame: Frame) -> EventOutcome {
        if !self.recording {
            return EventOutcome::FrameSkipped(SkipReason::NotRecording);
        }

        if let Some(last) = self.frames.last() {
            if frame.timestamp < last.timestamp {
                let reason = SkipReason::OutOfOrder {
                    last: last.timestamp,
                    got: frame.timestamp,
                };
                warn!("⚠️ out-of-order frame skipped: {:?}", reason);
                return EventOutcome::FrameSkipped(reason);
            }
        }

        self.frames.push(frame);
        EventOutcome::FrameBuffered
    }

    fn on_lost_connection(&mut self) {
        if self.recording {
            warn!("⚠️ connection lost while recording, {} frames kept", self.frames.len());
        }
        self.recording = false;
    }
}
