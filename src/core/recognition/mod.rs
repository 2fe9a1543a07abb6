//! 手语识别服务客户端

use thiserror::Error;

use crate::api::models::reco::RecoResponse;
use crate::core::features::ShapeTrack;
use crate::core::settings::ServerSettings;

mod client;

pub use client::HttpRecognizer;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),
    #[error("识别结果解析失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("识别服务返回 {status}: {body}")]
    Status { status: u16, body: String },
}

/// 识别请求的发送目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Direct { url: String },
    /// 明文 http 的识别地址经由站点代理转发，真实地址放在请求体 addr 中
    Proxy { proxy_url: String, addr: String },
}

impl Route {
    pub fn url(&self) -> &str {
        match self {
            Route::Direct { url } => url.as_str(),
            Route::Proxy { proxy_url, .. } => proxy_url.as_str(),
        }
    }

    pub fn addr(&self) -> Option<&str> {
        match self {
            Route::Direct { .. } => None,
            Route::Proxy { addr, .. } => Some(addr.as_str()),
        }
    }
}

pub fn route(settings: &ServerSettings) -> Route {
    let addr = settings.reco_url();
    if addr.starts_with("http:") && !settings.debug {
        Route::Proxy {
            proxy_url: settings.proxy_url(),
            addr,
        }
    } else {
        Route::Direct { url: addr }
    }
}

pub trait Recognizer: Send + Sync {
    fn recognize(&self, param: &ShapeTrack) -> Result<RecoResponse, RecognitionError>;
}

/// 固定返回结果的识别器，用于离线调试
pub struct MockRecognizer {
    label_for: Box<dyn Fn(&ShapeTrack) -> String + Send + Sync>,
}

impl MockRecognizer {
    pub fn with_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            label_for: Box::new(move |_| label.clone()),
        }
    }

    pub fn with_pattern<F>(pattern: F) -> Self
    where
        F: Fn(&ShapeTrack) -> String + Send + Sync + 'static,
    {
        Self {
            label_for: Box::new(pattern),
        }
    }
}

impl Recognizer for MockRecognizer {
    fn recognize(&self, param: &ShapeTrack) -> Result<RecoResponse, RecognitionError> {
        Ok(RecoResponse {
            code: 0,
            data: (self.label_for)(param),
        })
    }
}
