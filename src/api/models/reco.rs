use serde::{Deserialize, Serialize};

use crate::core::features::ShapeTrack;

/// 识别请求体，走代理时附带真实的识别地址 addr
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoRequest {
    pub shape: Vec<Vec<f64>>,
    pub track: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,
}

impl RecoRequest {
    pub fn new(param: &ShapeTrack, addr: Option<String>) -> Self {
        Self {
            shape: param.shape.clone(),
            track: param.track.clone(),
            addr,
        }
    }
}

/// 识别结果，code 原样透传
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoResponse {
    pub code: i64,
    /// 预测的手语标签
    pub data: String,
}

impl RecoResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// 测试用例：没有 LeapMotion 时用于调试识别接口
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub shape: Vec<Vec<f64>>,
    pub track: Vec<Vec<f64>>,
    pub label: String,
}

impl TestCase {
    pub fn to_shape_track(&self) -> ShapeTrack {
        ShapeTrack {
            shape: self.shape.clone(),
            track: self.track.clone(),
        }
    }
}
