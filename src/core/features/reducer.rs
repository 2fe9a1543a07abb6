use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::features::extractor::{frame_to_vector, HandLayout};
use crate::core::features::FeatureError;
use crate::core::frame::Frame;

/// 识别服务的输入：shape 与 track 逐行对应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTrack {
    pub shape: Vec<Vec<f64>>,
    pub track: Vec<Vec<f64>>,
}

impl ShapeTrack {
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }
}

/// 不含肘部、不抽帧的 shape 列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameList {
    pub data: Vec<Vec<f64>>,
}

/// 保留下标能被 frame_mod 整除的帧，第 0 帧总会保留
pub fn subsample(frames: &[Frame], frame_mod: usize) -> Result<Vec<&Frame>, FeatureError> {
    if frame_mod == 0 {
        return Err(FeatureError::InvalidFrameMod(frame_mod));
    }
    Ok(frames.iter().step_by(frame_mod).collect())
}

/// 帧间差分：当前值与上一帧值都非 0 时才取差值，否则为 0
///
/// 真实的 0 坐标与缺失无法区分，识别模型按此口径训练，不能改成数值判断。
pub fn track_delta(current: &[f64], previous: &[f64]) -> Vec<f64> {
    current
        .iter()
        .enumerate()
        .map(|(i, &cur)| {
            let prev = previous.get(i).copied().unwrap_or(0.0);
            if is_truthy(cur) && is_truthy(prev) {
                cur - prev
            } else {
                0.0
            }
        })
        .collect()
}

fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// 抽帧后生成 shape（相对腕部）与 track（绝对坐标差分），单行 132
pub fn to_shape_and_track(frames: &[Frame], frame_mod: usize) -> Result<ShapeTrack, FeatureError> {
    let layout = HandLayout::WITH_ELBOW;
    let kept = subsample(frames, frame_mod)?;
    debug!(
        "shape/track: {} frames -> {} kept (frame_mod = {})",
        frames.len(),
        kept.len(),
        frame_mod
    );

    let (shape, absolute): (Vec<_>, Vec<_>) = kept
        .par_iter()
        .map(|frame| {
            (
                frame_to_vector(frame, true, layout),
                frame_to_vector(frame, false, layout),
            )
        })
        .unzip();

    let mut previous = vec![0.0; layout.frame_len()];
    let mut track = Vec::with_capacity(absolute.len());
    for current in absolute {
        track.push(track_delta(&current, &previous));
        previous = current;
    }

    Ok(ShapeTrack { shape, track })
}

/// 逐帧 shape 向量，不含肘部，单行 126
pub fn to_list(frames: &[Frame]) -> FrameList {
    let layout = HandLayout::WITHOUT_ELBOW;
    let data = frames
        .par_iter()
        .map(|frame| frame_to_vector(frame, true, layout))
        .collect();
    FrameList { data }
}
