//! 帧特征提取
//!
//! 核心流程：
//! 1. 单手 -> 定长向量（腕部 [+ 肘部] + 5 指 x 4 个关节点）
//! 2. 单帧 -> 左手 + 右手拼接，缺失的手以 0 填充
//! 3. 帧序列 -> 抽帧后得到 shape（相对腕部）与 track（帧间差分）两个矩阵

use thiserror::Error;

pub mod extractor;
pub mod reducer;

pub use extractor::{frame_to_vector, hand_points, hand_to_vector, HandLayout};
pub use reducer::{subsample, to_list, to_shape_and_track, track_delta, FrameList, ShapeTrack};

/// 每只手的关节点数量（不含肘部）
pub const LANDMARKS: usize = 21;
/// 不含肘部时单手向量长度
pub const HAND_LEN: usize = LANDMARKS * 3;
/// 含肘部时单手向量长度
pub const HAND_LEN_WITH_ELBOW: usize = (LANDMARKS + 1) * 3;
/// 默认抽帧间隔
pub const DEFAULT_FRAME_MOD: usize = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FeatureError {
    #[error("frame mod must be at least 1, got {0}")]
    InvalidFrameMod(usize),
}
