use crate::core::features::{HAND_LEN, HAND_LEN_WITH_ELBOW};
use crate::core::frame::{Frame, Hand, Point};

/// 单手向量布局，显式传入每一次提取调用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandLayout {
    pub include_elbow: bool,
}

impl HandLayout {
    /// shape + track 使用，单手 66
    pub const WITH_ELBOW: HandLayout = HandLayout {
        include_elbow: true,
    };
    /// 列表导出使用，单手 63
    pub const WITHOUT_ELBOW: HandLayout = HandLayout {
        include_elbow: false,
    };

    pub fn hand_len(&self) -> usize {
        if self.include_elbow {
            HAND_LEN_WITH_ELBOW
        } else {
            HAND_LEN
        }
    }

    /// 左右手拼接后的长度
    pub fn frame_len(&self) -> usize {
        self.hand_len() * 2
    }
}

/// 单手关节点序列：腕部、[肘部]、再按手指类型升序的 mcp / pip / dip / 指尖
pub fn hand_points(hand: &Hand, layout: HandLayout) -> Vec<Point> {
    let mut points = Vec::with_capacity(layout.hand_len() / 3);
    points.push(hand.wrist());
    if layout.include_elbow {
        points.push(hand.elbow());
    }

    for finger in hand.sorted_fingers() {
        points.extend([
            finger.mcp_position,
            finger.pip_position,
            finger.dip_position,
            finger.tip_position(),
        ]);
    }
    points
}

/// 展平为 x, y, z 序列；shape 模式下所有点减去第一个点（腕部）
///
/// 手指不足 5 根时向量会变短，调用方需要自行处理
pub fn hand_to_vector(hand: &Hand, shape: bool, layout: HandLayout) -> Vec<f64> {
    let points = hand_points(hand, layout);
    let origin = match (shape, points.first()) {
        (true, Some(&first)) => first,
        _ => [0.0; 3],
    };

    points
        .iter()
        .flat_map(|p| [p[0] - origin[0], p[1] - origin[1], p[2] - origin[2]])
        .collect()
}

/// 左手在前、右手在后；缺失的一侧用 0 填充
pub fn frame_to_vector(frame: &Frame, shape: bool, layout: HandLayout) -> Vec<f64> {
    let mut vector = Vec::with_capacity(layout.frame_len());
    for hand in [frame.left_hand(), frame.right_hand()] {
        match hand {
            Some(hand) => vector.extend(hand_to_vector(hand, shape, layout)),
            None => vector.resize(vector.len() + layout.hand_len(), 0.0),
        }
    }
    vector
}
