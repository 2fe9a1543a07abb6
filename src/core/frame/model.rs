use serde::{Deserialize, Serialize};

/// 设备坐标系中的三维点 (x, y, z)，不做单位换算
pub type Point = [f64; 3];

/// 骨段：prevJoint 为近端，nextJoint 为远端
///
/// 手臂上 prevJoint 是肘部，nextJoint 是腕部
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bone {
    pub prev_joint: Point,
    pub next_joint: Point,
}

/// 手指远节骨，next_joint 即指尖
///
/// 设备原始数据里指尖字段叫 `btipPosition`，近端关节通常不下发，所以 prev_joint 可缺省
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistalBone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_joint: Option<Point>,
    pub next_joint: Point,
}

/// 手指类型，数值与设备保持一致 (0..=4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FingerType {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

impl TryFrom<u8> for FingerType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FingerType::Thumb),
            1 => Ok(FingerType::Index),
            2 => Ok(FingerType::Middle),
            3 => Ok(FingerType::Ring),
            4 => Ok(FingerType::Pinky),
            other => Err(format!("finger type {} out of range 0..=4", other)),
        }
    }
}

impl From<FingerType> for u8 {
    fn from(value: FingerType) -> Self {
        value as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finger {
    #[serde(rename = "type")]
    pub finger_type: FingerType,
    pub mcp_position: Point,
    pub pip_position: Point,
    pub dip_position: Point,
    /// 保留字段，特征提取暂未使用
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carp_position: Option<Point>,
    pub distal: DistalBone,
    pub valid: bool,
}

impl Finger {
    pub fn tip_position(&self) -> Point {
        self.distal.next_joint
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandType {
    Left,
    Right,
}

impl HandType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "left" => Some(HandType::Left),
            "right" => Some(HandType::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    /// 无法识别的左右手标记为 None，特征提取时不会被匹配
    #[serde(rename = "type")]
    pub hand_type: Option<HandType>,
    pub fingers: Vec<Finger>,
    pub arm: Bone,
    pub valid: bool,
}

impl Hand {
    pub fn wrist(&self) -> Point {
        self.arm.next_joint
    }

    pub fn elbow(&self) -> Point {
        self.arm.prev_joint
    }

    /// 按手指类型升序排列，类型相同时保持原顺序
    pub fn sorted_fingers(&self) -> Vec<&Finger> {
        let mut fingers: Vec<&Finger> = self.fingers.iter().collect();
        fingers.sort_by_key(|f| f.finger_type);
        fingers
    }
}

/// 固定的帧记录标签，序列化为 `"type": "frame"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameTag {
    #[default]
    Frame,
}

/// 一帧手部骨骼快照，构造后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub current_frame_rate: f64,
    pub timestamp: i64,
    pub hands: Vec<Hand>,
    pub valid: bool,
    #[serde(rename = "type")]
    pub tag: FrameTag,
}

impl Frame {
    pub fn empty() -> Self {
        Self {
            current_frame_rate: 0.0,
            timestamp: 0,
            hands: Vec::new(),
            valid: false,
            tag: FrameTag::Frame,
        }
    }

    /// 第一只匹配类型的手，重复的同侧手被忽略
    pub fn hand(&self, hand_type: HandType) -> Option<&Hand> {
        self.hands
            .iter()
            .find(|h| h.hand_type == Some(hand_type))
    }

    pub fn left_hand(&self) -> Option<&Hand> {
        self.hand(HandType::Left)
    }

    pub fn right_hand(&self) -> Option<&Hand> {
        self.hand(HandType::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_hand(hand_type: Option<HandType>, wrist_x: f64) -> Hand {
        Hand {
            hand_type,
            fingers: vec![],
            arm: Bone {
                prev_joint: [0.0, 0.0, 0.0],
                next_joint: [wrist_x, 0.0, 0.0],
            },
            valid: true,
        }
    }

    #[test]
    fn test_first_hand_of_each_side_wins() {
        let frame = Frame {
            hands: vec![
                bare_hand(Some(HandType::Right), 1.0),
                bare_hand(None, 2.0),
                bare_hand(Some(HandType::Right), 3.0),
            ],
            ..Frame::empty()
        };

        assert_eq!(frame.right_hand().map(|h| h.wrist()[0]), Some(1.0));
        assert!(frame.left_hand().is_none());
    }

    #[test]
    fn test_finger_type_range() {
        assert_eq!(FingerType::try_from(4), Ok(FingerType::Pinky));
        assert!(FingerType::try_from(5).is_err());
    }

    #[test]
    fn test_frame_serializes_with_device_field_names() {
        let value = serde_json::to_value(Frame::empty()).expect("序列化失败");
        assert_eq!(value["type"], "frame");
        assert_eq!(value["currentFrameRate"], 0.0);
        assert!(value["hands"].as_array().is_some());
    }
}
