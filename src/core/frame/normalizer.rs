use log::debug;
use serde_json::{Map, Value};

use crate::core::frame::model::{
    Bone, DistalBone, Finger, FingerType, Frame, FrameTag, Hand, HandType, Point,
};
use crate::core::frame::FrameError;

/// 可选字段缺失时被填充了默认值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultedField {
    /// currentFrameRate -> 0
    CurrentFrameRate,
    /// timestamp -> 0
    Timestamp,
    /// hands 缺失或不是数组 -> []
    Hands,
    /// valid -> false
    FrameValid,
    HandValid { hand: usize },
    FingerValid { hand: usize, finger: usize },
}

/// 归一化结果：帧本身 + 被默认填充的字段清单
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub frame: Frame,
    pub defaulted: Vec<DefaultedField>,
}

/// 将设备推送的原始帧收窄为内部 Frame
///
/// 可选字段缺失时使用默认值，结构性必需字段（手臂、手指关节点、指尖）缺失时整帧失败。
pub fn normalize(raw: &Value) -> Result<Normalized, FrameError> {
    let mut defaulted = Vec::new();

    let Some(obj) = raw.as_object() else {
        debug!("raw frame is not an object, using empty frame");
        defaulted.extend([
            DefaultedField::CurrentFrameRate,
            DefaultedField::FrameValid,
            DefaultedField::Timestamp,
            DefaultedField::Hands,
        ]);
        return Ok(Normalized {
            frame: Frame::empty(),
            defaulted,
        });
    };

    let current_frame_rate = match obj.get("currentFrameRate").and_then(Value::as_f64) {
        Some(rate) => rate,
        None => {
            defaulted.push(DefaultedField::CurrentFrameRate);
            0.0
        }
    };

    let valid = match valid_flag(obj) {
        Some(valid) => valid,
        None => {
            defaulted.push(DefaultedField::FrameValid);
            false
        }
    };

    let timestamp = match obj.get("timestamp").and_then(as_integer) {
        Some(ts) => ts,
        None => {
            defaulted.push(DefaultedField::Timestamp);
            0
        }
    };

    let hands = match obj.get("hands").and_then(Value::as_array) {
        Some(raw_hands) => raw_hands
            .iter()
            .enumerate()
            .map(|(index, raw_hand)| convert_hand(index, raw_hand, &mut defaulted))
            .collect::<Result<Vec<_>, _>>()?,
        None => {
            defaulted.push(DefaultedField::Hands);
            Vec::new()
        }
    };

    Ok(Normalized {
        frame: Frame {
            current_frame_rate,
            timestamp,
            hands,
            valid,
            tag: FrameTag::Frame,
        },
        defaulted,
    })
}

/// 解析 JSON 文本后归一化
pub fn normalize_str(raw: &str) -> Result<Normalized, FrameError> {
    let value: Value = serde_json::from_str(raw)?;
    normalize(&value)
}

fn convert_hand(
    index: usize,
    raw: &Value,
    defaulted: &mut Vec<DefaultedField>,
) -> Result<Hand, FrameError> {
    let path = format!("hands[{}]", index);
    let obj = as_object(raw, &path)?;

    let hand_type = obj.get("type").and_then(Value::as_str).and_then(HandType::parse);

    let valid = match valid_flag(obj) {
        Some(valid) => valid,
        None => {
            defaulted.push(DefaultedField::HandValid { hand: index });
            false
        }
    };

    let arm_path = format!("{}.arm", path);
    let arm = as_object(required(obj, "arm", &path)?, &arm_path)?;
    let arm = Bone {
        prev_joint: point(required(arm, "prevJoint", &arm_path)?, &format!("{}.prevJoint", arm_path))?,
        next_joint: point(required(arm, "nextJoint", &arm_path)?, &format!("{}.nextJoint", arm_path))?,
    };

    let fingers_path = format!("{}.fingers", path);
    let fingers = required(obj, "fingers", &path)?
        .as_array()
        .ok_or_else(|| FrameError::malformed(&fingers_path, "expected an array"))?
        .iter()
        .enumerate()
        .map(|(finger_index, raw_finger)| {
            convert_finger(index, finger_index, raw_finger, &fingers_path, defaulted)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Hand {
        hand_type,
        fingers,
        arm,
        valid,
    })
}

fn convert_finger(
    hand_index: usize,
    index: usize,
    raw: &Value,
    fingers_path: &str,
    defaulted: &mut Vec<DefaultedField>,
) -> Result<Finger, FrameError> {
    let path = format!("{}[{}]", fingers_path, index);
    let obj = as_object(raw, &path)?;

    let type_path = format!("{}.type", path);
    let finger_type = as_index(required(obj, "type", &path)?)
        .ok_or_else(|| FrameError::malformed(&type_path, "expected a non-negative integer"))?;
    let finger_type = u8::try_from(finger_type)
        .map_err(|e| e.to_string())
        .and_then(FingerType::try_from)
        .map_err(|reason| FrameError::malformed(&type_path, reason))?;

    let landmark = |key: &str| -> Result<Point, FrameError> {
        point(required(obj, key, &path)?, &format!("{}.{}", path, key))
    };
    let mcp_position = landmark("mcpPosition")?;
    let pip_position = landmark("pipPosition")?;
    let dip_position = landmark("dipPosition")?;

    let carp_position = match obj.get("carpPosition") {
        Some(v) if !v.is_null() => Some(point(v, &format!("{}.carpPosition", path))?),
        _ => None,
    };

    let distal = distal_bone(obj, &path)?;

    let valid = match valid_flag(obj) {
        Some(valid) => valid,
        None => {
            defaulted.push(DefaultedField::FingerValid {
                hand: hand_index,
                finger: index,
            });
            false
        }
    };

    Ok(Finger {
        finger_type,
        mcp_position,
        pip_position,
        dip_position,
        carp_position,
        distal,
        valid,
    })
}

/// 设备下发的指尖字段是 `btipPosition`，内部统一放到 distal.nextJoint。
/// 已归一化过的帧再次输入时只有 distal，同样接受。
fn distal_bone(obj: &Map<String, Value>, path: &str) -> Result<DistalBone, FrameError> {
    let distal = obj.get("distal").and_then(Value::as_object);
    let distal_path = format!("{}.distal", path);

    let next_joint = match obj.get("btipPosition") {
        Some(v) if !v.is_null() => point(v, &format!("{}.btipPosition", path))?,
        _ => match distal.and_then(|d| d.get("nextJoint")) {
            Some(v) => point(v, &format!("{}.nextJoint", distal_path))?,
            None => {
                return Err(FrameError::RequiredFieldMissing {
                    path: format!("{}.btipPosition", path),
                })
            }
        },
    };

    let prev_joint = match distal.and_then(|d| d.get("prevJoint")) {
        Some(v) if !v.is_null() => Some(point(v, &format!("{}.prevJoint", distal_path))?),
        _ => None,
    };

    Ok(DistalBone {
        prev_joint,
        next_joint,
    })
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<&'a Value, FrameError> {
    match obj.get(key) {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(FrameError::RequiredFieldMissing {
            path: format!("{}.{}", parent, key),
        }),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, FrameError> {
    value
        .as_object()
        .ok_or_else(|| FrameError::malformed(path, "expected an object"))
}

fn point(value: &Value, path: &str) -> Result<Point, FrameError> {
    let coords = value
        .as_array()
        .filter(|a| a.len() == 3)
        .ok_or_else(|| FrameError::malformed(path, "expected [x, y, z]"))?;

    let mut p = [0.0; 3];
    for (slot, coord) in p.iter_mut().zip(coords) {
        *slot = coord
            .as_f64()
            .ok_or_else(|| FrameError::malformed(path, "coordinate is not a number"))?;
    }
    Ok(p)
}

/// 非负整数，`1.0` 这类整数值的浮点数同样接受
fn as_index(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0)
            .map(|f| f as u64)
    })
}

/// valid 缺失或为 null 时返回 None，否则按真值判断
fn valid_flag(obj: &Map<String, Value>) -> Option<bool> {
    obj.get("valid").filter(|v| !v.is_null()).map(is_truthy)
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

/// JavaScript 风格的真值判断，与 `!!value` 一致
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
