//! 平台传感器常量表
//!
//! 传感器类型码与采样延迟档位。标签参数既可以写整数字面量，
//! 也可以写这里定义的常量名。

/// Platform sensor type code
pub type SensorTypeCode = i32;

/// Sampling delay hint
pub type DelayHint = i32;

/// 哨兵值：标签未指定传感器类型
pub const SENSOR_TYPE_UNSET: SensorTypeCode = -1;

/// 哨兵值：标签未指定延迟
pub const DELAY_UNSET: DelayHint = -1;

pub const TYPE_ACCELEROMETER: SensorTypeCode = 1;
pub const TYPE_MAGNETIC_FIELD: SensorTypeCode = 2;
pub const TYPE_ORIENTATION: SensorTypeCode = 3;
pub const TYPE_GYROSCOPE: SensorTypeCode = 4;
pub const TYPE_LIGHT: SensorTypeCode = 5;
pub const TYPE_PRESSURE: SensorTypeCode = 6;
pub const TYPE_PROXIMITY: SensorTypeCode = 8;
pub const TYPE_GRAVITY: SensorTypeCode = 9;
pub const TYPE_LINEAR_ACCELERATION: SensorTypeCode = 10;
pub const TYPE_ROTATION_VECTOR: SensorTypeCode = 11;
pub const TYPE_RELATIVE_HUMIDITY: SensorTypeCode = 12;
pub const TYPE_AMBIENT_TEMPERATURE: SensorTypeCode = 13;

/// 触发标签专用的传感器类型（固定映射）
pub const TYPE_SIGNIFICANT_MOTION: SensorTypeCode = 17;

pub const TYPE_STEP_DETECTOR: SensorTypeCode = 18;
pub const TYPE_STEP_COUNTER: SensorTypeCode = 19;
pub const TYPE_HEART_RATE: SensorTypeCode = 21;

pub const SENSOR_DELAY_FASTEST: DelayHint = 0;
pub const SENSOR_DELAY_GAME: DelayHint = 1;
pub const SENSOR_DELAY_UI: DelayHint = 2;
pub const SENSOR_DELAY_NORMAL: DelayHint = 3;

/// 常量名表 (name, code)
const SENSOR_TYPE_NAMES: &[(&str, SensorTypeCode)] = &[
    ("TYPE_ACCELEROMETER", TYPE_ACCELEROMETER),
    ("TYPE_MAGNETIC_FIELD", TYPE_MAGNETIC_FIELD),
    ("TYPE_ORIENTATION", TYPE_ORIENTATION),
    ("TYPE_GYROSCOPE", TYPE_GYROSCOPE),
    ("TYPE_LIGHT", TYPE_LIGHT),
    ("TYPE_PRESSURE", TYPE_PRESSURE),
    ("TYPE_PROXIMITY", TYPE_PROXIMITY),
    ("TYPE_GRAVITY", TYPE_GRAVITY),
    ("TYPE_LINEAR_ACCELERATION", TYPE_LINEAR_ACCELERATION),
    ("TYPE_ROTATION_VECTOR", TYPE_ROTATION_VECTOR),
    ("TYPE_RELATIVE_HUMIDITY", TYPE_RELATIVE_HUMIDITY),
    ("TYPE_AMBIENT_TEMPERATURE", TYPE_AMBIENT_TEMPERATURE),
    ("TYPE_SIGNIFICANT_MOTION", TYPE_SIGNIFICANT_MOTION),
    ("TYPE_STEP_DETECTOR", TYPE_STEP_DETECTOR),
    ("TYPE_STEP_COUNTER", TYPE_STEP_COUNTER),
    ("TYPE_HEART_RATE", TYPE_HEART_RATE),
];

const DELAY_NAMES: &[(&str, DelayHint)] = &[
    ("SENSOR_DELAY_FASTEST", SENSOR_DELAY_FASTEST),
    ("SENSOR_DELAY_GAME", SENSOR_DELAY_GAME),
    ("SENSOR_DELAY_UI", SENSOR_DELAY_UI),
    ("SENSOR_DELAY_NORMAL", SENSOR_DELAY_NORMAL),
];

/// 按常量名解析传感器类型码
pub fn sensor_type_code(name: &str) -> Option<SensorTypeCode> {
    SENSOR_TYPE_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}

/// 按类型码反查常量名（诊断输出用）
pub fn sensor_type_name(code: SensorTypeCode) -> Option<&'static str> {
    SENSOR_TYPE_NAMES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(n, _)| *n)
}

/// 按常量名解析延迟档位
pub fn delay_hint(name: &str) -> Option<DelayHint> {
    DELAY_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, delay)| *delay)
}
