//! Declaration - Discovery 输出
//!
//! 一条带标签的方法声明及其提取出的绑定参数。

use serde::{Deserialize, Serialize};

use crate::{
    BindingError, DelayHint, RawTag, SensorTypeCode, TagKind, SENSOR_TYPE_UNSET,
};

/// 方法的一个形参（归一化渲染）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamType {
    /// 展示形式 (e.g. "&SensorEvent", "i32")
    pub display: String,

    /// 类型路径最后一段
    pub type_name: String,

    /// 是否为共享引用
    pub by_ref: bool,
}

impl ParamType {
    /// 构造一个形参描述
    pub fn new(type_name: impl Into<String>, by_ref: bool) -> Self {
        let type_name = type_name.into();
        let display = if by_ref {
            format!("&{type_name}")
        } else {
            type_name.clone()
        };
        Self {
            display,
            type_name,
            by_ref,
        }
    }
}

/// 一条已校验的标签声明
///
/// 构造后不可变；`sensor_type` 保证不等于 `SENSOR_TYPE_UNSET`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    owner: String,
    method: String,
    kind: TagKind,
    sensor_type: SensorTypeCode,
    delay: DelayHint,
    params: Vec<ParamType>,
}

impl Declaration {
    /// 从解析出的标签构造声明
    ///
    /// 非触发标签缺少传感器类型时，立即返回 missing-binding-target 错误。
    pub fn new(
        owner: impl Into<String>,
        method: impl Into<String>,
        tag: RawTag,
        params: Vec<ParamType>,
    ) -> Result<Self, BindingError> {
        let method = method.into();
        let sensor_type = tag.sensor_type();

        if sensor_type == SENSOR_TYPE_UNSET {
            return Err(BindingError::MissingSensorType {
                tag: tag.kind(),
                method,
            });
        }

        Ok(Self {
            owner: owner.into(),
            method,
            kind: tag.kind(),
            sensor_type,
            delay: tag.delay(),
            params,
        })
    }

    /// Qualified owning type path (e.g. "devices::Monitor")
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Owning type simple name (last path segment)
    pub fn owner_simple(&self) -> &str {
        self.owner.rsplit("::").next().unwrap_or(&self.owner)
    }

    /// Tagged method name
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Tag kind carried by the declaration
    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// Bound sensor type code
    pub fn sensor_type(&self) -> SensorTypeCode {
        self.sensor_type
    }

    /// Delay hint, possibly `DELAY_UNSET`
    pub fn delay(&self) -> DelayHint {
        self.delay
    }

    /// Declared parameter list
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }
}
