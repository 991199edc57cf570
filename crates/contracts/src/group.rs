//! 分组注册表 - Discovery 聚合结构
//!
//! 每个 owning type 一个 [`TypeBindings`]：
//! 传感器类型码 → 标签槽位 ([`SlotSet`]) 的有序映射。
//! 迭代顺序即首次插入顺序，保证生成产物可复现。

use crate::{BindingError, Declaration, SensorTypeCode, TagKind};

/// 一个 (owning type, sensor type) 组合下的标签槽位
///
/// 每个标签种类最多占用一个槽位。
#[derive(Debug, Clone, Default)]
pub struct SlotSet {
    changed: Option<Declaration>,
    accuracy: Option<Declaration>,
    not_available: Option<Declaration>,
    trigger: Option<Declaration>,
}

impl SlotSet {
    /// 读取某标签种类占用的声明
    pub fn get(&self, kind: TagKind) -> Option<&Declaration> {
        match kind {
            TagKind::SensorChanged => self.changed.as_ref(),
            TagKind::AccuracyChanged => self.accuracy.as_ref(),
            TagKind::NotAvailable => self.not_available.as_ref(),
            TagKind::Trigger => self.trigger.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: TagKind) -> &mut Option<Declaration> {
        match kind {
            TagKind::SensorChanged => &mut self.changed,
            TagKind::AccuracyChanged => &mut self.accuracy,
            TagKind::NotAvailable => &mut self.not_available,
            TagKind::Trigger => &mut self.trigger,
        }
    }

    /// 槽位是否全部为空
    pub fn is_empty(&self) -> bool {
        TagKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }
}

/// 单个 owning type 的全部绑定声明
#[derive(Debug, Clone)]
pub struct TypeBindings {
    owner: String,
    slots: Vec<(SensorTypeCode, SlotSet)>,
}

impl TypeBindings {
    /// 创建空的绑定组
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            slots: Vec::new(),
        }
    }

    /// Qualified owning type path
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Owning type simple name (last path segment)
    pub fn owner_simple(&self) -> &str {
        self.owner.rsplit("::").next().unwrap_or(&self.owner)
    }

    /// 插入一条声明到对应槽位
    ///
    /// 同一 (sensor type, tag kind) 槽位被第二次占用时返回
    /// duplicate-binding 错误。
    pub fn add(&mut self, decl: Declaration) -> Result<(), BindingError> {
        let sensor_type = decl.sensor_type();
        let kind = decl.kind();

        let idx = match self.slots.iter().position(|(code, _)| *code == sensor_type) {
            Some(idx) => idx,
            None => {
                self.slots.push((sensor_type, SlotSet::default()));
                self.slots.len() - 1
            }
        };

        let slot = &mut self.slots[idx].1;
        if slot.get(kind).is_some() {
            return Err(BindingError::duplicate_binding(
                kind,
                sensor_type,
                &self.owner,
                decl.method(),
            ));
        }

        *slot.slot_mut(kind) = Some(decl);
        Ok(())
    }

    /// 该类型是否存在某种标签（任意传感器类型下）
    pub fn has_tag(&self, kind: TagKind) -> bool {
        self.slots.iter().any(|(_, slot)| slot.get(kind).is_some())
    }

    /// 按首次插入顺序迭代 (sensor type, slot)
    pub fn iter(&self) -> impl Iterator<Item = (SensorTypeCode, &SlotSet)> {
        self.slots.iter().map(|(code, slot)| (*code, slot))
    }

    /// 绑定的传感器类型数量
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// 是否没有任何绑定
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// 一次发现轮次的全量结果：owning type → 绑定组
///
/// 显式传递的值对象，不是进程级全局状态；`clear` 支持复用。
#[derive(Debug, Default)]
pub struct DiscoveryMap {
    entries: Vec<TypeBindings>,
}

impl DiscoveryMap {
    /// 创建空映射
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取某 owning type 的绑定组
    pub fn get(&self, owner: &str) -> Option<&TypeBindings> {
        self.entries.iter().find(|entry| entry.owner() == owner)
    }

    /// 取出或新建某 owning type 的绑定组
    pub fn entry_mut(&mut self, owner: &str) -> &mut TypeBindings {
        let idx = match self.entries.iter().position(|entry| entry.owner() == owner) {
            Some(idx) => idx,
            None => {
                self.entries.push(TypeBindings::new(owner));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }

    /// 移除某 owning type（该类型的错误使其整体出局）
    pub fn remove(&mut self, owner: &str) -> Option<TypeBindings> {
        let idx = self.entries.iter().position(|entry| entry.owner() == owner)?;
        Some(self.entries.remove(idx))
    }

    /// 按首次插入顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = &TypeBindings> {
        self.entries.iter()
    }

    /// owning type 数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空，供下一轮发现复用
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParamType, RawTag};

    fn changed_decl(method: &str, sensor_type: i32, delay: i32) -> Declaration {
        Declaration::new(
            "test::Test",
            method,
            RawTag::SensorChanged { sensor_type, delay },
            vec![ParamType::new("SensorEvent", true)],
        )
        .unwrap()
    }

    fn accuracy_decl(method: &str, sensor_type: i32, delay: i32) -> Declaration {
        Declaration::new(
            "test::Test",
            method,
            RawTag::AccuracyChanged { sensor_type, delay },
            vec![
                ParamType::new("SensorHandle", true),
                ParamType::new("i32", false),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_add_and_lookup() {
        let mut bindings = TypeBindings::new("test::Test");
        bindings.add(changed_decl("on_changed", 2, 3)).unwrap();
        bindings.add(accuracy_decl("on_accuracy", 2, -1)).unwrap();

        assert_eq!(bindings.len(), 1);
        let (code, slot) = bindings.iter().next().unwrap();
        assert_eq!(code, 2);
        assert_eq!(slot.get(TagKind::SensorChanged).unwrap().method(), "on_changed");
        assert_eq!(slot.get(TagKind::AccuracyChanged).unwrap().method(), "on_accuracy");
        assert!(slot.get(TagKind::Trigger).is_none());
    }

    #[test]
    fn test_duplicate_slot_is_rejected() {
        let mut bindings = TypeBindings::new("test::Test");
        bindings.add(changed_decl("first", 2, 3)).unwrap();

        let err = bindings.add(changed_decl("second", 2, 3)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("already bound"), "got: {msg}");
        assert!(msg.contains("on_sensor_changed"), "got: {msg}");
        assert!(msg.contains("second"), "got: {msg}");
    }

    #[test]
    fn test_same_kind_different_sensor_types_ok() {
        let mut bindings = TypeBindings::new("test::Test");
        bindings.add(changed_decl("on_mag", 2, 3)).unwrap();
        bindings.add(changed_decl("on_light", 5, 3)).unwrap();
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut bindings = TypeBindings::new("test::Test");
        bindings.add(changed_decl("c", 9, 0)).unwrap();
        bindings.add(changed_decl("a", 1, 0)).unwrap();
        bindings.add(changed_decl("b", 5, 0)).unwrap();

        let order: Vec<_> = bindings.iter().map(|(code, _)| code).collect();
        assert_eq!(order, vec![9, 1, 5]);
    }

    #[test]
    fn test_has_tag() {
        let mut bindings = TypeBindings::new("test::Test");
        bindings.add(changed_decl("on_changed", 2, 3)).unwrap();
        assert!(bindings.has_tag(TagKind::SensorChanged));
        assert!(!bindings.has_tag(TagKind::NotAvailable));
    }

    #[test]
    fn test_discovery_map_entry_and_reset() {
        let mut map = DiscoveryMap::new();
        map.entry_mut("a::One").add(changed_decl("m", 2, 3)).unwrap();
        map.entry_mut("b::Two").add(changed_decl("m", 5, 3)).unwrap();
        map.entry_mut("a::One").add(accuracy_decl("n", 2, -1)).unwrap();

        assert_eq!(map.len(), 2);
        let owners: Vec<_> = map.iter().map(|b| b.owner().to_string()).collect();
        assert_eq!(owners, vec!["a::One", "b::Two"]);

        assert!(map.remove("a::One").is_some());
        assert_eq!(map.len(), 1);

        map.clear();
        assert!(map.is_empty());
    }
}
