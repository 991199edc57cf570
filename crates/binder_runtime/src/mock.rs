//! Mock 传感器服务
//!
//! 用于单元测试的 mock 实现，可配置可用的传感器类型，
//! 并记录全部注册/注销调用供断言。

use std::sync::{Arc, Mutex};

use contracts::{sensor_type_name, DelayHint, SensorTypeCode, TYPE_SIGNIFICANT_MOTION};
use tracing::debug;

use crate::{
    SensorEvent, SensorEventHandler, SensorHandle, SensorService, TriggerEvent, TriggerHandler,
};

/// 服务收到的一次调用（按发生顺序记录）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Register {
        sensor_type: SensorTypeCode,
        delay: DelayHint,
    },
    Unregister {
        sensor_type: SensorTypeCode,
    },
    RequestTrigger {
        sensor_type: SensorTypeCode,
    },
    CancelTrigger {
        sensor_type: SensorTypeCode,
    },
}

/// Mock 传感器服务
pub struct MockSensorService {
    /// 该设备上可用的传感器类型
    available: Vec<SensorTypeCode>,
    /// 当前注册的周期监听器
    listeners: Mutex<Vec<(SensorTypeCode, DelayHint, Arc<SensorEventHandler>)>>,
    /// 当前挂起的触发监听器
    trigger_listeners: Mutex<Vec<(SensorTypeCode, Arc<TriggerHandler>)>>,
    /// 调用记录
    calls: Mutex<Vec<ServiceCall>>,
}

impl MockSensorService {
    /// 创建没有任何可用传感器的服务
    pub fn new() -> Self {
        Self::with_sensors(Vec::new())
    }

    /// 创建指定传感器类型可用的服务
    pub fn with_sensors(available: Vec<SensorTypeCode>) -> Self {
        Self {
            available,
            listeners: Mutex::new(Vec::new()),
            trigger_listeners: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 全部调用记录
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// 当前注册的周期监听器数量
    pub fn registered_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// 当前挂起的触发监听器数量
    pub fn pending_trigger_count(&self) -> usize {
        self.trigger_listeners.lock().unwrap().len()
    }

    /// 向匹配类型的监听器投递一条传感器事件
    pub fn deliver_sensor_event(&self, sensor_type: SensorTypeCode, event: &SensorEvent) {
        let handlers: Vec<Arc<SensorEventHandler>> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|(code, _, _)| *code == sensor_type)
            .map(|(_, _, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler.sensor_changed(event);
        }
    }

    /// 向匹配类型的监听器投递一次精度变化
    pub fn deliver_accuracy_changed(&self, sensor: &SensorHandle, accuracy: i32) {
        let handlers: Vec<Arc<SensorEventHandler>> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|(code, _, _)| *code == sensor.sensor_type)
            .map(|(_, _, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler.accuracy_changed(sensor, accuracy);
        }
    }

    /// 触发一次 significant-motion
    ///
    /// 平台契约：触发监听器只触发一次，随后自动注销。
    pub fn fire_trigger(&self, event: &TriggerEvent) {
        let fired: Vec<(SensorTypeCode, Arc<TriggerHandler>)> = {
            let mut pending = self.trigger_listeners.lock().unwrap();
            let fired = pending
                .iter()
                .filter(|(code, _)| *code == TYPE_SIGNIFICANT_MOTION)
                .map(|(code, handler)| (*code, Arc::clone(handler)))
                .collect();
            pending.retain(|(code, _)| *code != TYPE_SIGNIFICANT_MOTION);
            fired
        };

        debug!(count = fired.len(), "firing trigger listeners");
        for (_, handler) in fired {
            handler.triggered(event);
        }
    }

    fn handle_for(&self, sensor_type: SensorTypeCode) -> SensorHandle {
        SensorHandle::new(
            sensor_type,
            sensor_type_name(sensor_type).unwrap_or("sensor"),
        )
    }
}

impl Default for MockSensorService {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorService for MockSensorService {
    fn default_sensor(&self, sensor_type: SensorTypeCode) -> Option<SensorHandle> {
        self.available
            .contains(&sensor_type)
            .then(|| self.handle_for(sensor_type))
    }

    fn register_listener(
        &self,
        handler: Arc<SensorEventHandler>,
        sensor: &SensorHandle,
        delay: DelayHint,
    ) {
        self.calls.lock().unwrap().push(ServiceCall::Register {
            sensor_type: sensor.sensor_type,
            delay,
        });
        self.listeners
            .lock()
            .unwrap()
            .push((sensor.sensor_type, delay, handler));
    }

    fn unregister_listener(&self, handler: Arc<SensorEventHandler>) {
        let mut listeners = self.listeners.lock().unwrap();
        let Some(idx) = listeners
            .iter()
            .position(|(_, _, registered)| Arc::ptr_eq(registered, &handler))
        else {
            // 注销未注册的监听器是平台契约允许的 no-op
            return;
        };
        let (sensor_type, _, _) = listeners.remove(idx);
        self.calls
            .lock()
            .unwrap()
            .push(ServiceCall::Unregister { sensor_type });
    }

    fn request_trigger_sensor(&self, handler: Arc<TriggerHandler>, sensor: &SensorHandle) {
        self.calls.lock().unwrap().push(ServiceCall::RequestTrigger {
            sensor_type: sensor.sensor_type,
        });
        self.trigger_listeners
            .lock()
            .unwrap()
            .push((sensor.sensor_type, handler));
    }

    fn cancel_trigger_sensor(&self, handler: Arc<TriggerHandler>, sensor: &SensorHandle) {
        let mut pending = self.trigger_listeners.lock().unwrap();
        let Some(idx) = pending
            .iter()
            .position(|(_, registered)| Arc::ptr_eq(registered, &handler))
        else {
            return;
        };
        pending.remove(idx);
        self.calls.lock().unwrap().push(ServiceCall::CancelTrigger {
            sensor_type: sensor.sensor_type,
        });
    }
}
