//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 编译路径端到端（源码 → 发现 → 生成 → 产物可解析）
//! - 运行时场景（按生成产物的形状手写 binder，经注册表驱动）

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = contracts::TagKind::Trigger;
        assert_eq!(contracts::TYPE_SIGNIFICANT_MOTION, 17);
    }
}

#[cfg(test)]
mod compiler_e2e {
    const MONITOR_SOURCE: &str = r#"
pub struct Monitor;

impl Monitor {
    #[on_sensor_changed(sensor_type = 2, delay = 3)]
    pub fn on_field_changed(&self, event: &SensorEvent) {}

    #[on_accuracy_changed(sensor_type = 2)]
    pub fn on_field_accuracy(&self, sensor: &SensorHandle, accuracy: i32) {}

    #[on_sensor_not_available(sensor_type = 2)]
    pub fn on_field_missing(&self) {}

    #[on_trigger]
    pub fn on_motion(&self, event: &TriggerEvent) {}
}
"#;

    /// Full pipeline: parse -> discover -> generate -> parse the artifact.
    #[test]
    fn test_e2e_source_to_artifact() {
        let unit = discovery::parse_source("monitor.rs", MONITOR_SOURCE).unwrap();
        let discovered = discovery::discover(vec![unit]);
        assert!(discovered.is_clean(), "{:?}", discovered.rejections);

        let generated = synthesis::generate(&discovered.map);
        assert!(generated.is_clean(), "{:?}", generated.failures);
        assert_eq!(generated.artifacts.len(), 1);

        let artifact = &generated.artifacts[0];
        assert_eq!(artifact.struct_name, "MonitorSensorBinder");
        assert_eq!(artifact.file_name, "monitor_sensor_binder.rs");

        // The artifact parses back and has the expected structure:
        // imports, binder struct, inherent impl, trait impl, register fn.
        let file = syn::parse_file(&artifact.source).unwrap();

        let structs: Vec<_> = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Struct(s) => Some(s.ident.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(structs, vec!["MonitorSensorBinder"]);

        let impl_count = file
            .items
            .iter()
            .filter(|item| matches!(item, syn::Item::Impl(_)))
            .count();
        assert_eq!(impl_count, 2);

        let fns: Vec<_> = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Fn(f) => Some(f.sig.ident.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(fns, vec!["register"]);

        // Two wrappers: one periodic (type 2), one trigger.
        assert_eq!(artifact.source.matches("listeners.push(").count(), 2);
        assert!(artifact.source.contains("ListenerWrapper::periodic"));
        assert!(artifact.source.contains("ListenerWrapper::trigger"));
        // The unavailable dispatch covers sensor type 2.
        assert!(artifact.source.contains("match sensor_type"));
        assert!(artifact.source.contains("target.on_field_missing()"));
    }

    /// Repeated passes over the same input produce identical artifacts.
    #[test]
    fn test_generation_is_deterministic() {
        let run = || {
            let unit = discovery::parse_source("monitor.rs", MONITOR_SOURCE).unwrap();
            let discovered = discovery::discover(vec![unit]);
            let generated = synthesis::generate(&discovered.map);
            generated.artifacts[0].source.clone()
        };

        assert_eq!(run(), run());
    }

    /// One bad owning type does not block artifacts for the others.
    #[test]
    fn test_partial_failure_isolated_per_type() {
        let source = r#"
pub struct Broken;
impl Broken {
    #[on_sensor_changed(sensor_type = 5)]
    pub fn on_light(&self, event: &SensorEvent) {}
}

pub struct Fine;
impl Fine {
    #[on_sensor_changed(sensor_type = 5, delay = 2)]
    pub fn on_light(&self, event: &SensorEvent) {}
}
"#;
        let unit = discovery::parse_source("mixed.rs", source).unwrap();
        let discovered = discovery::discover(vec![unit]);
        let generated = synthesis::generate(&discovered.map);

        assert_eq!(generated.artifacts.len(), 1);
        assert_eq!(generated.artifacts[0].owner, "Fine");
        assert_eq!(generated.failures.len(), 1);
        assert_eq!(generated.failures[0].owner, "Broken");
    }
}

#[cfg(test)]
mod runtime_e2e {
    use std::sync::{Arc, Mutex};

    use binder_runtime::mock::{MockSensorService, ServiceCall};
    use binder_runtime::{
        BinderRegistry, ListenerWrapper, SensorBinder, SensorContext, SensorEvent,
        SensorEventHandler, SensorHandle, SensorService, TriggerEvent, TriggerHandler,
        TYPE_SIGNIFICANT_MOTION,
    };

    /// Target type with tagged-method counterparts that record invocations.
    struct Monitor {
        log: Mutex<Vec<String>>,
    }

    impl Monitor {
        fn new() -> Self {
            Self {
                log: Mutex::new(Vec::new()),
            }
        }

        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }

        pub fn on_field_changed(&self, event: &SensorEvent) {
            self.log
                .lock()
                .unwrap()
                .push(format!("changed:{}", event.timestamp));
        }

        pub fn on_field_accuracy(&self, sensor: &SensorHandle, accuracy: i32) {
            self.log
                .lock()
                .unwrap()
                .push(format!("accuracy:{}:{}", sensor.sensor_type, accuracy));
        }

        pub fn on_field_missing(&self) {
            self.log.lock().unwrap().push("missing".to_string());
        }

        pub fn on_motion(&self, event: &TriggerEvent) {
            self.log
                .lock()
                .unwrap()
                .push(format!("motion:{}", event.timestamp));
        }
    }

    /// Hand-written with the exact shape the synthesis engine emits for
    /// `Monitor` (periodic type 2 + trigger + unavailable on type 2).
    struct MonitorSensorBinder {
        service: Option<Arc<dyn SensorService>>,
        listeners: Vec<ListenerWrapper>,
    }

    impl MonitorSensorBinder {
        pub fn new(context: &SensorContext, target: &Arc<Monitor>) -> Self {
            let service = context.sensor_service();
            let mut listeners = Vec::new();
            listeners.push(ListenerWrapper::periodic(
                2,
                3,
                SensorEventHandler::new(
                    {
                        let target = Arc::clone(target);
                        move |event| target.on_field_changed(event)
                    },
                    {
                        let target = Arc::clone(target);
                        move |sensor, accuracy| target.on_field_accuracy(sensor, accuracy)
                    },
                ),
            ));
            listeners.push(ListenerWrapper::trigger(TriggerHandler::new({
                let target = Arc::clone(target);
                move |event| target.on_motion(event)
            })));
            Self { service, listeners }
        }
    }

    impl SensorBinder<Monitor> for MonitorSensorBinder {
        fn bind(&mut self, target: &Arc<Monitor>) {
            let Some(service) = self.service.as_ref() else {
                return;
            };
            for wrapper in &self.listeners {
                let sensor_type = wrapper.sensor_type();
                if wrapper.sensor(service.as_ref()).is_none() {
                    match sensor_type {
                        2 => target.on_field_missing(),
                        _ => {}
                    }
                    continue;
                }
                wrapper.register(service.as_ref());
            }
        }

        fn unbind(&mut self) {
            if let Some(service) = self.service.as_ref() {
                for wrapper in &self.listeners {
                    wrapper.unregister(service.as_ref());
                }
            }
        }
    }

    fn registry() -> BinderRegistry {
        let registry = BinderRegistry::new();
        registry.register::<Monitor, _>(|context, target| {
            Box::new(MonitorSensorBinder::new(context, target))
        });
        registry
    }

    #[test]
    fn test_events_reach_tagged_methods() {
        let registry = registry();
        let service = Arc::new(MockSensorService::with_sensors(vec![
            2,
            TYPE_SIGNIFICANT_MOTION,
        ]));
        let context = SensorContext::new(service.clone());
        let monitor = Arc::new(Monitor::new());

        registry.bind(&monitor, &context).unwrap();

        service.deliver_sensor_event(2, &SensorEvent::new(10, vec![0.4]));
        service.deliver_accuracy_changed(&SensorHandle::new(2, "magnetometer"), 1);
        service.fire_trigger(&TriggerEvent::new(20, vec![1.0]));
        // The trigger listener self-removed after firing.
        service.fire_trigger(&TriggerEvent::new(30, vec![1.0]));

        registry.unbind(&monitor).unwrap();

        assert_eq!(
            monitor.log(),
            vec!["changed:10", "accuracy:2:1", "motion:20"]
        );
    }

    #[test]
    fn test_bind_unbind_round_trip_matches_one_to_one() {
        let registry = registry();
        let service = Arc::new(MockSensorService::with_sensors(vec![
            2,
            TYPE_SIGNIFICANT_MOTION,
        ]));
        let context = SensorContext::new(service.clone());
        let monitor = Arc::new(Monitor::new());

        registry.bind(&monitor, &context).unwrap();
        registry.unbind(&monitor).unwrap();

        // Every registration is matched by its unregistration; the trigger
        // request is cancelled; nothing is leaked.
        assert_eq!(
            service.calls(),
            vec![
                ServiceCall::Register {
                    sensor_type: 2,
                    delay: 3
                },
                ServiceCall::RequestTrigger {
                    sensor_type: TYPE_SIGNIFICANT_MOTION
                },
                ServiceCall::Unregister { sensor_type: 2 },
                ServiceCall::CancelTrigger {
                    sensor_type: TYPE_SIGNIFICANT_MOTION
                },
            ]
        );
        assert_eq!(service.registered_count(), 0);
        assert_eq!(service.pending_trigger_count(), 0);
    }

    #[test]
    fn test_unavailable_sensor_dispatches_fallback_and_skips_registration() {
        let registry = registry();
        // Only the trigger sensor exists on this device.
        let service = Arc::new(MockSensorService::with_sensors(vec![
            TYPE_SIGNIFICANT_MOTION,
        ]));
        let context = SensorContext::new(service.clone());
        let monitor = Arc::new(Monitor::new());

        registry.bind(&monitor, &context).unwrap();

        assert_eq!(monitor.log(), vec!["missing"]);
        assert_eq!(service.registered_count(), 0);
        // Binding continued to the next wrapper after the fallback.
        assert_eq!(service.pending_trigger_count(), 1);

        registry.unbind(&monitor).unwrap();
        assert_eq!(service.pending_trigger_count(), 0);
    }

    #[test]
    fn test_zero_binding_type_uses_shared_noop() {
        struct Plain;

        let registry = registry();
        let service = Arc::new(MockSensorService::with_sensors(vec![2]));
        let context = SensorContext::new(service.clone());

        let a = Arc::new(Plain);
        let b = Arc::new(Plain);
        registry.bind(&a, &context).unwrap();
        registry.bind(&b, &context).unwrap();
        registry.unbind(&a).unwrap();
        registry.unbind(&b).unwrap();

        assert!(service.calls().is_empty());
    }
}
