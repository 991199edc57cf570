//! 产物发射器
//!
//! 两步走：先把一个 owning type 的绑定组规划成监听器蓝图
//! ([`TypePlan`]，过程中完成全部跨标签校验)，再用 quote 拼装 token
//! 流并经 prettyplease 排版成源码文本。
//!
//! 产物约定：作为 owning type 所在模块的同级子模块编译
//! (`use super::Owner`)，文件名 `<owner_snake_case>_sensor_binder.rs`。

use contracts::{
    validate, BindingError, SensorTypeCode, TagKind, TypeBindings,
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::GeneratedArtifact;

/// 生成类名后缀
const SUFFIX: &str = "SensorBinder";

/// 产物文件头注释
const HEADER: &str = "// Generated by sensor-bindgen. Do not edit!\n";

/// 一个监听器包装的发射蓝图
#[derive(Debug)]
pub(crate) enum WrapperPlan {
    Periodic {
        sensor_type: SensorTypeCode,
        delay: i32,
        changed: Option<String>,
        accuracy: Option<String>,
    },
    Trigger {
        method: String,
    },
}

/// 一个 owning type 的完整发射蓝图
#[derive(Debug)]
pub(crate) struct TypePlan {
    owner: String,
    owner_simple: String,
    wrappers: Vec<WrapperPlan>,
    /// (sensor type, method)，插入顺序即 match 分支顺序
    unavailable: Vec<(SensorTypeCode, String)>,
}

/// 规划并校验一个 owning type 的绑定组
pub(crate) fn plan(bindings: &TypeBindings) -> Result<TypePlan, BindingError> {
    let owner = bindings.owner();
    let mut wrappers = Vec::new();

    for (sensor_type, slot) in bindings.iter() {
        validate::check_exclusivity(owner, sensor_type, slot)?;

        let changed = slot.get(TagKind::SensorChanged);
        let accuracy = slot.get(TagKind::AccuracyChanged);

        if let Some(trigger) = slot.get(TagKind::Trigger) {
            validate::check_parameter_shape(trigger)?;
            wrappers.push(WrapperPlan::Trigger {
                method: trigger.method().to_string(),
            });
        } else if changed.is_some() || accuracy.is_some() {
            if let Some(decl) = changed {
                validate::check_parameter_shape(decl)?;
            }
            if let Some(decl) = accuracy {
                validate::check_parameter_shape(decl)?;
            }

            let delay = validate::resolve_delay(owner, sensor_type, changed, accuracy)?;
            wrappers.push(WrapperPlan::Periodic {
                sensor_type,
                delay,
                changed: changed.map(|decl| decl.method().to_string()),
                accuracy: accuracy.map(|decl| decl.method().to_string()),
            });
        }
        // 只有 not-available 标签的传感器类型不产生监听器包装；
        // bind 方法里的分发分支仍会覆盖它。
    }

    let mut unavailable = Vec::new();
    if bindings.has_tag(TagKind::NotAvailable) {
        for (sensor_type, slot) in bindings.iter() {
            if let Some(decl) = slot.get(TagKind::NotAvailable) {
                validate::check_parameter_shape(decl)?;
                unavailable.push((sensor_type, decl.method().to_string()));
            }
        }
    }

    Ok(TypePlan {
        owner: owner.to_string(),
        owner_simple: bindings.owner_simple().to_string(),
        wrappers,
        unavailable,
    })
}

/// 把蓝图发射成格式化的产物
pub(crate) fn emit(plan: &TypePlan) -> Result<GeneratedArtifact, BindingError> {
    let tokens = binder_tokens(plan);

    let file = syn::parse2::<syn::File>(tokens).map_err(|e| {
        BindingError::Other(format!(
            "internal: generated code for `{}` does not parse: {e}",
            plan.owner
        ))
    })?;

    let struct_name = format!("{}{SUFFIX}", plan.owner_simple);
    let file_name = format!("{}_sensor_binder.rs", snake_case(&plan.owner_simple));
    let source = format!("{HEADER}\n{}", prettyplease::unparse(&file));

    Ok(GeneratedArtifact {
        owner: plan.owner.clone(),
        struct_name,
        file_name,
        source,
    })
}

fn binder_tokens(plan: &TypePlan) -> TokenStream {
    let owner = format_ident!("{}", plan.owner_simple);
    let binder = format_ident!("{}SensorBinder", plan.owner_simple);

    let has_periodic = plan
        .wrappers
        .iter()
        .any(|w| matches!(w, WrapperPlan::Periodic { .. }));
    let has_trigger = plan
        .wrappers
        .iter()
        .any(|w| matches!(w, WrapperPlan::Trigger { .. }));

    let mut import_names = vec![
        "BinderRegistry",
        "ListenerWrapper",
        "SensorBinder",
        "SensorContext",
        "SensorService",
    ];
    if has_periodic {
        import_names.push("SensorEventHandler");
    }
    if has_trigger {
        import_names.push("TriggerHandler");
    }
    import_names.sort_unstable();
    let imports = import_names
        .iter()
        .map(|name| format_ident!("{}", name))
        .collect::<Vec<_>>();

    let pushes = plan.wrappers.iter().map(|wrapper| match wrapper {
        WrapperPlan::Periodic {
            sensor_type,
            delay,
            changed,
            accuracy,
        } => {
            let changed_closure = match changed {
                Some(method) => {
                    let method = format_ident!("{}", method);
                    quote! {
                        {
                            let target = Arc::clone(target);
                            move |event| target.#method(event)
                        }
                    }
                }
                None => quote! { |_event| {} },
            };
            let accuracy_closure = match accuracy {
                Some(method) => {
                    let method = format_ident!("{}", method);
                    quote! {
                        {
                            let target = Arc::clone(target);
                            move |sensor, accuracy| target.#method(sensor, accuracy)
                        }
                    }
                }
                None => quote! { |_sensor, _accuracy| {} },
            };

            quote! {
                listeners.push(ListenerWrapper::periodic(
                    #sensor_type,
                    #delay,
                    SensorEventHandler::new(#changed_closure, #accuracy_closure),
                ));
            }
        }
        WrapperPlan::Trigger { method } => {
            let method = format_ident!("{}", method);
            quote! {
                listeners.push(ListenerWrapper::trigger(TriggerHandler::new({
                    let target = Arc::clone(target);
                    move |event| target.#method(event)
                })));
            }
        }
    });

    let (ctor_target, listeners_init) = if plan.wrappers.is_empty() {
        (format_ident!("_target"), quote! { let listeners = Vec::new(); })
    } else {
        (
            format_ident!("target"),
            quote! {
                let mut listeners = Vec::new();
                #(#pushes)*
            },
        )
    };

    let bind_fn = if plan.unavailable.is_empty() {
        quote! {
            fn bind(&mut self, _target: &Arc<#owner>) {
                let Some(service) = self.service.as_ref() else {
                    return;
                };
                for wrapper in &self.listeners {
                    wrapper.register(service.as_ref());
                }
            }
        }
    } else {
        let arms = plan.unavailable.iter().map(|(sensor_type, method)| {
            let method = format_ident!("{}", method);
            quote! { #sensor_type => target.#method(), }
        });

        quote! {
            fn bind(&mut self, target: &Arc<#owner>) {
                let Some(service) = self.service.as_ref() else {
                    return;
                };
                for wrapper in &self.listeners {
                    let sensor_type = wrapper.sensor_type();
                    if wrapper.sensor(service.as_ref()).is_none() {
                        match sensor_type {
                            #(#arms)*
                            _ => {}
                        }
                        continue;
                    }
                    wrapper.register(service.as_ref());
                }
            }
        }
    };

    quote! {
        use std::sync::Arc;

        use binder_runtime::{#(#imports),*};

        use super::#owner;

        pub struct #binder {
            service: Option<Arc<dyn SensorService>>,
            listeners: Vec<ListenerWrapper>,
        }

        impl #binder {
            pub fn new(context: &SensorContext, #ctor_target: &Arc<#owner>) -> Self {
                let service = context.sensor_service();
                #listeners_init
                Self { service, listeners }
            }
        }

        impl SensorBinder<#owner> for #binder {
            #bind_fn

            fn unbind(&mut self) {
                if let Some(service) = self.service.as_ref() {
                    for wrapper in &self.listeners {
                        wrapper.unregister(service.as_ref());
                    }
                }
            }
        }

        pub fn register(registry: &BinderRegistry) {
            registry.register::<#owner, _>(|context, target| {
                Box::new(#binder::new(context, target))
            });
        }
    }
}

fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = i + 1 < chars.len() && chars[i + 1].is_lowercase();
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if prev_lower || (prev_upper && next_lower) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(*c);
        }
    }

    out
}
