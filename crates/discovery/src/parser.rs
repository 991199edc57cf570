//! 源码解析模块
//!
//! 用 syn 解析一个编译单元，收集所有带绑定标签的声明。
//! 结构性问题（标签落在非方法项上、自由函数、trait impl 方法）
//! 在这里即时定性为 [`TaggedItem::Structural`]，由 driver 统一记账。

use contracts::{
    BindingError, ParamType, RawTag, TagKind, DELAY_UNSET, SENSOR_TYPE_UNSET,
};
use quote::ToTokens;

/// 一个已解析编译单元中的全部标签声明
#[derive(Debug)]
pub struct SourceUnit {
    /// 单元标签（通常是文件名）
    pub name: String,

    /// 按出现顺序收集的标签项
    pub items: Vec<TaggedItem>,
}

/// 单条标签项：合法方法或结构性错误
#[derive(Debug)]
pub enum TaggedItem {
    /// 带标签的方法（标签参数均解析成功）
    Method(TaggedMethod),

    /// 结构性或标签语法错误，错误值已构造完毕
    Structural {
        /// 可归属的 owning type（若能确定）
        owner: Option<String>,
        error: BindingError,
    },
}

/// 方法可见性（仅区分生成代码可达性所需的粒度）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodVisibility {
    /// `pub`
    Public,
    /// `pub(crate)`
    Crate,
    /// `pub(super)` / `pub(in ..)` 等受限可见性
    Restricted,
    /// 无修饰（模块私有）
    Private,
}

/// 一条带标签的方法声明（解析视图）
#[derive(Debug)]
pub struct TaggedMethod {
    /// Qualified owning type path within the unit
    pub owner: String,

    /// Method name
    pub name: String,

    /// Declared visibility
    pub visibility: MethodVisibility,

    /// Whether the declaration has a body (false for trait declarations)
    pub has_body: bool,

    /// Whether the declaration lives in a trait definition
    pub is_trait_decl: bool,

    /// Parameter list, receiver excluded
    pub params: Vec<ParamType>,

    /// Parsed binding tags carried by the method
    pub tags: Vec<RawTag>,
}

/// 解析一个编译单元
///
/// 只有整个文件无法解析时返回错误；单条声明的问题进入
/// [`SourceUnit::items`]。
pub fn parse_source(name: &str, content: &str) -> Result<SourceUnit, BindingError> {
    let file = syn::parse_file(content)
        .map_err(|e| BindingError::source_parse(name, e.to_string()))?;

    let mut unit = SourceUnit {
        name: name.to_string(),
        items: Vec::new(),
    };
    walk_items(&file.items, &mut Vec::new(), &mut unit);
    Ok(unit)
}

fn walk_items(items: &[syn::Item], module_path: &mut Vec<String>, unit: &mut SourceUnit) {
    for item in items {
        match item {
            syn::Item::Impl(item_impl) => collect_impl(item_impl, module_path, unit),
            syn::Item::Trait(item_trait) => collect_trait(item_trait, module_path, unit),
            syn::Item::Mod(item_mod) => {
                if let Some((_, nested)) = &item_mod.content {
                    module_path.push(item_mod.ident.to_string());
                    walk_items(nested, module_path, unit);
                    module_path.pop();
                }
            }
            syn::Item::Fn(item_fn) => {
                // 自由函数没有 owning type
                for (_, _) in tag_attrs(&item_fn.attrs) {
                    unit.items.push(TaggedItem::Structural {
                        owner: None,
                        error: BindingError::NoOwningType {
                            method: item_fn.sig.ident.to_string(),
                        },
                    });
                }
            }
            other => {
                for (kind, what) in non_method_tags(other) {
                    unit.items.push(TaggedItem::Structural {
                        owner: None,
                        error: BindingError::NotAMethod { tag: kind, what },
                    });
                }
            }
        }
    }
}

fn collect_impl(item_impl: &syn::ItemImpl, module_path: &[String], unit: &mut SourceUnit) {
    let owner = match &*item_impl.self_ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| qualify(module_path, &segment.ident.to_string())),
        _ => None,
    };
    let is_trait_impl = item_impl.trait_.is_some();

    for impl_item in &item_impl.items {
        let syn::ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let tagged = tag_attrs(&method.attrs);
        if tagged.is_empty() {
            continue;
        }

        let method_name = method.sig.ident.to_string();

        let Some(owner) = owner.clone() else {
            unit.items.push(TaggedItem::Structural {
                owner: None,
                error: BindingError::NoOwningType {
                    method: method_name,
                },
            });
            continue;
        };

        if is_trait_impl {
            for (kind, _) in tagged {
                unit.items.push(TaggedItem::Structural {
                    owner: Some(owner.clone()),
                    error: BindingError::NotAMethod {
                        tag: kind,
                        what: format!("trait impl method `{method_name}`"),
                    },
                });
            }
            continue;
        }

        if let Some(error) = check_receiver(&method.sig, &tagged) {
            unit.items.push(TaggedItem::Structural {
                owner: Some(owner),
                error,
            });
            continue;
        }

        match parse_tags(&tagged, &method_name) {
            Ok(tags) => unit.items.push(TaggedItem::Method(TaggedMethod {
                owner,
                name: method_name,
                visibility: visibility_of(&method.vis),
                has_body: true,
                is_trait_decl: false,
                params: param_types(&method.sig),
                tags,
            })),
            Err(error) => unit.items.push(TaggedItem::Structural {
                owner: Some(owner),
                error,
            }),
        }
    }
}

fn collect_trait(item_trait: &syn::ItemTrait, module_path: &[String], unit: &mut SourceUnit) {
    let owner = qualify(module_path, &item_trait.ident.to_string());

    for trait_item in &item_trait.items {
        let syn::TraitItem::Fn(method) = trait_item else {
            continue;
        };
        let tagged = tag_attrs(&method.attrs);
        if tagged.is_empty() {
            continue;
        }

        let method_name = method.sig.ident.to_string();

        if let Some(error) = check_receiver(&method.sig, &tagged) {
            unit.items.push(TaggedItem::Structural {
                owner: Some(owner.clone()),
                error,
            });
            continue;
        }

        match parse_tags(&tagged, &method_name) {
            Ok(tags) => unit.items.push(TaggedItem::Method(TaggedMethod {
                owner: owner.clone(),
                name: method_name,
                visibility: MethodVisibility::Public,
                has_body: method.default.is_some(),
                is_trait_decl: true,
                params: param_types(&method.sig),
                tags,
            })),
            Err(error) => unit.items.push(TaggedItem::Structural {
                owner: Some(owner.clone()),
                error,
            }),
        }
    }
}

/// 非函数项上的标签 → (tag kind, 项描述)
fn non_method_tags(item: &syn::Item) -> Vec<(TagKind, String)> {
    let (attrs, what): (&[syn::Attribute], String) = match item {
        syn::Item::Struct(i) => (&i.attrs, format!("struct `{}`", i.ident)),
        syn::Item::Enum(i) => (&i.attrs, format!("enum `{}`", i.ident)),
        syn::Item::Union(i) => (&i.attrs, format!("union `{}`", i.ident)),
        syn::Item::Const(i) => (&i.attrs, format!("const `{}`", i.ident)),
        syn::Item::Static(i) => (&i.attrs, format!("static `{}`", i.ident)),
        syn::Item::Type(i) => (&i.attrs, format!("type alias `{}`", i.ident)),
        _ => return Vec::new(),
    };

    tag_attrs(attrs)
        .into_iter()
        .map(|(kind, _)| (kind, what.clone()))
        .collect()
}

fn qualify(module_path: &[String], ident: &str) -> String {
    if module_path.is_empty() {
        ident.to_string()
    } else {
        format!("{}::{}", module_path.join("::"), ident)
    }
}

/// 匹配路径最后一段，`#[on_trigger]` 与 `#[binding_tags::on_trigger]`
/// 均可识别
fn tag_attrs(attrs: &[syn::Attribute]) -> Vec<(TagKind, &syn::Attribute)> {
    attrs
        .iter()
        .filter_map(|attr| {
            attr.path()
                .segments
                .last()
                .and_then(|segment| TagKind::from_attribute(&segment.ident.to_string()))
                .map(|kind| (kind, attr))
        })
        .collect()
}

/// 方法必须以 `&self` 为接收者，生成代码才能通过 `Arc<T>` 调用
fn check_receiver(
    sig: &syn::Signature,
    tagged: &[(TagKind, &syn::Attribute)],
) -> Option<BindingError> {
    let kind = tagged.first().map(|(kind, _)| *kind)?;
    let name = sig.ident.to_string();

    match sig.receiver() {
        None => Some(BindingError::NotAMethod {
            tag: kind,
            what: format!("associated function `{name}` without a self receiver"),
        }),
        Some(receiver) if receiver.reference.is_none() || receiver.mutability.is_some() => {
            Some(BindingError::NotAMethod {
                tag: kind,
                what: format!("method `{name}` must take &self"),
            })
        }
        Some(_) => None,
    }
}

fn visibility_of(vis: &syn::Visibility) -> MethodVisibility {
    match vis {
        syn::Visibility::Public(_) => MethodVisibility::Public,
        syn::Visibility::Restricted(restricted) => {
            if restricted.path.is_ident("crate") {
                MethodVisibility::Crate
            } else {
                MethodVisibility::Restricted
            }
        }
        syn::Visibility::Inherited => MethodVisibility::Private,
    }
}

fn param_types(sig: &syn::Signature) -> Vec<ParamType> {
    sig.inputs
        .iter()
        .filter_map(|input| match input {
            syn::FnArg::Receiver(_) => None,
            syn::FnArg::Typed(pat_type) => Some(param_type(&pat_type.ty)),
        })
        .collect()
}

fn param_type(ty: &syn::Type) -> ParamType {
    match ty {
        syn::Type::Reference(reference) => ParamType::new(last_segment(&reference.elem), true),
        other => ParamType::new(last_segment(other), false),
    }
}

fn last_segment(ty: &syn::Type) -> String {
    match ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_else(|| ty.to_token_stream().to_string()),
        other => other.to_token_stream().to_string(),
    }
}

fn parse_tags(
    tagged: &[(TagKind, &syn::Attribute)],
    method: &str,
) -> Result<Vec<RawTag>, BindingError> {
    tagged
        .iter()
        .map(|(kind, attr)| parse_tag(*kind, attr, method))
        .collect()
}

fn parse_tag(kind: TagKind, attr: &syn::Attribute, method: &str) -> Result<RawTag, BindingError> {
    let mut sensor_type = SENSOR_TYPE_UNSET;
    let mut delay = DELAY_UNSET;

    match &attr.meta {
        syn::Meta::Path(_) => {}
        syn::Meta::List(_) => {
            attr.parse_nested_meta(|meta| {
                let takes_sensor_type = kind != TagKind::Trigger;
                let takes_delay = matches!(
                    kind,
                    TagKind::SensorChanged | TagKind::AccuracyChanged
                );

                if takes_sensor_type && meta.path.is_ident("sensor_type") {
                    sensor_type = parse_int_arg(&meta, contracts::sensor_type_code)?;
                    Ok(())
                } else if takes_delay && meta.path.is_ident("delay") {
                    delay = parse_int_arg(&meta, contracts::delay_hint)?;
                    Ok(())
                } else {
                    Err(meta.error("unsupported argument"))
                }
            })
            .map_err(|e| BindingError::tag_syntax(kind, method, e.to_string()))?;
        }
        syn::Meta::NameValue(_) => {
            return Err(BindingError::tag_syntax(
                kind,
                method,
                "expected list-style arguments, e.g. #[on_sensor_changed(sensor_type = 1)]",
            ));
        }
    }

    Ok(match kind {
        TagKind::SensorChanged => RawTag::SensorChanged { sensor_type, delay },
        TagKind::AccuracyChanged => RawTag::AccuracyChanged { sensor_type, delay },
        TagKind::NotAvailable => RawTag::NotAvailable { sensor_type },
        TagKind::Trigger => RawTag::Trigger,
    })
}

/// 整数字面量或已知常量名
fn parse_int_arg(
    meta: &syn::meta::ParseNestedMeta<'_>,
    lookup: fn(&str) -> Option<i32>,
) -> syn::Result<i32> {
    let expr: syn::Expr = meta.value()?.parse()?;
    eval_int(&expr, lookup)
        .ok_or_else(|| meta.error("expected an integer literal or a known constant name"))
}

fn eval_int(expr: &syn::Expr, lookup: fn(&str) -> Option<i32>) -> Option<i32> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Int(lit),
            ..
        }) => lit.base10_parse::<i32>().ok(),
        syn::Expr::Unary(syn::ExprUnary {
            op: syn::UnOp::Neg(_),
            expr,
            ..
        }) => eval_int(expr, lookup).map(|value| -value),
        syn::Expr::Path(path) => path
            .path
            .segments
            .last()
            .and_then(|segment| lookup(&segment.ident.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> SourceUnit {
        parse_source("test.rs", content).unwrap()
    }

    fn single_method(unit: &SourceUnit) -> &TaggedMethod {
        assert_eq!(unit.items.len(), 1, "items: {:?}", unit.items);
        match &unit.items[0] {
            TaggedItem::Method(method) => method,
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_tagged_method() {
        let unit = parse(
            r#"
            pub struct Test;

            impl Test {
                #[on_sensor_changed(sensor_type = 2, delay = 3)]
                pub fn on_field_changed(&self, event: &SensorEvent) {}
            }
            "#,
        );

        let method = single_method(&unit);
        assert_eq!(method.owner, "Test");
        assert_eq!(method.name, "on_field_changed");
        assert_eq!(method.visibility, MethodVisibility::Public);
        assert_eq!(method.params.len(), 1);
        assert_eq!(method.params[0].display, "&SensorEvent");
        assert_eq!(
            method.tags,
            vec![RawTag::SensorChanged {
                sensor_type: 2,
                delay: 3
            }]
        );
    }

    #[test]
    fn test_parse_constant_names() {
        let unit = parse(
            r#"
            struct Test;
            impl Test {
                #[on_accuracy_changed(sensor_type = TYPE_MAGNETIC_FIELD, delay = SENSOR_DELAY_NORMAL)]
                pub fn on_accuracy(&self, sensor: &SensorHandle, accuracy: i32) {}
            }
            "#,
        );

        let method = single_method(&unit);
        assert_eq!(
            method.tags,
            vec![RawTag::AccuracyChanged {
                sensor_type: 2,
                delay: 3
            }]
        );
    }

    #[test]
    fn test_omitted_sensor_type_defaults_to_sentinel() {
        let unit = parse(
            r#"
            struct Test;
            impl Test {
                #[on_sensor_not_available]
                pub fn on_missing(&self) {}
            }
            "#,
        );

        let method = single_method(&unit);
        assert_eq!(
            method.tags,
            vec![RawTag::NotAvailable {
                sensor_type: SENSOR_TYPE_UNSET
            }]
        );
    }

    #[test]
    fn test_bare_trigger_tag() {
        let unit = parse(
            r#"
            struct Test;
            impl Test {
                #[on_trigger]
                pub fn on_motion(&self, event: &TriggerEvent) {}
            }
            "#,
        );

        let method = single_method(&unit);
        assert_eq!(method.tags, vec![RawTag::Trigger]);
    }

    #[test]
    fn test_unknown_argument_is_tag_syntax_error() {
        let unit = parse(
            r#"
            struct Test;
            impl Test {
                #[on_sensor_changed(sensor = 2)]
                pub fn on_changed(&self, event: &SensorEvent) {}
            }
            "#,
        );

        match &unit.items[0] {
            TaggedItem::Structural { owner, error } => {
                assert_eq!(owner.as_deref(), Some("Test"));
                let msg = error.to_string();
                assert!(msg.contains("unsupported argument"), "got: {msg}");
            }
            other => panic!("expected structural rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_trigger_with_arguments_is_rejected() {
        let unit = parse(
            r#"
            struct Test;
            impl Test {
                #[on_trigger(sensor_type = 17)]
                pub fn on_motion(&self, event: &TriggerEvent) {}
            }
            "#,
        );

        assert!(matches!(
            &unit.items[0],
            TaggedItem::Structural { owner: Some(_), .. }
        ));
    }

    #[test]
    fn test_free_function_has_no_owning_type() {
        let unit = parse(
            r#"
            #[on_trigger]
            fn free_function(event: &TriggerEvent) {}
            "#,
        );

        match &unit.items[0] {
            TaggedItem::Structural { owner: None, error } => {
                let msg = error.to_string();
                assert!(msg.contains("owning type"), "got: {msg}");
            }
            other => panic!("expected structural rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_tag_on_struct_is_not_a_method() {
        let unit = parse(
            r#"
            #[on_trigger]
            struct Test;
            "#,
        );

        match &unit.items[0] {
            TaggedItem::Structural { error, .. } => {
                let msg = error.to_string();
                assert!(msg.contains("only methods"), "got: {msg}");
                assert!(msg.contains("struct `Test`"), "got: {msg}");
            }
            other => panic!("expected structural rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_associated_function_without_receiver_is_rejected() {
        let unit = parse(
            r#"
            struct Test;
            impl Test {
                #[on_trigger]
                pub fn on_motion(event: &TriggerEvent) {}
            }
            "#,
        );

        match &unit.items[0] {
            TaggedItem::Structural { error, .. } => {
                let msg = error.to_string();
                assert!(msg.contains("without a self receiver"), "got: {msg}");
            }
            other => panic!("expected structural rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_trait_declaration_without_body_is_collected() {
        let unit = parse(
            r#"
            trait Watcher {
                #[on_trigger]
                fn on_motion(&self, event: &TriggerEvent);
            }
            "#,
        );

        let method = single_method(&unit);
        assert!(method.is_trait_decl);
        assert!(!method.has_body);
        assert_eq!(method.owner, "Watcher");
    }

    #[test]
    fn test_nested_module_qualifies_owner() {
        let unit = parse(
            r#"
            mod devices {
                pub struct Monitor;
                impl Monitor {
                    #[on_trigger]
                    pub fn on_motion(&self, event: &TriggerEvent) {}
                }
            }
            "#,
        );

        let method = single_method(&unit);
        assert_eq!(method.owner, "devices::Monitor");
    }

    #[test]
    fn test_method_with_two_tags() {
        let unit = parse(
            r#"
            struct Test;
            impl Test {
                #[on_sensor_changed(sensor_type = 2, delay = 3)]
                #[on_sensor_not_available(sensor_type = 2)]
                pub fn handle(&self, event: &SensorEvent) {}
            }
            "#,
        );

        let method = single_method(&unit);
        assert_eq!(method.tags.len(), 2);
    }

    #[test]
    fn test_unparseable_file_fails() {
        let result = parse_source("bad.rs", "struct {{{{");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("source parse error"), "got: {err}");
    }
}
