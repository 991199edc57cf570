//! 方法有效性校验
//!
//! 校验规则：
//! - 方法必须有独立实现体（trait 声明不可直接打标签）
//! - 方法必须是 pub 或 pub(crate)，生成的 binder 与 owning type
//!   同模块相邻而非嵌套其中

use contracts::BindingError;

use crate::parser::{MethodVisibility, TaggedMethod};

/// 校验一条带标签的方法声明
pub fn check_method_validity(method: &TaggedMethod) -> Result<(), BindingError> {
    if method.is_trait_decl || !method.has_body {
        return Err(BindingError::AbstractMethod {
            method: method.name.clone(),
        });
    }

    match method.visibility {
        MethodVisibility::Public | MethodVisibility::Crate => Ok(()),
        MethodVisibility::Restricted | MethodVisibility::Private => {
            Err(BindingError::RestrictedVisibility {
                method: method.name.clone(),
            })
        }
    }
}
