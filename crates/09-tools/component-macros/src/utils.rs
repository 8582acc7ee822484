//! 宏工具函数

use proc_macro2::Span;
use syn::{Ident, Type};

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last()?;
            match &segment.arguments {
                syn::PathArguments::AngleBracketed(args) => match args.args.first() {
                    Some(syn::GenericArgument::Type(inner_type)) => Some(inner_type),
                    _ => None,
                },
                _ => None,
            }
        }
        _ => None,
    }
}

/// 类型路径的最后一段是否为指定名称
pub fn last_segment_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == name)
            .unwrap_or(false),
        _ => false,
    }
}

/// `Arc<T>` 的 `T`
pub fn arc_inner_type(ty: &Type) -> Option<&Type> {
    if last_segment_is(ty, "Arc") {
        extract_generic_type(ty)
    } else {
        None
    }
}

/// 类型是否为 `Instance`
pub fn is_instance_type(ty: &Type) -> bool {
    last_segment_is(ty, "Instance")
}

/// 生成唯一的标识符
pub fn generate_unique_ident(base_name: &str, suffix: &str) -> Ident {
    let unique_name = format!("__{}_{}", base_name, suffix);
    Ident::new(&unique_name, Span::call_site())
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            // 检查前一个字符是否为小写，或者下一个字符是否为小写
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}
