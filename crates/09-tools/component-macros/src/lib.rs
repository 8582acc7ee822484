//! # Component Macros
//!
//! 这个 crate 提供了可注入组件的派生宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`](derive@Injectable) - 生成类型描述符并登记到全局类型目录
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Injectable;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! pub struct DatabaseConnection;
//!
//! #[derive(Injectable)]
//! pub struct UserRepository {
//!     connection: Arc<DatabaseConnection>,
//!     #[inject(default = 30)]
//!     timeout_secs: u64,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 可注入组件派生宏
///
/// 为结构体实现 `Injectable`，并在程序启动时把类型描述符登记到
/// `TypeCatalog::global()`，供容器自动装配。
///
/// 每个字段对应一个构造函数参数，按声明顺序解析：
///
/// - `Arc<T>` - 具名类型依赖，标识符默认为 `std::any::type_name::<T>()`
/// - `Instance` - 无类型声明的参数
/// - 其他类型 - 内置类型参数，需要 `Clone`，只能取默认值
///
/// # 参数
///
/// 结构体上：
///
/// - `#[injectable(default)]` - 不声明构造函数，通过 `Default` 构造
/// - `#[injectable(abstract_type)]` - 不可实例化
///
/// 字段上：
///
/// - `#[inject(id = "key")]` - 依赖使用指定标识符
/// - `#[inject(default)]` - 使用 `Default::default()` 作为默认值
/// - `#[inject(default = expr)]` - 使用表达式作为默认值
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Injectable)]
/// pub struct NotificationService {
///     #[inject(id = "mailer")]
///     mailer: Arc<SmtpMailer>,
///     #[inject(default)]
///     sender: String,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(injectable, inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
