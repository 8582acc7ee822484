//! # Infrastructure Common
//!
//! 依赖注入注册表的公共基础：值模型、类型元数据、错误类型与配置。
//!
//! ## 核心组件
//!
//! - [`Instance`] - 容器中流转的类型擦除共享值
//! - [`TypeDescriptor`] - 类型的构造方式与构造函数参数
//! - [`TypeCatalog`] - 类型名称到描述符的目录，自动装配据此构造类型
//! - [`Injectable`] - 编译期声明构造方式的组件 trait
//! - [`DependencyError`] - 解析错误分类
//!
//! ## 设计原则
//!
//! - 以编译期声明的元数据取代运行时反射
//! - 错误分类封闭，且区分“未找到”与“找到但无法构造”

pub mod catalog;
pub mod component;
pub mod configuration;
pub mod errors;
pub mod instance;
pub mod metadata;

pub use catalog::*;
pub use component::*;
pub use configuration::*;
pub use errors::*;
pub use instance::*;
pub use metadata::*;
