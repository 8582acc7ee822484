//! 元数据定义
//!
//! 描述一个类型能否构造、如何构造以及构造函数需要哪些参数。
//! 这些信息在编译期声明（手写或由 `#[derive(Injectable)]` 生成），
//! 取代运行时反射。

use crate::errors::{IntrospectionError, IntrospectionResult};
use crate::instance::Instance;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 构造函数：按声明顺序接收已解析的参数并返回新实例
pub type ConstructFn = Arc<dyn Fn(Vec<Instance>) -> IntrospectionResult<Instance> + Send + Sync>;

/// 无参构造：返回默认构造的实例
pub type DefaultConstructFn = Arc<dyn Fn() -> Instance + Send + Sync>;

/// 参数默认值生成函数
pub type DefaultValueFn = Arc<dyn Fn() -> Instance + Send + Sync>;

/// 构造函数参数的声明类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterType {
    /// 没有类型声明
    Untyped,
    /// 内置/基础类型，无法递归解析
    Builtin(String),
    /// 多个类型的联合，无法递归解析
    Union(Vec<String>),
    /// 单一的非基础类型（或显式指定的标识符），递归解析
    Named(String),
}

impl ParameterType {
    /// 可递归解析时返回要解析的标识符
    pub fn dependency_id(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untyped => write!(f, "无类型声明"),
            Self::Builtin(name) => write!(f, "内置类型 {}", name),
            Self::Union(names) => write!(f, "联合类型 {}", names.join("|")),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

/// 构造函数参数信息
#[derive(Clone)]
pub struct ParameterInfo {
    /// 参数名称
    pub name: String,
    /// 声明类型
    pub ty: ParameterType,
    default: Option<DefaultValueFn>,
}

impl ParameterInfo {
    /// 创建参数信息
    pub fn new(name: impl Into<String>, ty: ParameterType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    /// 无类型声明的参数
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Untyped)
    }

    /// 内置类型参数
    pub fn builtin(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Builtin(type_name.into()))
    }

    /// 联合类型参数
    pub fn union<I, S>(name: impl Into<String>, type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            ParameterType::Union(type_names.into_iter().map(Into::into).collect()),
        )
    }

    /// 依赖另一个类型（或标识符）的参数
    pub fn named(name: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Named(dependency.into()))
    }

    /// 设置默认值，每次使用时克隆一份
    pub fn with_default<T>(mut self, value: T) -> Self
    where
        T: Clone + Any + Send + Sync,
    {
        self.default = Some(Arc::new(move || Instance::new(value.clone())));
        self
    }

    /// 使用已有实例作为默认值
    pub fn with_default_instance(mut self, value: Instance) -> Self {
        self.default = Some(Arc::new(move || value.clone()));
        self
    }

    /// 是否有默认值
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// 取默认值
    pub fn default_value(&self) -> Option<Instance> {
        self.default.as_ref().map(|make| make())
    }
}

impl fmt::Debug for ParameterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterInfo")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// 类型的构造方式
#[derive(Clone)]
pub enum Construction {
    /// 抽象类型，不可实例化
    Abstract,
    /// 没有声明构造函数，直接默认构造
    Default(DefaultConstructFn),
    /// 声明了构造函数
    Constructor {
        parameters: Vec<ParameterInfo>,
        construct: ConstructFn,
    },
}

impl fmt::Debug for Construction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abstract => f.write_str("Abstract"),
            Self::Default(_) => f.write_str("Default(<function>)"),
            Self::Constructor { parameters, .. } => f
                .debug_struct("Constructor")
                .field("parameters", parameters)
                .field("construct", &"<function>")
                .finish(),
        }
    }
}

/// 类型描述符
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    construction: Construction,
}

impl TypeDescriptor {
    /// 抽象类型
    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            construction: Construction::Abstract,
        }
    }

    /// 以 `T` 的类型名称描述抽象类型（可用于 trait 对象）
    pub fn abstract_of<T: ?Sized + 'static>() -> Self {
        Self::abstract_type(std::any::type_name::<T>())
    }

    /// 没有声明构造函数的类型
    pub fn without_constructor<F>(name: impl Into<String>, make: F) -> Self
    where
        F: Fn() -> Instance + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            construction: Construction::Default(Arc::new(make)),
        }
    }

    /// 通过 `Default` 构造的类型
    pub fn default_of<T>() -> Self
    where
        T: Default + Any + Send + Sync,
    {
        Self::without_constructor(std::any::type_name::<T>(), || Instance::new(T::default()))
    }

    /// 声明了构造函数的类型
    pub fn with_constructor<F>(
        name: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        construct: F,
    ) -> Self
    where
        F: Fn(Vec<Instance>) -> IntrospectionResult<Instance> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            construction: Construction::Constructor {
                parameters,
                construct: Arc::new(construct),
            },
        }
    }

    /// 类型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 构造方式
    pub fn construction(&self) -> &Construction {
        &self.construction
    }

    /// 是否可以实例化
    pub fn is_instantiable(&self) -> bool {
        !matches!(self.construction, Construction::Abstract)
    }

    /// 构造函数参数，没有构造函数时为空
    pub fn parameters(&self) -> &[ParameterInfo] {
        match &self.construction {
            Construction::Constructor { parameters, .. } => parameters,
            _ => &[],
        }
    }
}

/// 构造函数参数读取器
///
/// 按声明顺序逐个取出参数并转换为字段需要的类型。
#[derive(Debug)]
pub struct ConstructorArgs {
    type_name: String,
    values: std::vec::IntoIter<Instance>,
    index: usize,
}

impl ConstructorArgs {
    /// 创建参数读取器
    pub fn new(type_name: impl Into<String>, values: Vec<Instance>) -> Self {
        Self {
            type_name: type_name.into(),
            values: values.into_iter(),
            index: 0,
        }
    }

    /// 取下一个参数，不做类型转换
    pub fn instance(&mut self) -> IntrospectionResult<Instance> {
        let index = self.index;
        self.index += 1;
        self.values
            .next()
            .ok_or_else(|| IntrospectionError::MissingArgument {
                type_name: self.type_name.clone(),
                index,
            })
    }

    /// 取下一个参数并以 `Arc<T>` 共享
    pub fn shared<T: Any + Send + Sync>(&mut self) -> IntrospectionResult<Arc<T>> {
        let index = self.index;
        let value = self.instance()?;
        value
            .downcast::<T>()
            .ok_or_else(|| IntrospectionError::TypeMismatch {
                type_name: self.type_name.clone(),
                index,
                expected: std::any::type_name::<T>().to_string(),
                actual: value.type_name().to_string(),
            })
    }

    /// 取下一个参数并克隆出值
    pub fn owned<T: Clone + Any + Send + Sync>(&mut self) -> IntrospectionResult<T> {
        self.shared::<T>().map(|value| T::clone(&value))
    }
}
