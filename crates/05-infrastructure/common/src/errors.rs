//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置加载失败: {source}")]
    LoadFailed {
        #[from]
        source: config::ConfigError,
    },
}

/// 类型内省错误类型
///
/// 由类型目录或构造函数在检查、实例化类型时产生，
/// 容器会将其包装为 [`DependencyError::ResolutionFailure`]。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionError {
    #[error("类型 {name} 不存在")]
    UnknownType { name: String },

    #[error("构造 {type_name} 时缺少第 {index} 个参数")]
    MissingArgument { type_name: String, index: usize },

    #[error("构造 {type_name} 时第 {index} 个参数类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch {
        type_name: String,
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("{id} 的实例类型为 {actual}, 期望 {expected}")]
    UnexpectedType {
        id: String,
        expected: String,
        actual: String,
    },
}

impl IntrospectionError {
    /// 创建类型不存在错误
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }
}

/// 依赖链上的一环：哪个类型的哪个构造函数参数引发了下层解析
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyLink {
    pub type_name: String,
    pub parameter: String,
}

impl fmt::Display for DependencyLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 的参数 ${}", self.type_name, self.parameter)
    }
}

/// 依赖注入错误类型
///
/// 递归解析失败时保持最内层的错误种类，
/// 外层类型与参数按由内到外的顺序记录在 `required_by` 中。
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("条目 {id} 未在容器中找到{}", format_chain(.required_by))]
    NotFound {
        id: String,
        required_by: Vec<DependencyLink>,
    },

    #[error("类型 {type_name} 不可实例化{}", format_chain(.required_by))]
    NotInstantiable {
        type_name: String,
        required_by: Vec<DependencyLink>,
    },

    #[error("无法解析 {type_name} 的参数 ${parameter} ({declared}){}", format_chain(.required_by))]
    UnresolvableParameter {
        type_name: String,
        parameter: String,
        declared: String,
        required_by: Vec<DependencyLink>,
    },

    #[error("解析 {id} 时出错: {source}{}", format_chain(.required_by))]
    ResolutionFailure {
        id: String,
        #[source]
        source: IntrospectionError,
        required_by: Vec<DependencyLink>,
    },
}

fn format_chain(links: &[DependencyLink]) -> String {
    if links.is_empty() {
        return String::new();
    }
    let links: Vec<String> = links.iter().map(ToString::to_string).collect();
    format!(" (被 {} 依赖)", links.join(" <- "))
}

impl DependencyError {
    /// 创建条目未找到错误
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            id: id.into(),
            required_by: Vec::new(),
        }
    }

    /// 创建不可实例化错误
    pub fn not_instantiable(type_name: impl Into<String>) -> Self {
        Self::NotInstantiable {
            type_name: type_name.into(),
            required_by: Vec::new(),
        }
    }

    /// 创建参数无法解析错误
    pub fn unresolvable_parameter(
        type_name: impl Into<String>,
        parameter: impl Into<String>,
        declared: impl Into<String>,
    ) -> Self {
        Self::UnresolvableParameter {
            type_name: type_name.into(),
            parameter: parameter.into(),
            declared: declared.into(),
            required_by: Vec::new(),
        }
    }

    /// 创建解析失败错误
    pub fn resolution_failure(id: impl Into<String>, source: IntrospectionError) -> Self {
        Self::ResolutionFailure {
            id: id.into(),
            source,
            required_by: Vec::new(),
        }
    }

    /// 记录外层依赖：`type_name` 的参数 `parameter` 触发了本次失败
    pub fn required_by(
        mut self,
        type_name: impl Into<String>,
        parameter: impl Into<String>,
    ) -> Self {
        let link = DependencyLink {
            type_name: type_name.into(),
            parameter: parameter.into(),
        };
        match &mut self {
            Self::NotFound { required_by, .. }
            | Self::NotInstantiable { required_by, .. }
            | Self::UnresolvableParameter { required_by, .. }
            | Self::ResolutionFailure { required_by, .. } => required_by.push(link),
        }
        self
    }

    /// 依赖链，由内到外，直接解析失败时为空
    pub fn chain(&self) -> &[DependencyLink] {
        match self {
            Self::NotFound { required_by, .. }
            | Self::NotInstantiable { required_by, .. }
            | Self::UnresolvableParameter { required_by, .. }
            | Self::ResolutionFailure { required_by, .. } => required_by,
        }
    }

    /// 是否为“未找到”错误
    ///
    /// 其余变体都表示条目存在（或可自动装配）但无法构造。
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type IntrospectionResult<T> = Result<T, IntrospectionError>;
