//! # 依赖注入具体实现
//!
//! 提供具体的依赖注入容器与容器构建器。
//!
//! 解析顺序：
//!
//! 1. 已注册的标识符按条目种类处理：工厂被调用，类型引用被构造，字面量原样返回；
//! 2. 未注册且启用自动装配时，把标识符当作类型名称构造；
//! 3. 否则返回 [`DependencyError::NotFound`]。
//!
//! 构造类型时按声明顺序解析构造函数参数，具名类型参数递归回到第 1 步。
//! 下层失败保持原有错误种类，并在 `required_by` 中记录触发它的外层类型与参数。
//! 解析不缓存、不检测循环依赖，自引用的类型图会一直递归到栈耗尽。

use di_abstractions::{
    global_introspector, DiContainer, Entry, EntryKind, Resolver, TypeIntrospector,
};
use infrastructure_common::{
    Construction, ContainerOptions, DependencyError, DependencyResult, Instance, ParameterInfo,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, debug_span, info};

/// 具体的依赖注入容器实现
pub struct DiContainerImpl {
    /// 注册条目
    entries: HashMap<String, Entry>,
    /// 首次注册顺序
    order: Vec<String>,
    /// 自动装配开关，构造后不可更改
    autowiring: bool,
    /// 类型内省设施
    catalog: Arc<dyn TypeIntrospector>,
}

impl DiContainerImpl {
    /// 创建使用全局类型目录的容器
    pub fn new(autowiring: bool) -> Self {
        Self::with_catalog(global_introspector(), autowiring)
    }

    /// 创建使用指定类型目录的容器
    pub fn with_catalog(catalog: Arc<dyn TypeIntrospector>, autowiring: bool) -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            autowiring,
            catalog,
        }
    }

    /// 按配置创建容器
    pub fn from_options(options: &ContainerOptions) -> Self {
        Self::new(options.autowiring)
    }

    /// 容器构建器
    pub fn builder() -> DiContainerBuilder {
        DiContainerBuilder::new()
    }

    /// 已注册条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否没有任何注册条目
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 查询条目种类
    pub fn entry_kind(&self, id: &str) -> Option<EntryKind> {
        self.entries.get(id).map(Entry::kind)
    }

    /// 按类型名称构造实例
    fn build(&self, type_name: &str) -> DependencyResult<Instance> {
        let descriptor = self
            .catalog
            .describe(type_name)
            .map_err(|source| DependencyError::resolution_failure(type_name, source))?;

        match descriptor.construction() {
            Construction::Abstract => {
                debug!("类型 {} 不可实例化", type_name);
                Err(DependencyError::not_instantiable(type_name))
            }
            Construction::Default(make) => {
                debug!("默认构造 {}", type_name);
                Ok(make())
            }
            Construction::Constructor {
                parameters,
                construct,
            } => {
                let mut arguments = Vec::with_capacity(parameters.len());
                for parameter in parameters {
                    arguments.push(self.resolve_parameter(type_name, parameter)?);
                }

                debug!("以 {} 个参数构造 {}", arguments.len(), type_name);
                construct(arguments)
                    .map_err(|source| DependencyError::resolution_failure(type_name, source))
            }
        }
    }

    /// 解析单个构造函数参数
    fn resolve_parameter(
        &self,
        type_name: &str,
        parameter: &ParameterInfo,
    ) -> DependencyResult<Instance> {
        match parameter.ty.dependency_id() {
            Some(dependency) => self.resolve(dependency).map_err(|e| {
                debug!(
                    "{} 的参数 ${} 依赖 {} 解析失败: {}",
                    type_name, parameter.name, dependency, e
                );
                e.required_by(type_name, parameter.name.as_str())
            }),
            None => parameter.default_value().ok_or_else(|| {
                debug!("{} 的参数 ${} 没有可用的默认值", type_name, parameter.name);
                DependencyError::unresolvable_parameter(
                    type_name,
                    parameter.name.as_str(),
                    parameter.ty.to_string(),
                )
            }),
        }
    }
}

impl Default for DiContainerImpl {
    fn default() -> Self {
        Self::new(ContainerOptions::default().autowiring)
    }
}

impl fmt::Debug for DiContainerImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiContainerImpl")
            .field("entries", &self.order)
            .field("autowiring", &self.autowiring)
            .field("catalog", &"<introspector>")
            .finish()
    }
}

impl Resolver for DiContainerImpl {
    fn resolve(&self, id: &str) -> DependencyResult<Instance> {
        let _span = debug_span!("resolve", id = %id).entered();

        if let Some(entry) = self.entries.get(id) {
            debug!("命中{}条目", entry.kind());
            return match entry {
                Entry::Factory(factory) => factory(self as &dyn Resolver),
                Entry::ClassReference(type_name) => self.build(type_name),
                Entry::Literal(value) => Ok(value.clone()),
            };
        }

        if self.autowiring {
            debug!("未注册，尝试自动装配");
            return self.build(id);
        }

        Err(DependencyError::not_found(id))
    }

    fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }
}

impl DiContainer for DiContainerImpl {
    fn register(&mut self, id: String, entry: Entry) {
        info!("注册{}: {}", entry.kind(), id);

        if !self.entries.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.entries.insert(id, entry);
    }

    fn registered_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    fn autowiring_enabled(&self) -> bool {
        self.autowiring
    }
}

/// 容器构建器实现
pub struct DiContainerBuilder {
    autowiring: bool,
    catalog: Option<Arc<dyn TypeIntrospector>>,
    registrations: Vec<(String, Entry)>,
}

impl DiContainerBuilder {
    /// 创建构建器
    pub fn new() -> Self {
        Self {
            autowiring: ContainerOptions::default().autowiring,
            catalog: None,
            registrations: Vec::new(),
        }
    }

    /// 设置自动装配开关
    pub fn autowiring(mut self, enabled: bool) -> Self {
        self.autowiring = enabled;
        self
    }

    /// 应用容器选项
    pub fn with_options(self, options: &ContainerOptions) -> Self {
        self.autowiring(options.autowiring)
    }

    /// 使用指定的类型目录，默认使用全局目录
    pub fn with_catalog(mut self, catalog: Arc<dyn TypeIntrospector>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// 添加条目
    pub fn register(mut self, id: impl Into<String>, entry: Entry) -> Self {
        self.registrations.push((id.into(), entry));
        self
    }

    /// 添加字面量
    pub fn set<T>(self, id: impl Into<String>, value: T) -> Self
    where
        T: std::any::Any + Send + Sync,
    {
        self.register(id, Entry::literal(value))
    }

    /// 添加工厂
    pub fn factory<F>(self, id: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&dyn Resolver) -> DependencyResult<Instance> + Send + Sync + 'static,
    {
        self.register(id, Entry::factory(factory))
    }

    /// 添加类型引用
    pub fn bind(self, id: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.register(id, Entry::class(type_name))
    }

    /// 构建容器
    pub fn build(self) -> DiContainerImpl {
        let catalog = self.catalog.unwrap_or_else(global_introspector);
        let mut container = DiContainerImpl::with_catalog(catalog, self.autowiring);

        let registration_count = self.registrations.len();
        for (id, entry) in self.registrations {
            container.register(id, entry);
        }

        info!(
            "构建容器完成，注册了 {} 个条目，自动装配: {}",
            registration_count, self.autowiring
        );
        container
    }
}

impl Default for DiContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
