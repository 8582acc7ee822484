//! 容器配置

use crate::errors::ConfigResult;
use serde::{Deserialize, Serialize};

/// 默认的环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "DI";

/// 容器选项
///
/// 只在构造容器时读取一次，容器创建后不可更改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerOptions {
    /// 是否对未注册的标识符启用自动装配
    #[serde(default = "default_autowiring")]
    pub autowiring: bool,
}

fn default_autowiring() -> bool {
    true
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            autowiring: default_autowiring(),
        }
    }
}

impl ContainerOptions {
    /// 从 `<prefix>_*` 环境变量加载，例如 `DI_AUTOWIRING=false`
    pub fn from_env(prefix: &str) -> ConfigResult<Self> {
        Self::from_source(config::Environment::with_prefix(prefix).try_parsing(true))
    }

    /// 从任意配置源加载
    pub fn from_source<S>(source: S) -> ConfigResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let options = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize::<Self>()?;
        Ok(options)
    }

    /// 覆盖自动装配开关
    pub fn with_autowiring(mut self, autowiring: bool) -> Self {
        self.autowiring = autowiring;
        self
    }
}
