//! # 依赖注入注册表演示程序
//!
//! 依次演示基本值、工厂、自动装配、接口绑定与并发解析。

mod scenarios;
mod services;

use clap::{Parser, ValueEnum};
use infrastructure_common::{ContainerOptions, DEFAULT_ENV_PREFIX};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "container-demo")]
#[command(about = "Lorn ADSP 依赖注入注册表演示")]
struct Args {
    /// 演示场景
    #[arg(value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// 关闭自动装配（覆盖 DI_AUTOWIRING）
    #[arg(long)]
    no_autowiring: bool,

    /// 日志级别，RUST_LOG 优先
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 演示场景
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    Basic,
    Factories,
    Autowiring,
    Interface,
    Concurrent,
    All,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut options = ContainerOptions::from_env(DEFAULT_ENV_PREFIX)?;
    if args.no_autowiring {
        options = options.with_autowiring(false);
    }
    info!("启动演示: {:?}，自动装配: {}", args.scenario, options.autowiring);

    match args.scenario {
        Scenario::Basic => scenarios::basic(&options)?,
        Scenario::Factories => scenarios::factories(&options)?,
        Scenario::Autowiring => scenarios::autowiring(&options)?,
        Scenario::Interface => scenarios::interface(&options)?,
        Scenario::Concurrent => scenarios::concurrent(&options).await?,
        Scenario::All => {
            scenarios::basic(&options)?;
            scenarios::factories(&options)?;
            scenarios::autowiring(&options)?;
            scenarios::interface(&options)?;
            scenarios::concurrent(&options).await?;
        }
    }

    info!("演示结束");
    Ok(())
}
