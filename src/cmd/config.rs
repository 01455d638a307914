use std::sync::OnceLock;

use config::Config;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BcConfig {
    // byte size
    pub io_buf_size: usize,

    // maximum creatable threads
    pub threads: usize,
}

impl Default for BcConfig {
    fn default() -> Self {
        Self {
            io_buf_size: 8 * 1024,
            threads: (num_cpus::get() >> 1).max(1),
        }
    }
}

impl BcConfig {
    pub fn config() -> &'static Self {
        Self::config_with_file(None)
    }

    /// 默认值 -> 环境变量(`BLOCKCRYPT__THREADS`, `BLOCKCRYPT__IO_BUF_SIZE`) -> 配置文件, 后者覆盖前者. <br>
    /// 只在第一次调用时加载, 加载失败时使用默认值.
    pub fn config_with_file(f: Option<&str>) -> &'static Self {
        static CONFIG: OnceLock<BcConfig> = OnceLock::new();

        CONFIG.get_or_init(|| match Self::load(f) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("load config failed, use the default config: {e}");
                Self::default()
            }
        })
    }

    fn load(f: Option<&str>) -> anyhow::Result<Self> {
        let default_config = Config::try_from(&BcConfig::default())?;

        let mut config = Config::builder().add_source(default_config).add_source(
            config::Environment::with_prefix("BLOCKCRYPT")
                .try_parsing(true)
                .separator("__"),
        );

        if let Some(f) = f {
            config = config.add_source(config::File::with_name(f).required(false));
        }

        let mut bcconfig: BcConfig = config.build()?.try_deserialize()?;

        bcconfig.threads = bcconfig.threads.max(1);
        bcconfig.io_buf_size = bcconfig.io_buf_size.max(512);

        log::trace!("{:?}", bcconfig);

        Ok(bcconfig)
    }

    /// 按`threads`初始化rayon全局线程池, 只能成功一次
    pub fn init_thread_pool(&self) {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build_global()
        {
            log::debug!("rayon global thread pool already initialized: {e}");
        }
    }
}
