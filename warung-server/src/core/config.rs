/// 扫码点餐服务的运行配置
///
/// 每一项都有默认值，部署时按需用环境变量覆盖即可：
///
/// | 变量 | 默认 | 作用 |
/// |------|------|------|
/// | WORK_DIR | /var/lib/warung | 数据库文件所在的工作目录 |
/// | HTTP_HOST | 0.0.0.0 | HTTP 监听地址 |
/// | HTTP_PORT | 3001 | HTTP 监听端口 |
/// | PUBLIC_BASE_URL | http://localhost:3000 | 顾客端站点，二维码 URL 以此为前缀 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SEED_DEMO_DATA | true | 空库启动时写入演示桌台和菜单 |
///
/// ```ignore
/// WORK_DIR=/data/warung HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据库文件所在的工作目录
    pub work_dir: String,
    /// HTTP 监听地址
    pub http_host: String,
    /// HTTP 监听端口
    pub http_port: u16,
    /// 顾客端站点地址，二维码 URL 的前缀
    pub public_base_url: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 空库启动时是否写入演示数据
    pub seed_demo_data: bool,
}

impl Config {
    /// 读取环境变量组装配置，缺失或非法的值落回默认
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/warung".into()),
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// 在环境配置之上覆盖工作目录和端口，测试用临时目录时走这里
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 建出工作目录（已存在则原样返回）
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
