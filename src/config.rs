use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub woocommerce: WooCommerceConfig,
    #[serde(default)]
    pub giveaway: GiveawayConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WooCommerceConfig {
    /// 商城站点根地址, 例如 https://shop.example.com
    pub base_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    #[serde(default = "default_wc_timeout_secs")]
    pub timeout_secs: u64,
}

/// 抽奖资格规则
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiveawayConfig {
    /// 订单最低金额 (元, 含)
    #[serde(default = "default_minimum_total")]
    pub minimum_total: Decimal,
    /// 订单必须处于的状态
    #[serde(default = "default_required_status")]
    pub required_status: String,
    /// 提交时重新校验订单
    #[serde(default = "default_true")]
    pub revalidate_on_submit: bool,
    /// 业务失败时返回 4xx 状态码 (默认全部 200, 仅在 body 中体现)
    #[serde(default)]
    pub strict_status_codes: bool,
}

impl Default for GiveawayConfig {
    fn default() -> Self {
        Self {
            minimum_total: default_minimum_total(),
            required_status: default_required_status(),
            revalidate_on_submit: true,
            strict_status_codes: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default)]
    pub accounts: Vec<AdminAccount>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            accounts: Vec::new(),
        }
    }
}

/// 后台管理员账号, password_hash 为 bcrypt 哈希
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAccount {
    pub username: String,
    pub password_hash: String,
}

fn default_wc_timeout_secs() -> u64 {
    10
}

fn default_minimum_total() -> Decimal {
    Decimal::new(50, 0)
}

fn default_required_status() -> String {
    "completed".to_string()
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> u64 {
    20
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and config.toml was not found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                    },
                    woocommerce: WooCommerceConfig {
                        base_url: get_env("WC_BASE_URL").unwrap_or_default(),
                        consumer_key: get_env("WC_CONSUMER_KEY").unwrap_or_default(),
                        consumer_secret: get_env("WC_CONSUMER_SECRET").unwrap_or_default(),
                        timeout_secs: get_env_parse("WC_TIMEOUT_SECS", default_wc_timeout_secs()),
                    },
                    giveaway: GiveawayConfig::default(),
                    admin: AdminConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}").into())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("WC_BASE_URL") {
            self.woocommerce.base_url = v;
        }
        if let Ok(v) = env::var("WC_CONSUMER_KEY") {
            self.woocommerce.consumer_key = v;
        }
        if let Ok(v) = env::var("WC_CONSUMER_SECRET") {
            self.woocommerce.consumer_secret = v;
        }
        if let Ok(v) = env::var("WC_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            self.woocommerce.timeout_secs = n;
        }

        // Giveaway
        if let Ok(v) = env::var("GIVEAWAY_MINIMUM_TOTAL")
            && let Ok(n) = v.parse()
        {
            self.giveaway.minimum_total = n;
        }
        if let Ok(v) = env::var("GIVEAWAY_REQUIRED_STATUS") {
            self.giveaway.required_status = v;
        }
        if let Ok(v) = env::var("GIVEAWAY_REVALIDATE_ON_SUBMIT")
            && let Some(b) = parse_bool(&v)
        {
            self.giveaway.revalidate_on_submit = b;
        }
        if let Ok(v) = env::var("GIVEAWAY_STRICT_STATUS_CODES")
            && let Some(b) = parse_bool(&v)
        {
            self.giveaway.strict_status_codes = b;
        }

        // Admin
        if let Ok(v) = env::var("ADMIN_PAGE_SIZE")
            && let Ok(n) = v.parse()
        {
            self.admin.page_size = n;
        }
        if let (Ok(username), Ok(password_hash)) =
            (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD_HASH"))
        {
            self.admin.accounts.retain(|a| a.username != username);
            self.admin.accounts.push(AdminAccount {
                username,
                password_hash,
            });
        }
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.giveaway.minimum_total < Decimal::ZERO {
            return Err("giveaway.minimum_total must be a non-negative number".into());
        }
        if self.giveaway.required_status.trim().is_empty() {
            return Err("giveaway.required_status must not be empty".into());
        }
        if self.admin.page_size == 0 {
            return Err("admin.page_size must be positive".into());
        }
        Ok(())
    }
}
