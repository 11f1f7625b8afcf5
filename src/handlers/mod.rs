pub mod admin;
pub mod auth;
pub mod giveaway;

pub use admin::admin_config;
pub use auth::auth_config;
pub use giveaway::giveaway_config;

use crate::error::AppError;
use actix_web::web;

pub const API_PREFIX: &str = "/api/ps5-giveaway/v1";

/// 请求体解析失败统一按 VALIDATION_ERROR 返回
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .app_data(json_config())
            .configure(giveaway_config)
            .configure(auth_config)
            .configure(admin_config),
    );
}
