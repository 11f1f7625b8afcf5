use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use giveaway_backend::{
    config::Config,
    database::{EntryStore, SeaOrmEntryStore, create_pool, run_migrations},
    external::{OrderLookup, WooCommerceClient},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::{JwtService, hash_password},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 生成管理员密码哈希: giveaway-backend hash-password <password>
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("hash-password") {
        let Some(password) = args.get(2) else {
            eprintln!("usage: giveaway-backend hash-password <password>");
            std::process::exit(2);
        };
        let hash = hash_password(password).map_err(std::io::Error::other)?;
        println!("{hash}");
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建JWT服务
    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expires_in);

    // 商城订单接口
    let order_lookup: Arc<dyn OrderLookup> = Arc::new(
        WooCommerceClient::new(config.woocommerce.clone())
            .expect("Failed to create WooCommerce client"),
    );
    let entry_store: Arc<dyn EntryStore> = Arc::new(SeaOrmEntryStore::new(pool.clone()));

    // 创建服务
    let eligibility_service = EligibilityService::new(
        order_lookup,
        entry_store.clone(),
        EligibilityCriteria::from_config(&config.giveaway),
    );
    let entry_service = EntryService::new(
        entry_store.clone(),
        eligibility_service.clone(),
        config.giveaway.revalidate_on_submit,
    );
    let report_service = ReportService::new(entry_store, config.admin.page_size);
    let auth_service = AuthService::new(config.admin.accounts.clone(), jwt_service.clone());

    if config.admin.accounts.is_empty() {
        log::warn!("No admin accounts configured, admin endpoints are unreachable");
    }

    let giveaway_config = config.giveaway.clone();

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(eligibility_service.clone()))
            .app_data(web::Data::new(entry_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(giveaway_config.clone()))
            .configure(swagger_config)
            .configure(handlers::api_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
