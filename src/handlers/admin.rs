use crate::middlewares::get_current_admin;
use crate::models::*;
use crate::services::{ReportService, export_filename};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Utc;

#[utoipa::path(
    get,
    path = "/admin/entries",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("paged" = Option<String>, Query, description = "页码, 从 1 开始; 非法值按第 1 页处理")
    ),
    responses(
        (status = 200, description = "参与记录列表 (entry_date 倒序)"),
        (status = 401, description = "未登录"),
        (status = 403, description = "缺少后台权限")
    )
)]
pub async fn list_entries(
    report_service: web::Data<ReportService>,
    query: web::Query<EntryListQuery>,
) -> Result<HttpResponse> {
    match report_service.list_entries(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/entries/export",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "CSV 文件 (Name, Email, Order Number, Entry Date, Status)", content_type = "text/csv"),
        (status = 401, description = "未登录"),
        (status = 403, description = "缺少后台权限")
    )
)]
pub async fn export_entries(
    report_service: web::Data<ReportService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let csv = match report_service.export_csv().await {
        Ok(csv) => csv,
        Err(e) => return Ok(e.error_response()),
    };

    let filename = export_filename(Utc::now().date_naive());
    log::info!(
        "Admin {} exported giveaway entries as {filename}",
        get_current_admin(&req).unwrap_or_default()
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(csv))
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/entries", web::get().to(list_entries))
            .route("/entries/export", web::post().to(export_entries)),
    );
}
