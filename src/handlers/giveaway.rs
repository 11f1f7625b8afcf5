use crate::config::GiveawayConfig;
use crate::models::*;
use crate::services::{EligibilityService, EntryService};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, Result, web};

fn status_for(giveaway: &GiveawayConfig, strict: StatusCode) -> StatusCode {
    if giveaway.strict_status_codes {
        strict
    } else {
        StatusCode::OK
    }
}

#[utoipa::path(
    post,
    path = "/validate-order",
    tag = "giveaway",
    request_body = ValidateOrderRequest,
    responses(
        (status = 200, description = "校验结果 (valid=false 时 message 给出原因)", body = ValidationResponse),
        (status = 400, description = "请求体格式错误"),
        (status = 502, description = "商城订单接口不可用")
    )
)]
/// 校验订单是否满足抽奖条件, 不写入任何记录
pub async fn validate_order(
    service: web::Data<EligibilityService>,
    giveaway: web::Data<GiveawayConfig>,
    request: web::Json<ValidateOrderRequest>,
) -> Result<HttpResponse> {
    match service.evaluate(&request.order_number, &request.email).await {
        Ok(verdict) => Ok(
            HttpResponse::build(status_for(&giveaway, verdict.status_code()))
                .json(ValidationResponse::from(&verdict)),
        ),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/submit-entry",
    tag = "giveaway",
    request_body = SubmitEntryRequest,
    responses(
        (status = 200, description = "提交结果 (success=false 时 message 给出原因)", body = SubmissionResponse),
        (status = 400, description = "请求体格式错误"),
        (status = 502, description = "商城订单接口不可用")
    )
)]
/// 提交抽奖参与记录 (status = pending)
pub async fn submit_entry(
    service: web::Data<EntryService>,
    giveaway: web::Data<GiveawayConfig>,
    request: web::Json<SubmitEntryRequest>,
) -> Result<HttpResponse> {
    match service
        .submit(&request.name, &request.email, &request.order_number)
        .await
    {
        Ok(outcome) => Ok(
            HttpResponse::build(status_for(&giveaway, outcome.status_code()))
                .json(SubmissionResponse::from(&outcome)),
        ),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn giveaway_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/validate-order", web::post().to(validate_order))
        .route("/submit-entry", web::post().to(submit_entry));
}
