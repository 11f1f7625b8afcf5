use crate::entities::{EntryStatus, GiveawayEntry};
use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PaginatedResponse;

pub const MSG_VALID_ENTRY: &str = "Valid entry";
pub const MSG_ORDER_NOT_FOUND: &str = "Order not found";
pub const MSG_ORDER_INELIGIBLE: &str = "Order does not meet giveaway criteria";
pub const MSG_ALREADY_ENTERED: &str = "You have already entered this giveaway. Good Luck!";
pub const MSG_ENTRY_SUBMITTED: &str = "Entry submitted successfully";
pub const MSG_SUBMIT_FAILED: &str = "Failed to submit entry";

/// 订单校验请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOrderRequest {
    /// 订单 ID、订单号或订单密钥
    #[schema(example = "1042")]
    pub order_number: String,
    #[schema(example = "a@example.com")]
    pub email: String,
}

/// 参与提交请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEntryRequest {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "a@example.com")]
    pub email: String,
    #[schema(example = "1042")]
    pub order_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

/// 业务上的拒绝原因 (不是错误, 以正常 JSON 返回)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    OrderNotFound,
    IneligibleOrder,
    DuplicateEntry,
    InvalidInput(String),
}

impl Rejection {
    pub fn message(&self) -> &str {
        match self {
            Rejection::OrderNotFound => MSG_ORDER_NOT_FOUND,
            Rejection::IneligibleOrder => MSG_ORDER_INELIGIBLE,
            Rejection::DuplicateEntry => MSG_ALREADY_ENTERED,
            Rejection::InvalidInput(reason) => reason.as_str(),
        }
    }

    /// strict_status_codes 打开时使用的状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Rejection::OrderNotFound => StatusCode::NOT_FOUND,
            Rejection::IneligibleOrder => StatusCode::UNPROCESSABLE_ENTITY,
            Rejection::DuplicateEntry => StatusCode::CONFLICT,
            Rejection::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// 订单资格校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Valid,
    Rejected(Rejection),
}

impl Eligibility {
    pub fn is_valid(&self) -> bool {
        matches!(self, Eligibility::Valid)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Eligibility::Valid => StatusCode::OK,
            Eligibility::Rejected(r) => r.status_code(),
        }
    }
}

impl From<&Eligibility> for ValidationResponse {
    fn from(e: &Eligibility) -> Self {
        match e {
            Eligibility::Valid => ValidationResponse {
                valid: true,
                message: MSG_VALID_ENTRY.to_string(),
            },
            Eligibility::Rejected(r) => ValidationResponse {
                valid: false,
                message: r.message().to_string(),
            },
        }
    }
}

/// 参与提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Submitted { id: i64 },
    /// 输入不合法或订单复查未通过
    Rejected(Rejection),
    /// 唯一约束冲突 (重复邮箱 / 订单号)
    Duplicate,
    /// 其它存储错误
    StorageFailure,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Submitted { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmissionOutcome::Submitted { .. } => StatusCode::OK,
            SubmissionOutcome::Rejected(r) => r.status_code(),
            SubmissionOutcome::Duplicate => StatusCode::CONFLICT,
            SubmissionOutcome::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&SubmissionOutcome> for SubmissionResponse {
    fn from(o: &SubmissionOutcome) -> Self {
        let message = match o {
            SubmissionOutcome::Submitted { .. } => MSG_ENTRY_SUBMITTED,
            SubmissionOutcome::Rejected(r) => r.message(),
            SubmissionOutcome::Duplicate | SubmissionOutcome::StorageFailure => MSG_SUBMIT_FAILED,
        };
        SubmissionResponse {
            success: o.is_success(),
            message: message.to_string(),
        }
    }
}

/// 后台列表查询参数 (paged 非法时按第 1 页处理)
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct EntryListQuery {
    pub paged: Option<String>,
}

impl EntryListQuery {
    pub fn page(&self) -> Option<i64> {
        self.paged.as_deref().and_then(|p| p.trim().parse().ok())
    }
}

/// 后台列表中的参与记录
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntryResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub order_number: String,
    pub entry_date: DateTime<Utc>,
    pub status: EntryStatus,
}

impl From<GiveawayEntry> for EntryResponse {
    fn from(m: GiveawayEntry) -> Self {
        EntryResponse {
            id: m.id,
            name: m.name,
            email: m.email,
            order_number: m.order_number,
            entry_date: m.entry_date,
            status: m.status,
        }
    }
}

/// 参与记录分页响应
pub type EntryPageResponse = PaginatedResponse<EntryResponse>;
