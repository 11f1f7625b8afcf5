use crate::config::GiveawayConfig;
use crate::database::EntryStore;
use crate::error::AppResult;
use crate::external::{OrderLookup, resolve_order};
use crate::models::{Eligibility, Order, Rejection};
use crate::utils::{is_valid_email, sanitize_email, sanitize_text_field};
use rust_decimal::Decimal;
use std::sync::Arc;

/// 订单参与资格: 状态一致且金额不低于下限
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityCriteria {
    pub minimum_total: Decimal,
    pub required_status: String,
}

impl Default for EligibilityCriteria {
    fn default() -> Self {
        Self::from_config(&GiveawayConfig::default())
    }
}

impl EligibilityCriteria {
    pub fn from_config(cfg: &GiveawayConfig) -> Self {
        Self {
            minimum_total: cfg.minimum_total,
            required_status: cfg.required_status.trim().to_string(),
        }
    }

    pub fn is_met_by(&self, order: &Order) -> bool {
        order.status == self.required_status && order.total >= self.minimum_total
    }
}

#[derive(Clone)]
pub struct EligibilityService {
    orders: Arc<dyn OrderLookup>,
    entries: Arc<dyn EntryStore>,
    criteria: EligibilityCriteria,
}

impl EligibilityService {
    pub fn new(
        orders: Arc<dyn OrderLookup>,
        entries: Arc<dyn EntryStore>,
        criteria: EligibilityCriteria,
    ) -> Self {
        Self {
            orders,
            entries,
            criteria,
        }
    }

    /// 校验订单能否参与抽奖 (只读, 不写入任何记录)
    ///
    /// 依次: 输入检查 → 查订单 → 资格规则 → 是否已参与。
    /// 商城或数据库不可用时返回 `Err`, 不会被吞掉。
    pub async fn evaluate(&self, order_identifier: &str, email: &str) -> AppResult<Eligibility> {
        let order_identifier = sanitize_text_field(order_identifier);
        let email = sanitize_email(email);

        if order_identifier.is_empty() {
            return Ok(Eligibility::Rejected(Rejection::InvalidInput(
                "Order number is required".into(),
            )));
        }
        if !is_valid_email(&email) {
            return Ok(Eligibility::Rejected(Rejection::InvalidInput(
                "Invalid email address".into(),
            )));
        }

        let order_check = self.check_order(&order_identifier).await?;
        if !order_check.is_valid() {
            return Ok(order_check);
        }

        if let Some(existing) = self
            .entries
            .find_by_email_or_order(&email, &order_identifier)
            .await?
        {
            log::info!(
                "Giveaway entry {} already exists for order {order_identifier}",
                existing.id
            );
            return Ok(Eligibility::Rejected(Rejection::DuplicateEntry));
        }

        Ok(Eligibility::Valid)
    }

    /// 只校验订单本身 (存在 + 资格规则), 不查重复参与
    pub async fn check_order(&self, order_identifier: &str) -> AppResult<Eligibility> {
        let Some(order) = resolve_order(self.orders.as_ref(), order_identifier).await? else {
            return Ok(Eligibility::Rejected(Rejection::OrderNotFound));
        };

        if !self.criteria.is_met_by(&order) {
            log::info!(
                "Order {} not eligible: status={} total={}",
                order.id,
                order.status,
                order.total
            );
            return Ok(Eligibility::Rejected(Rejection::IneligibleOrder));
        }

        Ok(Eligibility::Valid)
    }
}
