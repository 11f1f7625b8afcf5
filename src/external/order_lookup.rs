use crate::error::AppResult;
use crate::models::Order;
use async_trait::async_trait;

/// 商城订单查询
///
/// 查询不到返回 `Ok(None)`; 商城不可用等基础设施错误返回 `Err`。
#[async_trait]
pub trait OrderLookup: Send + Sync {
    /// 按订单 ID 直接查询
    async fn find_by_id(&self, id: u64) -> AppResult<Option<Order>>;

    /// 按订单号或订单密钥精确匹配, 取第一条
    async fn find_by_number_or_key(&self, identifier: &str) -> AppResult<Option<Order>>;
}

/// 解析用户输入的订单标识:
/// 纯数字先按 ID 查, 查不到 (或非纯数字) 再按订单号 / 订单密钥查
pub async fn resolve_order(
    lookup: &dyn OrderLookup,
    identifier: &str,
) -> AppResult<Option<Order>> {
    if let Some(id) = numeric_id(identifier)
        && let Some(order) = lookup.find_by_id(id).await?
    {
        return Ok(Some(order));
    }
    lookup.find_by_number_or_key(identifier).await
}

fn numeric_id(identifier: &str) -> Option<u64> {
    if identifier.is_empty() || !identifier.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    identifier.parse().ok()
}
