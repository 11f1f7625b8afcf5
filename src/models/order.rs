use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 商城订单 (只读, 来自商城系统)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// 订单生命周期状态, 例如 pending / processing / completed / refunded
    pub status: String,
    /// 订单总额 (精确小数, 不做舍入)
    pub total: Decimal,
    /// 对外展示的订单号
    pub number: String,
    /// 订单密钥 (wc_order_xxx)
    pub order_key: String,
}
