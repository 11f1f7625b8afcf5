use crate::config::WooCommerceConfig;
use crate::error::{AppError, AppResult};
use crate::external::OrderLookup;
use crate::models::Order;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// wc/v3 允许的最大 per_page
const SEARCH_PAGE_SIZE: u32 = 100;
/// 模糊搜索最多翻的页数
const MAX_SEARCH_PAGES: u32 = 20;
const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

#[derive(Debug, Serialize, Deserialize)]
pub struct WcOrder {
    pub id: i64,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub order_key: String,
    pub status: String,
    pub total: String,
    #[serde(default)]
    pub meta_data: Vec<WcMeta>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WcMeta {
    pub key: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl WcOrder {
    /// 订单号插件把自定义单号写在 `_order_number` 元数据里
    fn custom_order_number(&self) -> Option<&str> {
        self.meta_data
            .iter()
            .find(|m| m.key == "_order_number")
            .and_then(|m| m.value.as_str())
    }

    fn matches_identifier(&self, identifier: &str) -> bool {
        self.number == identifier
            || self.order_key == identifier
            || self.custom_order_number() == Some(identifier)
    }

    fn into_order(self) -> AppResult<Order> {
        let total = Decimal::from_str(self.total.trim()).map_err(|e| {
            AppError::ExternalApiError(format!(
                "Order {} has an unparseable total {:?}: {e}",
                self.id, self.total
            ))
        })?;
        let number = match self.custom_order_number() {
            Some(n) => n.to_string(),
            None => self.number,
        };
        Ok(Order {
            id: self.id,
            status: self.status,
            total,
            number,
            order_key: self.order_key,
        })
    }
}

/// WooCommerce REST API (wc/v3) 订单查询
#[derive(Clone)]
pub struct WooCommerceClient {
    http: Client,
    cfg: WooCommerceConfig,
}

impl WooCommerceClient {
    pub fn new(cfg: WooCommerceConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent("giveaway-backend/woocommerce")
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, cfg })
    }

    fn orders_url(&self) -> String {
        format!(
            "{}/wp-json/wc/v3/orders",
            self.cfg.base_url.trim_end_matches('/')
        )
    }

    async fn error_from(resp: reqwest::Response, context: &str) -> AppError {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        AppError::ExternalApiError(format!(
            "{context}: HTTP {}: {}",
            status.as_u16(),
            body
        ))
    }
}

#[async_trait]
impl OrderLookup for WooCommerceClient {
    async fn find_by_id(&self, id: u64) -> AppResult<Option<Order>> {
        let resp = self
            .http
            .get(format!("{}/{id}", self.orders_url()))
            .basic_auth(&self.cfg.consumer_key, Some(&self.cfg.consumer_secret))
            .send()
            .await?;

        // 订单不存在时 WooCommerce 返回 404 woocommerce_rest_shop_order_invalid_id
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "WooCommerce order lookup failed").await);
        }

        let order: WcOrder = resp.json().await?;
        order.into_order().map(Some)
    }

    /// search 是模糊匹配 (地址、邮箱、商品名都会命中), 逐页翻到
    /// 订单号 / 订单密钥完全一致的那条, 或者翻完为止
    async fn find_by_number_or_key(&self, identifier: &str) -> AppResult<Option<Order>> {
        let mut page = 1;
        loop {
            let resp = self
                .http
                .get(self.orders_url())
                .basic_auth(&self.cfg.consumer_key, Some(&self.cfg.consumer_secret))
                .query(&[
                    ("search", identifier.to_string()),
                    ("per_page", SEARCH_PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await?;

            if !resp.status().is_success() {
                return Err(Self::error_from(resp, "WooCommerce order search failed").await);
            }

            let total_pages = resp
                .headers()
                .get(TOTAL_PAGES_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok());
            let orders: Vec<WcOrder> = resp.json().await?;
            let fetched = orders.len();
            log::debug!(
                "WooCommerce search for {identifier:?} page {page} returned {fetched} orders"
            );

            if let Some(order) = orders.into_iter().find(|o| o.matches_identifier(identifier)) {
                return order.into_order().map(Some);
            }

            let last_page = match total_pages {
                Some(total) => page >= total,
                None => fetched < SEARCH_PAGE_SIZE as usize,
            };
            if last_page {
                return Ok(None);
            }
            if page >= MAX_SEARCH_PAGES {
                log::warn!(
                    "WooCommerce search for {identifier:?} stopped after {MAX_SEARCH_PAGES} pages"
                );
                return Ok(None);
            }
            page += 1;
        }
    }
}
