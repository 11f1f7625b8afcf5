//! 测试用的内存实现

use crate::database::{EntryStore, NewEntry};
use crate::entities::GiveawayEntry;
use crate::error::{AppError, AppResult};
use crate::external::OrderLookup;
use crate::models::Order;
use rust_decimal::Decimal;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// 内存订单表, 可切换为"商城不可用"
#[derive(Default)]
pub struct FakeOrderLookup {
    orders: Vec<Order>,
    unavailable: AtomicBool,
}

impl FakeOrderLookup {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders,
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::ExternalApiError("shop unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderLookup for FakeOrderLookup {
    async fn find_by_id(&self, id: u64) -> AppResult<Option<Order>> {
        self.check_available()?;
        Ok(self.orders.iter().find(|o| o.id as u64 == id).cloned())
    }

    async fn find_by_number_or_key(&self, identifier: &str) -> AppResult<Option<Order>> {
        self.check_available()?;
        Ok(self
            .orders
            .iter()
            .find(|o| o.number == identifier || o.order_key == identifier)
            .cloned())
    }
}

/// 内存参与记录表, 与数据库一样对 email / order_number 做唯一约束
#[derive(Default)]
pub struct InMemoryEntryStore {
    rows: Mutex<Vec<GiveawayEntry>>,
    broken: AtomicBool,
}

impl InMemoryEntryStore {
    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_healthy(&self) -> AppResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sea_orm::DbErr::Custom(
                "connection reset".into(),
            )));
        }
        Ok(())
    }

    fn sorted(&self) -> Vec<GiveawayEntry> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.entry_date.cmp(&a.entry_date).then(b.id.cmp(&a.id)));
        rows
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn find_by_email_or_order(
        &self,
        email: &str,
        order_number: &str,
    ) -> AppResult<Option<GiveawayEntry>> {
        self.check_healthy()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == email || e.order_number == order_number)
            .cloned())
    }

    async fn insert(&self, entry: NewEntry) -> AppResult<i64> {
        self.check_healthy()?;
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|e| e.email == entry.email || e.order_number == entry.order_number)
        {
            return Err(AppError::DuplicateEntry(
                "giveaway_entries email/order_number".into(),
            ));
        }
        let id = rows.len() as i64 + 1;
        rows.push(GiveawayEntry {
            id,
            name: entry.name,
            email: entry.email,
            order_number: entry.order_number,
            entry_date: entry.entry_date,
            status: entry.status,
        });
        Ok(id)
    }

    async fn list_page(&self, offset: u64, limit: u64) -> AppResult<(Vec<GiveawayEntry>, u64)> {
        self.check_healthy()?;
        let rows = self.sorted();
        let total = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();
        Ok((items, total))
    }

    async fn list_all(&self) -> AppResult<Vec<GiveawayEntry>> {
        self.check_healthy()?;
        Ok(self.sorted())
    }
}

pub fn order(id: i64, status: &str, total_cents: i64) -> Order {
    Order {
        id,
        status: status.to_string(),
        total: Decimal::new(total_cents, 2),
        number: id.to_string(),
        order_key: format!("wc_order_{id}"),
    }
}
