use crate::entities::{EntryStatus, GiveawayEntry, giveaway_entry_entity as entries};
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// 待写入的参与记录 (id 由数据库分配)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub name: String,
    pub email: String,
    pub order_number: String,
    pub entry_date: DateTime<Utc>,
    pub status: EntryStatus,
}

/// 参与记录存储
///
/// 所有列表均按 entry_date 倒序 (同一时间按 id 倒序)。
/// `insert` 遇到 email / order_number 唯一约束冲突时返回
/// `AppError::DuplicateEntry`, 其余存储错误为 `AppError::DatabaseError`。
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn find_by_email_or_order(
        &self,
        email: &str,
        order_number: &str,
    ) -> AppResult<Option<GiveawayEntry>>;

    async fn insert(&self, entry: NewEntry) -> AppResult<i64>;

    /// 返回 (offset 起最多 limit 条, 总数); offset 超出总数时返回空列表
    async fn list_page(&self, offset: u64, limit: u64) -> AppResult<(Vec<GiveawayEntry>, u64)>;

    async fn list_all(&self) -> AppResult<Vec<GiveawayEntry>>;
}

#[derive(Clone)]
pub struct SeaOrmEntryStore {
    pool: DatabaseConnection,
}

impl SeaOrmEntryStore {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    fn ordered() -> sea_orm::Select<entries::Entity> {
        entries::Entity::find()
            .order_by_desc(entries::Column::EntryDate)
            .order_by_desc(entries::Column::Id)
    }
}

#[async_trait]
impl EntryStore for SeaOrmEntryStore {
    async fn find_by_email_or_order(
        &self,
        email: &str,
        order_number: &str,
    ) -> AppResult<Option<GiveawayEntry>> {
        let found = entries::Entity::find()
            .filter(
                Condition::any()
                    .add(entries::Column::Email.eq(email))
                    .add(entries::Column::OrderNumber.eq(order_number)),
            )
            .one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn insert(&self, entry: NewEntry) -> AppResult<i64> {
        let model = entries::ActiveModel {
            id: NotSet,
            name: Set(entry.name),
            email: Set(entry.email),
            order_number: Set(entry.order_number),
            entry_date: Set(entry.entry_date),
            status: Set(entry.status),
        };
        let result = entries::Entity::insert(model).exec(&self.pool).await?;
        Ok(result.last_insert_id)
    }

    async fn list_page(&self, offset: u64, limit: u64) -> AppResult<(Vec<GiveawayEntry>, u64)> {
        let total = entries::Entity::find().count(&self.pool).await?;
        // OFFSET 绑定为 i64, 超出总数的页直接返回空
        if offset >= total {
            return Ok((Vec::new(), total));
        }

        let items = Self::ordered()
            .offset(offset)
            .limit(limit.min(i64::MAX as u64))
            .all(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn list_all(&self) -> AppResult<Vec<GiveawayEntry>> {
        let items = Self::ordered().all(&self.pool).await?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::error::AppError;
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, 12, 0, 0).unwrap()
    }

    fn new_entry(n: i64) -> NewEntry {
        NewEntry {
            name: format!("Player {n}"),
            email: format!("player{n}@example.com"),
            order_number: format!("{}", 1000 + n),
            entry_date: base_time() + Duration::minutes(n),
            status: EntryStatus::Pending,
        }
    }

    #[actix_web::test]
    async fn test_insert_and_find_by_email_or_order() {
        let store = SeaOrmEntryStore::new(memory_pool().await);
        let id = store.insert(new_entry(1)).await.unwrap();
        assert!(id > 0);

        let by_email = store
            .find_by_email_or_order("player1@example.com", "no-such-order")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, id);
        assert_eq!(by_email.status, EntryStatus::Pending);

        let by_order = store
            .find_by_email_or_order("someone@example.com", "1001")
            .await
            .unwrap();
        assert!(by_order.is_some());

        let none = store
            .find_by_email_or_order("someone@example.com", "9999")
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_reported_as_duplicate() {
        let store = SeaOrmEntryStore::new(memory_pool().await);
        store.insert(new_entry(1)).await.unwrap();

        let mut dup = new_entry(2);
        dup.email = "player1@example.com".to_string();
        let err = store.insert(dup).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEntry(_)), "got {err:?}");

        let (_, total) = store.list_page(0, 20).await.unwrap();
        assert_eq!(total, 1);
    }

    #[actix_web::test]
    async fn test_duplicate_order_number_is_reported_as_duplicate() {
        let store = SeaOrmEntryStore::new(memory_pool().await);
        store.insert(new_entry(1)).await.unwrap();

        let mut dup = new_entry(2);
        dup.order_number = "1001".to_string();
        let err = store.insert(dup).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEntry(_)), "got {err:?}");
    }

    #[actix_web::test]
    async fn test_list_page_is_newest_first_and_offset_based() {
        let store = SeaOrmEntryStore::new(memory_pool().await);
        for n in 1..=45 {
            store.insert(new_entry(n)).await.unwrap();
        }

        let (first, total) = store.list_page(0, 20).await.unwrap();
        assert_eq!(total, 45);
        assert_eq!(first.len(), 20);
        assert_eq!(first[0].email, "player45@example.com");

        // 第二页: 第 21-40 新的记录
        let (second, _) = store.list_page(20, 20).await.unwrap();
        assert_eq!(second.len(), 20);
        assert_eq!(second[0].email, "player25@example.com");
        assert_eq!(second[19].email, "player6@example.com");
        assert!(
            second
                .windows(2)
                .all(|w| w[0].entry_date >= w[1].entry_date)
        );

        let (third, _) = store.list_page(40, 20).await.unwrap();
        assert_eq!(third.len(), 5);

        let (beyond, total) = store.list_page(120, 20).await.unwrap();
        assert!(beyond.is_empty());
        assert_eq!(total, 45);
    }

    #[actix_web::test]
    async fn test_list_page_with_offset_beyond_i64_is_empty() {
        let store = SeaOrmEntryStore::new(memory_pool().await);
        store.insert(new_entry(1)).await.unwrap();

        let (items, total) = store.list_page(u64::MAX, 20).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 1);

        let (items, _) = store.list_page(0, u64::MAX).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[actix_web::test]
    async fn test_list_all_is_newest_first() {
        let store = SeaOrmEntryStore::new(memory_pool().await);
        store.insert(new_entry(2)).await.unwrap();
        store.insert(new_entry(3)).await.unwrap();
        store.insert(new_entry(1)).await.unwrap();

        let all = store.list_all().await.unwrap();
        let orders: Vec<&str> = all.iter().map(|e| e.order_number.as_str()).collect();
        assert_eq!(orders, vec!["1003", "1002", "1001"]);
    }
}
