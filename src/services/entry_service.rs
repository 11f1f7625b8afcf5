use crate::database::{EntryStore, NewEntry};
use crate::entities::EntryStatus;
use crate::error::{AppError, AppResult};
use crate::models::{Eligibility, Rejection, SubmissionOutcome};
use crate::services::EligibilityService;
use crate::utils::{is_valid_email, sanitize_email, sanitize_text_field};
use chrono::Utc;
use std::sync::Arc;

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 100;
const MAX_ORDER_NUMBER_LEN: usize = 50;

/// 清理并校验后的提交内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSubmission {
    pub name: String,
    pub email: String,
    pub order_number: String,
}

impl SanitizedSubmission {
    pub fn parse(name: &str, email: &str, order_number: &str) -> Result<Self, Rejection> {
        let name = sanitize_text_field(name);
        let email = sanitize_email(email);
        let order_number = sanitize_text_field(order_number);

        if name.is_empty() {
            return Err(Rejection::InvalidInput("Name is required".into()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(Rejection::InvalidInput("Name is too long".into()));
        }
        if email.chars().count() > MAX_EMAIL_LEN || !is_valid_email(&email) {
            return Err(Rejection::InvalidInput("Invalid email address".into()));
        }
        if order_number.is_empty() {
            return Err(Rejection::InvalidInput("Order number is required".into()));
        }
        if order_number.chars().count() > MAX_ORDER_NUMBER_LEN {
            return Err(Rejection::InvalidInput("Order number is too long".into()));
        }

        Ok(Self {
            name,
            email,
            order_number,
        })
    }
}

#[derive(Clone)]
pub struct EntryService {
    entries: Arc<dyn EntryStore>,
    eligibility: EligibilityService,
    revalidate_on_submit: bool,
}

impl EntryService {
    pub fn new(
        entries: Arc<dyn EntryStore>,
        eligibility: EligibilityService,
        revalidate_on_submit: bool,
    ) -> Self {
        Self {
            entries,
            eligibility,
            revalidate_on_submit,
        }
    }

    /// 提交抽奖参与记录 (status = pending)
    ///
    /// 重复参与不在这里预查, 由 email / order_number 唯一索引原子地拦截;
    /// 并发提交时失败的一方得到 `SubmissionOutcome::Duplicate`。
    /// 仅订单复查时商城不可用才返回 `Err`。
    pub async fn submit(
        &self,
        name: &str,
        email: &str,
        order_number: &str,
    ) -> AppResult<SubmissionOutcome> {
        let submission = match SanitizedSubmission::parse(name, email, order_number) {
            Ok(s) => s,
            Err(rejection) => return Ok(SubmissionOutcome::Rejected(rejection)),
        };

        if self.revalidate_on_submit
            && let Eligibility::Rejected(rejection) = self
                .eligibility
                .check_order(&submission.order_number)
                .await?
        {
            log::warn!(
                "Rejected submission for order {}: {}",
                submission.order_number,
                rejection.message()
            );
            return Ok(SubmissionOutcome::Rejected(rejection));
        }

        let new_entry = NewEntry {
            name: submission.name,
            email: submission.email,
            order_number: submission.order_number,
            entry_date: Utc::now(),
            status: EntryStatus::Pending,
        };
        let order_number = new_entry.order_number.clone();

        match self.entries.insert(new_entry).await {
            Ok(id) => {
                log::info!("Giveaway entry {id} submitted for order {order_number}");
                Ok(SubmissionOutcome::Submitted { id })
            }
            Err(AppError::DuplicateEntry(detail)) => {
                log::warn!("Duplicate giveaway entry for order {order_number}: {detail}");
                Ok(SubmissionOutcome::Duplicate)
            }
            Err(e) => {
                log::error!("Failed to store giveaway entry for order {order_number}: {e}");
                Ok(SubmissionOutcome::StorageFailure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{SeaOrmEntryStore, memory_pool};
    use crate::models::{Order, SubmissionResponse, ValidationResponse};
    use crate::services::EligibilityCriteria;
    use crate::services::testing::{FakeOrderLookup, InMemoryEntryStore, order};

    fn services(
        orders: Vec<Order>,
        store: Arc<dyn EntryStore>,
        revalidate: bool,
    ) -> (EligibilityService, EntryService) {
        let eligibility = EligibilityService::new(
            Arc::new(FakeOrderLookup::with_orders(orders)),
            store.clone(),
            EligibilityCriteria::default(),
        );
        let entries = EntryService::new(store, eligibility.clone(), revalidate);
        (eligibility, entries)
    }

    #[actix_web::test]
    async fn test_validate_then_submit_then_duplicate() {
        let store = Arc::new(InMemoryEntryStore::default());
        let (eligibility, entries) =
            services(vec![order(1042, "completed", 7500)], store.clone(), true);

        let verdict = eligibility.evaluate("1042", "a@example.com").await.unwrap();
        assert_eq!(
            ValidationResponse::from(&verdict),
            ValidationResponse {
                valid: true,
                message: "Valid entry".into()
            }
        );

        let first = entries.submit("Alice", "a@example.com", "1042").await.unwrap();
        assert_eq!(
            SubmissionResponse::from(&first),
            SubmissionResponse {
                success: true,
                message: "Entry submitted successfully".into()
            }
        );

        let second = entries.submit("Alice", "a@example.com", "1042").await.unwrap();
        assert_eq!(second, SubmissionOutcome::Duplicate);
        assert_eq!(
            SubmissionResponse::from(&second),
            SubmissionResponse {
                success: false,
                message: "Failed to submit entry".into()
            }
        );
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_duplicate_email_different_order_creates_no_row() {
        let store = Arc::new(InMemoryEntryStore::default());
        let (_, entries) = services(
            vec![order(1, "completed", 7500), order(2, "completed", 7500)],
            store.clone(),
            true,
        );
        assert!(entries.submit("Alice", "a@example.com", "1").await.unwrap().is_success());
        let again = entries.submit("Alice B", "A@example.com ", "2").await.unwrap();
        assert_eq!(again, SubmissionOutcome::Duplicate);
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_submission_rechecks_order() {
        let store = Arc::new(InMemoryEntryStore::default());
        let (_, entries) = services(vec![order(7, "refunded", 7500)], store.clone(), true);

        let ineligible = entries.submit("Bob", "b@example.com", "7").await.unwrap();
        assert_eq!(ineligible, SubmissionOutcome::Rejected(Rejection::IneligibleOrder));

        let missing = entries.submit("Bob", "b@example.com", "8").await.unwrap();
        assert_eq!(missing, SubmissionOutcome::Rejected(Rejection::OrderNotFound));
        assert_eq!(store.len(), 0);
    }

    #[actix_web::test]
    async fn test_legacy_mode_trusts_caller() {
        let store = Arc::new(InMemoryEntryStore::default());
        let (_, entries) = services(vec![], store.clone(), false);
        let outcome = entries.submit("Bob", "b@example.com", "404").await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_storage_failure_is_reported_generically() {
        let store = Arc::new(InMemoryEntryStore::default());
        let (_, entries) = services(vec![order(1042, "completed", 7500)], store.clone(), true);
        store.set_broken(true);

        let outcome = entries.submit("Alice", "a@example.com", "1042").await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::StorageFailure);
        assert_eq!(
            SubmissionResponse::from(&outcome).message,
            "Failed to submit entry"
        );
    }

    #[actix_web::test]
    async fn test_input_is_sanitized_before_insert() {
        let store = Arc::new(InMemoryEntryStore::default());
        let (_, entries) = services(vec![order(1042, "completed", 7500)], store.clone(), true);
        entries
            .submit("  Alice \n Smith ", " A@Example.COM", " 1042 ")
            .await
            .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all[0].name, "Alice Smith");
        assert_eq!(all[0].email, "a@example.com");
        assert_eq!(all[0].order_number, "1042");
        assert_eq!(all[0].status, EntryStatus::Pending);
    }

    #[actix_web::test]
    async fn test_invalid_input_is_rejected() {
        let store = Arc::new(InMemoryEntryStore::default());
        let (_, entries) = services(vec![order(1042, "completed", 7500)], store.clone(), true);

        let cases = [
            ("", "a@example.com", "1042", "Name is required"),
            ("Alice", "nope", "1042", "Invalid email address"),
            ("Alice", "a@example.com", " ", "Order number is required"),
        ];
        for (name, email, order_number, expected) in cases {
            let outcome = entries.submit(name, email, order_number).await.unwrap();
            assert_eq!(SubmissionResponse::from(&outcome).message, expected);
        }

        let long_name = "x".repeat(101);
        let outcome = entries
            .submit(&long_name, "a@example.com", "1042")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected(Rejection::InvalidInput("Name is too long".into()))
        );
        assert_eq!(store.len(), 0);
    }

    #[actix_web::test]
    async fn test_lookup_outage_during_recheck_is_an_error() {
        let lookup = Arc::new(FakeOrderLookup::with_orders(vec![order(1, "completed", 7500)]));
        lookup.set_unavailable(true);
        let store = Arc::new(InMemoryEntryStore::default());
        let eligibility =
            EligibilityService::new(lookup, store.clone(), EligibilityCriteria::default());
        let entries = EntryService::new(store, eligibility, true);

        let err = entries.submit("Alice", "a@example.com", "1").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApiError(_)));
    }

    /// 两个请求都通过了 validate, 再同时 submit: 只有一条写入成功
    #[actix_web::test]
    async fn test_concurrent_submissions_for_same_order() {
        let store: Arc<dyn EntryStore> = Arc::new(SeaOrmEntryStore::new(memory_pool().await));
        let (eligibility, entries) = services(vec![order(1042, "completed", 7500)], store, true);

        assert!(eligibility.evaluate("1042", "a@example.com").await.unwrap().is_valid());
        assert!(eligibility.evaluate("1042", "b@example.com").await.unwrap().is_valid());

        let (first, second) = futures_util::future::join(
            entries.submit("Alice", "a@example.com", "1042"),
            entries.submit("Bob", "b@example.com", "1042"),
        )
        .await;
        let outcomes = [first.unwrap(), second.unwrap()];

        assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 1);
        assert!(outcomes.contains(&SubmissionOutcome::Duplicate));
    }
}
