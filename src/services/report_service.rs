use crate::database::EntryStore;
use crate::error::AppResult;
use crate::models::{
    EntryListQuery, EntryPageResponse, EntryResponse, PaginatedResponse, PaginationParams,
};
use crate::utils::csv_row;
use chrono::NaiveDate;
use std::sync::Arc;

pub const CSV_HEADER: [&str; 5] = ["Name", "Email", "Order Number", "Entry Date", "Status"];

/// 导出文件名: ps5_giveaway_entries_<YYYY-MM-DD>.csv
pub fn export_filename(date: NaiveDate) -> String {
    format!("ps5_giveaway_entries_{}.csv", date.format("%Y-%m-%d"))
}

/// 后台列表与 CSV 导出 (只读)
#[derive(Clone)]
pub struct ReportService {
    entries: Arc<dyn EntryStore>,
    page_size: u64,
}

impl ReportService {
    pub fn new(entries: Arc<dyn EntryStore>, page_size: u64) -> Self {
        Self {
            entries,
            page_size: page_size.max(1),
        }
    }

    /// 分页获取参与记录 (entry_date 倒序)
    pub async fn list_entries(&self, query: &EntryListQuery) -> AppResult<EntryPageResponse> {
        let params = PaginationParams::new(query.page(), self.page_size);
        let (items, total) = self
            .entries
            .list_page(params.get_offset(), params.get_limit())
            .await?;

        let items: Vec<EntryResponse> = items.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(
            items,
            params.page,
            params.page_size,
            total,
        ))
    }

    /// 导出全部参与记录为 CSV
    pub async fn export_csv(&self) -> AppResult<String> {
        let entries = self.entries.list_all().await?;

        let mut csv = csv_row(CSV_HEADER);
        for entry in &entries {
            let entry_date = entry.entry_date.format("%Y-%m-%d %H:%M:%S").to_string();
            let status = entry.status.to_string();
            csv.push_str(&csv_row([
                entry.name.as_str(),
                entry.email.as_str(),
                entry.order_number.as_str(),
                entry_date.as_str(),
                status.as_str(),
            ]));
        }

        log::info!("Exported {} giveaway entries", entries.len());
        Ok(csv)
    }
}
