// src/api/dto/common.rs
use serde::{Deserialize, Serialize};

/// ページネーション情報
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total_items.div_ceil(per_page)
        };

        Self {
            page,
            per_page,
            total_pages,
            total_items,
        }
    }
}
