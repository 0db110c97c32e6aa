// src/pagination.rs
use std::collections::BTreeSet;

use crate::models::Paginator;

/// Element paska stron: numer strony albo przerwa ("...").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u64),
    Gap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub current_page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub items: Vec<PageItem>,
}

impl PageLinks {
    /// `page_index` odtworzony z kursorów odpowiada numerowi bieżącej strony,
    /// a 0 (brak kursorów) traktujemy jak pierwszą stronę.
    pub fn from_paginator(paginator: &Paginator) -> Self {
        let total_pages = paginator.total_pages();
        let current_page = paginator.page_index.max(1).min(total_pages.max(1));

        // Tylko strony, które mogą trafić na pasek: pierwsza, ostatnia i okno wokół bieżącej
        let mut candidates = BTreeSet::new();
        if total_pages > 0 {
            candidates.insert(1);
            candidates.insert(total_pages);
            let window_start = current_page.saturating_sub(3).max(1);
            let window_end = current_page.saturating_add(3).min(total_pages);
            candidates.extend(window_start..=window_end);
        }

        let mut items = Vec::new();
        for page_num in candidates {
            if page_num == 1
                || page_num == total_pages
                || page_num.abs_diff(current_page) <= 2
            {
                items.push(PageItem::Page(page_num));
            } else if page_num.abs_diff(current_page) == 3 {
                items.push(PageItem::Gap);
            }
        }

        Self {
            current_page,
            total_pages,
            page_size: paginator.page_size,
            items,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Offset pierwszego wiersza danej strony.
    pub fn offset_of(&self, page_num: u64) -> u64 {
        page_num.saturating_sub(1).saturating_mul(self.page_size)
    }
}
