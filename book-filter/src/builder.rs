use catalog_common::{CatalogEntry, RawEntry};

use crate::error::Result;
use crate::view::CatalogView;

/// 目录构建器
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
}

impl CatalogBuilder {
    /// 创建新的目录构建器
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 从原始记录列表创建构建器
    pub fn from_raw_entries(raw_entries: impl IntoIterator<Item = RawEntry>) -> Self {
        let mut builder = Self::new();
        for raw in raw_entries {
            builder.add_raw(raw);
        }
        builder
    }

    /// 添加图书
    pub fn add_entry(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }

    /// 添加原始记录
    pub fn add_raw(&mut self, raw: RawEntry) {
        self.add_entry(CatalogEntry::from_raw(raw));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 构建目录视图
    pub fn build(self, page_size: usize) -> Result<CatalogView> {
        if self.entries.is_empty() {
            log::warn!("目录为空，所有筛选结果都将为空");
        }

        let count = self.entries.len();
        let invalid_dates = self
            .entries
            .iter()
            .filter(|entry| entry.published().is_none())
            .count();

        let view = CatalogView::new(self.entries, page_size)?;
        log::info!(
            "目录构建完成，图书数量: {}，每页: {}，无效日期: {}",
            count,
            page_size,
            invalid_dates
        );
        Ok(view)
    }
}
