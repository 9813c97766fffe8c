use catalog_common::{CatalogEntry, FilterCriteria};
use std::collections::HashSet;

use crate::error::{CatalogError, Result};

/// 目录视图 - 持有全部图书、当前筛选结果和页码
///
/// 筛选结果以 `entries` 中的下标保存，下标递增，因此结果始终保持原始顺序。
/// 页码从 1 开始，只能通过 `advance_page` 前进，`search` 会把它重置为 1。
#[derive(Debug, Clone)]
pub struct CatalogView {
    entries: Vec<CatalogEntry>,
    page_size: usize,
    matches: Vec<usize>,
    current_page: usize,
}

impl CatalogView {
    /// 创建视图，初始筛选结果为全部图书
    pub fn new(entries: Vec<CatalogEntry>, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(CatalogError::InvalidPageSize);
        }

        if let Some(id) = first_duplicate_id(&entries) {
            return Err(CatalogError::DuplicateId(id));
        }

        let matches = (0..entries.len()).collect();
        Ok(Self {
            entries,
            page_size,
            matches,
            current_page: 1,
        })
    }

    /// 重新筛选并回到第一页，返回新的筛选结果
    pub fn search(&mut self, criteria: &FilterCriteria) -> Vec<&CatalogEntry> {
        self.matches = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.matches_filter(criteria))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;

        log::debug!(
            "筛选完成: {:?}，匹配 {} / {} 本",
            criteria,
            self.matches.len(),
            self.entries.len()
        );

        self.matches()
    }

    /// 当前页的图书，越界时返回剩余部分或空列表
    pub fn current_page(&self) -> Vec<&CatalogEntry> {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        self.collect_range(start, self.page_end())
    }

    /// 当前页之后尚未展示的数量
    pub fn remaining_count(&self) -> usize {
        self.matches.len().saturating_sub(self.page_end())
    }

    /// 还有剩余时前进一页并返回 true，否则不变并返回 false
    pub fn advance_page(&mut self) -> bool {
        if self.remaining_count() == 0 {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// 第 1 页到当前页已经展示的数量
    pub fn shown_count(&self) -> usize {
        self.page_end().min(self.matches.len())
    }

    /// 第 1 页到当前页已经展示的图书
    pub fn shown(&self) -> Vec<&CatalogEntry> {
        self.collect_range(0, self.page_end())
    }

    pub fn matches(&self) -> Vec<&CatalogEntry> {
        self.matches.iter().map(|&i| &self.entries[i]).collect()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn page_number(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// 按 ID 查找图书，不受当前筛选条件影响
    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    fn page_end(&self) -> usize {
        self.current_page.saturating_mul(self.page_size)
    }

    fn collect_range(&self, start: usize, end: usize) -> Vec<&CatalogEntry> {
        let end = end.min(self.matches.len());
        if start >= end {
            return Vec::new();
        }
        self.matches[start..end]
            .iter()
            .map(|&i| &self.entries[i])
            .collect()
    }
}

fn first_duplicate_id(entries: &[CatalogEntry]) -> Option<String> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .iter()
        .find(|entry| !seen.insert(entry.id()))
        .map(|entry| entry.id().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_common::{RawDate, RawEntry, ANY};
    use pretty_assertions::assert_eq;

    fn entry(id: &str, title: &str, author: &str, genres: &[&str]) -> CatalogEntry {
        CatalogEntry::from_raw(RawEntry {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            image: String::new(),
            description: String::new(),
            published: RawDate::Text("2020-01-01".to_string()),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        })
    }

    fn ids(entries: &[&CatalogEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id().to_string()).collect()
    }

    fn numbered(count: usize) -> Vec<CatalogEntry> {
        (0..count)
            .map(|i| entry(&i.to_string(), &format!("Book {}", i), "a1", &["g1"]))
            .collect()
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = CatalogView::new(numbered(3), 0).unwrap_err();
        assert_eq!(err, CatalogError::InvalidPageSize);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let entries = vec![entry("1", "A", "a1", &[]), entry("1", "B", "a2", &[])];
        let err = CatalogView::new(entries, 5).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("1".to_string()));
    }

    #[test]
    fn starts_with_all_entries_on_page_one() {
        let view = CatalogView::new(numbered(5), 2).unwrap();
        assert_eq!(view.page_number(), 1);
        assert_eq!(view.match_count(), 5);
        assert_eq!(ids(&view.current_page()), vec!["0", "1"]);
        assert_eq!(view.remaining_count(), 3);
    }

    #[test]
    fn last_page_is_clamped() {
        let mut view = CatalogView::new(numbered(5), 2).unwrap();
        assert!(view.advance_page());
        assert!(view.advance_page());
        assert_eq!(ids(&view.current_page()), vec!["4"]);
        assert_eq!(view.remaining_count(), 0);
        assert!(!view.advance_page());
        assert_eq!(view.page_number(), 3);
        assert_eq!(ids(&view.current_page()), vec!["4"]);
    }

    #[test]
    fn shown_tracks_everything_up_to_current_page() {
        let mut view = CatalogView::new(numbered(5), 2).unwrap();
        view.advance_page();
        assert_eq!(view.shown_count(), 4);
        assert_eq!(ids(&view.shown()), vec!["0", "1", "2", "3"]);
        view.advance_page();
        assert_eq!(view.shown_count(), 5);
    }

    #[test]
    fn empty_catalog_has_empty_page() {
        let mut view = CatalogView::new(Vec::new(), 3).unwrap();
        assert!(view.current_page().is_empty());
        assert_eq!(view.remaining_count(), 0);
        assert!(!view.advance_page());
    }

    #[test]
    fn search_without_matches_is_not_an_error() {
        let mut view = CatalogView::new(numbered(4), 2).unwrap();
        let criteria = FilterCriteria {
            title: "nothing like this".to_string(),
            ..FilterCriteria::any()
        };
        assert!(view.search(&criteria).is_empty());
        assert!(view.current_page().is_empty());
        assert_eq!(view.remaining_count(), 0);
        assert!(!view.advance_page());
    }

    #[test]
    fn unknown_sentinel_matches_nothing() {
        let mut view = CatalogView::new(numbered(4), 2).unwrap();
        let criteria = FilterCriteria {
            author: "all".to_string(),
            ..FilterCriteria::any()
        };
        assert!(view.search(&criteria).is_empty());
    }

    #[test]
    fn find_ignores_current_filter() {
        let mut view = CatalogView::new(
            vec![entry("1", "Go Fish", "a1", &["g1"]), entry("2", "Rust Primer", "a2", &["g2"])],
            1,
        )
        .unwrap();
        let criteria = FilterCriteria {
            genre: "g1".to_string(),
            author: ANY.to_string(),
            title: String::new(),
        };
        view.search(&criteria);
        assert_eq!(view.find("2").map(|e| e.title()), Some("Rust Primer"));
        assert!(view.find("3").is_none());
    }
}
