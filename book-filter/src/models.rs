use catalog_common::{CatalogEntry, Directory};
use serde::Serialize;

use crate::view::CatalogView;

/// 列表预览 - 图书卡片展示所需信息
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntryPreview {
    pub id: String,
    pub title: String,
    pub image: String,
    /// 作者名称，目录中没有该作者时为空
    pub author_name: Option<String>,
}

impl EntryPreview {
    pub fn new(entry: &CatalogEntry, authors: &Directory) -> Self {
        Self {
            id: entry.id().to_string(),
            title: entry.title().to_string(),
            image: entry.image_url().to_string(),
            author_name: authors.name_of(entry.author_id()).map(str::to_string),
        }
    }
}

/// 详情 - 详情弹层展示所需信息
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntryDetail {
    pub id: String,
    pub title: String,
    pub image: String,
    pub description: String,
    pub author_name: Option<String>,
    /// 发布年份，日期无效时为空
    pub published_year: Option<i32>,
    /// 分类名称，跳过目录中不存在的分类
    pub genre_names: Vec<String>,
}

impl EntryDetail {
    pub fn new(entry: &CatalogEntry, authors: &Directory, genres: &Directory) -> Self {
        Self {
            id: entry.id().to_string(),
            title: entry.title().to_string(),
            image: entry.image_url().to_string(),
            description: entry.description().to_string(),
            author_name: authors.name_of(entry.author_id()).map(str::to_string),
            published_year: entry.published_year(),
            genre_names: entry
                .genre_ids()
                .iter()
                .filter_map(|id| genres.name_of(id))
                .map(str::to_string)
                .collect(),
        }
    }
}

/// 分页结果 - 返回给客户端的当前页
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PageResult {
    /// 当前页的图书
    pub entries: Vec<EntryPreview>,
    /// 当前页码
    pub page: usize,
    /// 每页条数
    pub page_size: usize,
    /// 筛选结果总数
    pub total: usize,
    /// 截至当前页已展示的数量
    pub shown: usize,
    /// 尚未展示的数量
    pub remaining: usize,
}

impl PageResult {
    pub fn from_view(view: &CatalogView, authors: &Directory) -> Self {
        Self {
            entries: view
                .current_page()
                .into_iter()
                .map(|entry| EntryPreview::new(entry, authors))
                .collect(),
            page: view.page_number(),
            page_size: view.page_size(),
            total: view.match_count(),
            shown: view.shown_count(),
            remaining: view.remaining_count(),
        }
    }
}
