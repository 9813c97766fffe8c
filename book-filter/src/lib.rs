use wasm_bindgen::prelude::*;
use catalog_common::{Directory, FilterCriteria, RawEntry, Theme};
use web_sys::console;

// 导出模块
pub mod builder;
pub mod error;
pub mod logger;
pub mod models;
pub mod view;

pub use builder::CatalogBuilder;
pub use error::CatalogError;
pub use models::{EntryDetail, EntryPreview, PageResult};
pub use view::CatalogView;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: usize = 36;

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[wasm_bindgen]
pub fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// 获取主题颜色
#[wasm_bindgen]
pub fn theme_colors(name: &str) -> Result<JsValue, JsValue> {
    let theme: Theme = name.parse().map_err(|e: String| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&theme.colors())
        .map_err(|e| JsValue::from_str(&format!("序列化主题失败: {}", e)))
}

/// 切换主题，返回新主题名称
#[wasm_bindgen]
pub fn toggle_theme(name: &str) -> Result<String, JsValue> {
    let theme: Theme = name.parse().map_err(|e: String| JsValue::from_str(&e))?;
    Ok(theme.toggled().as_str().to_string())
}

/// 解析筛选表单传来的 JSON
pub fn parse_criteria(criteria_json: &str) -> Result<FilterCriteria, String> {
    if criteria_json.trim().is_empty() {
        return Ok(FilterCriteria::any());
    }
    serde_json::from_str(criteria_json).map_err(|e| format!("解析筛选条件失败: {}", e))
}

/// 目录浏览器JS接口 - 提供给JavaScript使用的筛选和分页API
#[wasm_bindgen]
pub struct CatalogBrowserJS {
    view: CatalogView,
    authors: Directory,
    genres: Directory,
}

#[wasm_bindgen]
impl CatalogBrowserJS {
    /// 用全部图书创建浏览器
    #[wasm_bindgen(constructor)]
    pub fn new(entries: js_sys::Array, page_size: usize) -> Result<CatalogBrowserJS, JsValue> {
        console_error_panic_hook::set_once();
        logger::init();

        let raw_entries: Vec<RawEntry> = serde_wasm_bindgen::from_value(entries.into())
            .map_err(|e| {
                console::log_1(&JsValue::from_str(&format!("图书数据解析失败: {}", e)));
                JsValue::from_str(&format!("解析图书数据失败: {}", e))
            })?;

        Self::from_raw_entries(raw_entries, page_size).map_err(|e| {
            console::log_1(&JsValue::from_str(&format!("初始化目录失败: {}", e)));
            JsValue::from_str(&e.to_string())
        })
    }

    /// 设置作者目录 ({id: name})
    #[wasm_bindgen]
    pub fn set_authors(&mut self, authors: JsValue) -> Result<(), JsValue> {
        self.set_author_directory(Self::parse_directory(authors, "作者")?);
        Ok(())
    }

    /// 设置分类目录 ({id: name})
    #[wasm_bindgen]
    pub fn set_genres(&mut self, genres: JsValue) -> Result<(), JsValue> {
        self.set_genre_directory(Self::parse_directory(genres, "分类")?);
        Ok(())
    }

    /// 筛选图书并返回第一页
    #[wasm_bindgen]
    pub fn search(&mut self, criteria_json: &str) -> Result<JsValue, JsValue> {
        let result = self.search_json(criteria_json).map_err(|e| JsValue::from_str(&e))?;
        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
    }

    /// 当前页
    #[wasm_bindgen]
    pub fn current_page(&self) -> Result<JsValue, JsValue> {
        self.page_result()
    }

    /// 显示更多 - 前进一页
    #[wasm_bindgen]
    pub fn advance_page(&mut self) -> bool {
        self.view.advance_page()
    }

    /// 尚未展示的数量
    #[wasm_bindgen]
    pub fn remaining_count(&self) -> usize {
        self.view.remaining_count()
    }

    /// 图书详情，找不到时返回 null
    #[wasm_bindgen]
    pub fn detail(&self, id: &str) -> Result<JsValue, JsValue> {
        let Some(detail) = self.find_detail(id) else {
            return Ok(JsValue::NULL);
        };

        serde_wasm_bindgen::to_value(&detail)
            .map_err(|e| JsValue::from_str(&format!("序列化详情失败: {}", e)))
    }

    /// 作者下拉选项
    #[wasm_bindgen]
    pub fn author_options(&self, any_label: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.authors.options(any_label))
            .map_err(|e| JsValue::from_str(&format!("序列化作者选项失败: {}", e)))
    }

    /// 分类下拉选项
    #[wasm_bindgen]
    pub fn genre_options(&self, any_label: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.genres.options(any_label))
            .map_err(|e| JsValue::from_str(&format!("序列化分类选项失败: {}", e)))
    }
}

impl CatalogBrowserJS {
    /// 从原始记录创建浏览器，不经过 JsValue
    pub fn from_raw_entries(raw_entries: Vec<RawEntry>, page_size: usize) -> Result<Self, CatalogError> {
        let view = CatalogBuilder::from_raw_entries(raw_entries).build(page_size)?;
        Ok(Self {
            view,
            authors: Directory::new(),
            genres: Directory::new(),
        })
    }

    pub fn set_author_directory(&mut self, authors: Directory) {
        self.authors = authors;
    }

    pub fn set_genre_directory(&mut self, genres: Directory) {
        self.genres = genres;
    }

    /// 解析筛选条件、重新筛选并返回第一页
    pub fn search_json(&mut self, criteria_json: &str) -> Result<PageResult, String> {
        let criteria = parse_criteria(criteria_json)?;
        self.view.search(&criteria);
        Ok(self.page())
    }

    /// 当前页的分页结果
    pub fn page(&self) -> PageResult {
        PageResult::from_view(&self.view, &self.authors)
    }

    pub fn find_detail(&self, id: &str) -> Option<EntryDetail> {
        self.view
            .find(id)
            .map(|entry| EntryDetail::new(entry, &self.authors, &self.genres))
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    fn page_result(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.page())
            .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
    }

    fn parse_directory(value: JsValue, kind: &str) -> Result<Directory, JsValue> {
        serde_wasm_bindgen::from_value(value).map_err(|e| {
            console::log_1(&JsValue::from_str(&format!("{}目录解析失败: {}", kind, e)));
            JsValue::from_str(&format!("解析{}目录失败: {}", kind, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_common::{RawDate, ANY};

    #[test]
    fn blank_criteria_json_is_identity_filter() {
        assert_eq!(parse_criteria("").unwrap(), FilterCriteria::any());
        assert_eq!(parse_criteria("  ").unwrap(), FilterCriteria::any());
    }

    #[test]
    fn criteria_json_from_form() {
        let criteria = parse_criteria(r#"{"title":"fish","author":"a1","genre":"any"}"#).unwrap();
        assert_eq!(criteria.title, "fish");
        assert_eq!(criteria.author, "a1");
        assert_eq!(criteria.genre, ANY);
    }

    #[test]
    fn malformed_criteria_json_is_reported() {
        let err = parse_criteria("{title:").unwrap_err();
        assert!(err.starts_with("解析筛选条件失败"));
    }

    fn raw(id: &str, title: &str, author: &str, genres: &[&str]) -> RawEntry {
        RawEntry {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            image: String::new(),
            description: format!("About {}", title),
            published: RawDate::Text("1999-12-31".to_string()),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn browser() -> CatalogBrowserJS {
        let entries = vec![
            raw("1", "Go Fish", "a1", &["g1"]),
            raw("2", "Rust Primer", "a2", &["g2"]),
            raw("3", "Deep Sea Fishing", "a1", &["g1", "g2"]),
        ];
        let mut browser = CatalogBrowserJS::from_raw_entries(entries, 1).unwrap();
        browser.set_author_directory([("a1", "Ada"), ("a2", "Grace")].into_iter().collect());
        browser.set_genre_directory([("g1", "Games"), ("g2", "Science")].into_iter().collect());
        browser
    }

    #[test]
    fn search_json_returns_first_page() {
        let mut browser = browser();
        assert!(browser.view.advance_page());

        let result = browser.search_json(r#"{"title":"fish","author":"a1"}"#).unwrap();
        assert_eq!(result.page, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.remaining, 1);
        assert_eq!(result.entries[0].id, "1");
        assert_eq!(result.entries[0].author_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn search_json_rejects_bad_json_without_touching_state() {
        let mut browser = browser();
        assert!(browser.search_json("[").is_err());
        assert_eq!(browser.page().total, 3);
    }

    #[test]
    fn find_detail_resolves_names() {
        let browser = browser();
        let detail = browser.find_detail("3").unwrap();
        assert_eq!(detail.author_name.as_deref(), Some("Ada"));
        assert_eq!(detail.genre_names, vec!["Games", "Science"]);
        assert_eq!(detail.published_year, Some(1999));
        assert!(browser.find_detail("404").is_none());
    }

    #[test]
    fn construction_errors_surface() {
        let err = CatalogBrowserJS::from_raw_entries(vec![raw("1", "A", "a1", &[])], 0)
            .err()
            .unwrap();
        assert_eq!(err, CatalogError::InvalidPageSize);
    }
}
