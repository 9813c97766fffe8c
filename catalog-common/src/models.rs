use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// 通配筛选值 - 表示该字段不做限制
pub const ANY: &str = "any";

/// 原始发布日期 - 日期字符串或毫秒时间戳
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum RawDate {
    /// 日期字符串，例如 "1996-06-13T00:00:00.000Z"
    Text(String),
    /// 自 Unix 纪元起的毫秒数
    Timestamp(f64),
}

impl RawDate {
    /// 解析日期，无法解析时返回 None 而不是报错
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        match self {
            RawDate::Text(text) => parse_date_text(text),
            RawDate::Timestamp(millis) => {
                if !millis.is_finite() {
                    return None;
                }
                DateTime::<Utc>::from_timestamp_millis(*millis as i64)
            }
        }
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 原始图书记录 - 与界面数据集的字段名保持一致
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RawEntry {
    pub id: String,
    pub title: String,
    /// 作者ID
    pub author: String,
    /// 封面图片URL
    pub image: String,
    pub description: String,
    pub published: RawDate,
    /// 分类ID列表
    #[serde(default)]
    pub genres: Vec<String>,
}

/// 图书条目 - 构造后不可修改
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    id: String,
    title: String,
    author_id: String,
    image_url: String,
    description: String,
    /// 发布日期，原始值无法解析时为 None
    published: Option<DateTime<Utc>>,
    genre_ids: Vec<String>,
}

impl CatalogEntry {
    /// 从原始记录构建条目，日期只在这里解析一次
    pub fn from_raw(raw: RawEntry) -> Self {
        let published = raw.published.parse();
        if published.is_none() {
            log::debug!("图书 {} 的发布日期无法解析: {:?}", raw.id, raw.published);
        }

        Self {
            id: raw.id,
            title: raw.title,
            author_id: raw.author,
            image_url: raw.image,
            description: raw.description,
            published,
            genre_ids: raw.genres,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published
    }

    /// 发布年份，日期无效时为 None
    pub fn published_year(&self) -> Option<i32> {
        self.published.map(|date| date.year())
    }

    pub fn genre_ids(&self) -> &[String] {
        &self.genre_ids
    }

    /// 判断条目是否满足筛选条件 - 标题、作者、分类三者同时满足
    pub fn matches_filter(&self, criteria: &FilterCriteria) -> bool {
        self.matches_title(&criteria.title)
            && self.matches_author(&criteria.author)
            && self.matches_genre(&criteria.genre)
    }

    fn matches_title(&self, title: &str) -> bool {
        if title.trim().is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&title.to_lowercase())
    }

    fn matches_author(&self, author: &str) -> bool {
        author == ANY || self.author_id == author
    }

    fn matches_genre(&self, genre: &str) -> bool {
        genre == ANY || self.genre_ids.iter().any(|id| id == genre)
    }
}

impl From<RawEntry> for CatalogEntry {
    fn from(raw: RawEntry) -> Self {
        Self::from_raw(raw)
    }
}

/// 筛选条件 - 来自筛选表单的 标题/作者/分类 三元组
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct FilterCriteria {
    /// 标题关键词，空白时匹配所有
    pub title: String,
    /// 作者ID，"any" 匹配所有
    #[serde(alias = "authorId")]
    pub author: String,
    /// 分类ID，"any" 匹配所有
    #[serde(alias = "genreId")]
    pub genre: String,
}

impl FilterCriteria {
    /// 不做任何限制的筛选条件
    pub fn any() -> Self {
        Self {
            title: String::new(),
            author: ANY.to_string(),
            genre: ANY.to_string(),
        }
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::any()
    }
}
