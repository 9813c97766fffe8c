use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::models::ANY;

/// 名称目录项 - ID 与展示名称
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DirectoryItem {
    pub id: String,
    pub name: String,
}

/// 下拉选项 - 筛选表单使用
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DirectoryOption {
    pub value: String,
    pub label: String,
}

/// 名称目录 - 作者或分类的 ID 到名称映射，保持插入顺序
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Directory {
    items: Vec<DirectoryItem>,
    /// ID 到 items 下标的索引
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加条目，ID 已存在时覆盖名称并保留原位置
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let id = id.into();
        let name = name.into();
        match self.index.get(&id) {
            Some(&position) => self.items[position].name = name,
            None => {
                self.index.insert(id.clone(), self.items.len());
                self.items.push(DirectoryItem { id, name });
            }
        }
    }

    /// 根据 ID 查找名称
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.index
            .get(id)
            .map(|&position| self.items[position].name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectoryItem> {
        self.items.iter()
    }

    /// 生成下拉选项，第一项为通配选项
    pub fn options(&self, any_label: &str) -> Vec<DirectoryOption> {
        let mut options = Vec::with_capacity(self.items.len() + 1);
        options.push(DirectoryOption {
            value: ANY.to_string(),
            label: any_label.to_string(),
        });
        options.extend(self.items.iter().map(|item| DirectoryOption {
            value: item.id.clone(),
            label: item.name.clone(),
        }));
        options
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Directory {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut directory = Directory::new();
        for (id, name) in iter {
            directory.insert(id, name);
        }
        directory
    }
}

struct DirectoryVisitor;

impl<'de> Visitor<'de> for DirectoryVisitor {
    type Value = Directory;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("ID 到名称的映射对象")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut directory = Directory::new();
        while let Some((id, name)) = access.next_entry::<String, String>()? {
            directory.insert(id, name);
        }
        Ok(directory)
    }
}

// 从 {"id": "name"} 对象反序列化，按键出现顺序保存
impl<'de> Deserialize<'de> for Directory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DirectoryVisitor)
    }
}
