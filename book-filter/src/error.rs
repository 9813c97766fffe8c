use thiserror::Error;

/// 目录构建错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("每页条数必须为正整数")]
    InvalidPageSize,

    #[error("图书ID重复: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
