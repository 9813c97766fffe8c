pub mod directory;
pub mod models;
pub mod theme;

// 重新导出常用类型，方便直接使用
pub use directory::{Directory, DirectoryItem, DirectoryOption};
pub use models::{CatalogEntry, FilterCriteria, RawDate, RawEntry, ANY};
pub use theme::{Theme, ThemeColors};
