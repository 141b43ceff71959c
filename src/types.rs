use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Broad classification of a file, decided by the listing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Documents,
    Code,
    Images,
    Video,
    Audio,
    Archives,
    #[serde(rename = "3D Models")]
    Models3d,
    Others,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Documents,
        Category::Code,
        Category::Images,
        Category::Video,
        Category::Audio,
        Category::Archives,
        Category::Models3d,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Documents => "Documents",
            Category::Code => "Code",
            Category::Images => "Images",
            Category::Video => "Video",
            Category::Audio => "Audio",
            Category::Archives => "Archives",
            Category::Models3d => "3D Models",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownValue::new("category", s))
    }
}

/// One of the browsable home folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Folder {
    Desktop,
    Documents,
    Downloads,
}

impl Folder {
    pub const ALL: [Folder; 3] = [Folder::Desktop, Folder::Documents, Folder::Downloads];

    pub fn as_str(&self) -> &'static str {
        match self {
            Folder::Desktop => "Desktop",
            Folder::Documents => "Documents",
            Folder::Downloads => "Downloads",
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Folder {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Folder::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownValue::new("folder", s))
    }
}

/// Server-side sort order of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Size,
    Date,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::Date => "date",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "size" => Ok(SortKey::Size),
            "date" => Ok(SortKey::Date),
            other => Err(UnknownValue::new("sort_by", other)),
        }
    }
}

/// Category selector of a query: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Client-only extension filter. [`SubCategory::extension`] lower-cases its
/// input; matching ignores case either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SubCategory {
    #[default]
    All,
    Extension(String),
}

impl SubCategory {
    pub fn extension(ext: &str) -> Self {
        SubCategory::Extension(ext.to_lowercase())
    }

    pub fn matches(&self, extension: &str) -> bool {
        match self {
            SubCategory::All => true,
            SubCategory::Extension(wanted) => extension.to_lowercase() == wanted.to_lowercase(),
        }
    }
}

/// The server-side parameters of a listing. Changing any of them invalidates
/// everything loaded so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryParameters {
    pub folder: Folder,
    pub sort_by: SortKey,
    pub category: CategoryFilter,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self { folder: Folder::Downloads, sort_by: SortKey::Date, category: CategoryFilter::All }
    }
}

/// One file as reported by `GET /scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub path: String,
    pub extension: String,
    pub category: Category,
    pub size_bytes: u64,
    /// Unix seconds. Fractional timestamps are truncated on decode.
    #[serde(deserialize_with = "unix_seconds")]
    pub created_at: i64,
}

fn unix_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Ok(secs.trunc() as i64)
}

/// Body of `POST /open` and `POST /delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAction {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub status: String,
    pub path: String,
}

impl ActionResponse {
    pub fn new(status: &str, path: impl Into<String>) -> Self {
        Self { status: status.to_string(), path: path.into() }
    }
}

/// A query value outside its fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field}: {value:?}")]
pub struct UnknownValue {
    pub field: &'static str,
    pub value: String,
}

impl UnknownValue {
    fn new(field: &'static str, value: &str) -> Self {
        Self { field, value: value.to_string() }
    }
}
