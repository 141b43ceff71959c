//! Folder scanning and categorization behind `GET /scan`.
//!
//! A scan walks one folder recursively and turns every regular file into a
//! [`FileRecord`]. Category filtering, sorting and pagination happen on the
//! scanned set in [`list_page`], so one scan can serve many page requests
//! (see [`cache::ScanCache`]).

pub mod cache;

use std::cmp::Ordering;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

use crate::types::{Category, CategoryFilter, FileRecord, SortKey};

/// Extension table, checked in order. Extensions are lower-case with their dot.
const CATEGORY_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Code,
        &[
            ".py", ".js", ".jsx", ".ts", ".tsx", ".html", ".css", ".cpp", ".c", ".java", ".json", ".sql",
            ".sh", ".asm", ".lua", ".rbxs",
        ],
    ),
    (
        Category::Documents,
        &[".pdf", ".docx", ".doc", ".txt", ".md", ".xlsx", ".xls", ".csv", ".pptx", ".ppt", ".epub"],
    ),
    (Category::Images, &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".heic", ".bmp", ".ico"]),
    (Category::Video, &[".mov", ".mp4", ".mkv", ".avi", ".webm"]),
    (Category::Audio, &[".mp3", ".wav", ".flac", ".m4a", ".aac"]),
    (Category::Archives, &[".zip", ".tar", ".gz", ".rar", ".7z", ".dmg", ".pkg", ".iso"]),
    (Category::Models3d, &[".fbx", ".obj", ".stl", ".blend", ".rbxl", ".rbxm"]),
];

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub include_hidden: bool,
    pub excludes: Vec<String>,
}

pub fn category_for_extension(extension: &str) -> Category {
    let ext = extension.to_lowercase();
    CATEGORY_TABLE
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Others)
}

/// Lower-cased suffix including the dot, or `""`. Leading-dot names such as
/// `.bashrc` have no extension.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Walks `root` and returns one record per readable regular file.
///
/// Entries that cannot be read are skipped; a missing root yields an empty set.
pub fn scan_folder(root: &Path, options: &ScanOptions) -> anyhow::Result<Vec<FileRecord>> {
    let excludes = build_globset(&options.excludes)?;
    let mut records = Vec::new();
    if !root.exists() {
        return Ok(records);
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || ((options.include_hidden || !is_hidden(e)) && !matches_excludes(e.path(), &excludes)));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("entry skipped: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let meta = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("metadata unavailable for {}: {}", entry.path().display(), e);
                continue;
            }
        };
        let extension = extension_of(entry.path());
        records.push(FileRecord {
            name: entry.file_name().to_string_lossy().to_string(),
            path: entry.path().to_string_lossy().to_string(),
            category: category_for_extension(&extension),
            extension,
            size_bytes: meta.len(),
            created_at: unix_seconds(meta.created().or_else(|_| meta.modified()).ok()),
        });
    }

    Ok(records)
}

/// Filters `records` by category, sorts them and returns `[offset, offset + limit)`.
pub fn list_page(
    records: &[FileRecord],
    sort_by: SortKey,
    category: CategoryFilter,
    limit: usize,
    offset: usize,
) -> Vec<FileRecord> {
    let mut selected: Vec<&FileRecord> = records.iter().filter(|r| category.matches(r.category)).collect();
    selected.sort_by(|a, b| compare(a, b, sort_by));
    selected.into_iter().skip(offset).take(limit).cloned().collect()
}

fn compare(a: &FileRecord, b: &FileRecord, sort_by: SortKey) -> Ordering {
    match sort_by {
        SortKey::Size => b.size_bytes.cmp(&a.size_bytes),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Date => b.created_at.cmp(&a.created_at),
    }
}

fn unix_seconds(time: Option<SystemTime>) -> i64 {
    time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Compiles one exclude pattern. Patterns are trimmed and backslashes become
/// `/` so Windows-style patterns match the normalized paths. Blank patterns
/// yield `None`.
pub fn exclude_glob(pattern: &str) -> Result<Option<Glob>, globset::Error> {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Glob::new(&trimmed.replace('\\', "/")).map(Some)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        if let Some(glob) = exclude_glob(p)? {
            b.add(glob);
        }
    }
    Ok(b.build()?)
}

fn matches_excludes(path: &Path, set: &GlobSet) -> bool {
    if set.is_empty() {
        return false;
    }
    let s = path.to_string_lossy().replace('\\', "/");
    set.is_match(&s)
}
