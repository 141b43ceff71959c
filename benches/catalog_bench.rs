use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fileglass::catalog::{category_for_extension, list_page, scan_folder, ScanOptions};
use fileglass::types::{CategoryFilter, Category, FileRecord, SortKey};
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::TempDir;

const EXTENSIONS: [&str; 6] = [".txt", ".png", ".mp4", ".zip", ".py", ".bin"];

fn create_test_tree(depth: usize, files_per_dir: usize, dirs_per_level: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    fn create_level(path: &Path, current_depth: usize, max_depth: usize, files_per_dir: usize, dirs_per_level: usize) {
        if current_depth >= max_depth {
            return;
        }

        for i in 0..files_per_dir {
            let ext = EXTENSIONS[i % EXTENSIONS.len()];
            fs::write(path.join(format!("file_{}{}", i, ext)), vec![b'x'; i]).unwrap();
        }

        for i in 0..dirs_per_level {
            let dir_path = path.join(format!("dir_{}", i));
            fs::create_dir(&dir_path).unwrap();
            create_level(&dir_path, current_depth + 1, max_depth, files_per_dir, dirs_per_level);
        }
    }

    create_level(temp_dir.path(), 0, depth, files_per_dir, dirs_per_level);
    temp_dir
}

fn synthetic_records(n: usize) -> Vec<FileRecord> {
    (0..n)
        .map(|i| {
            let ext = EXTENSIONS[i % EXTENSIONS.len()];
            let name = format!("File_{:06}{}", (i * 7919) % n, ext);
            FileRecord {
                path: format!("/home/bench/Downloads/{}", name),
                name,
                extension: ext.to_string(),
                category: category_for_extension(ext),
                size_bytes: ((i * 104_729) % 1_000_000) as u64,
                created_at: 1_600_000_000 + ((i * 31) % 100_000) as i64,
            }
        })
        .collect()
}

fn benchmark_scan_folder(c: &mut Criterion) {
    let temp_dir = create_test_tree(3, 20, 3);
    let mut group = c.benchmark_group("scan_folder");

    group.bench_function("no_excludes", |b| {
        let options = ScanOptions { include_hidden: true, excludes: vec![] };
        b.iter(|| black_box(scan_folder(temp_dir.path(), &options).unwrap()))
    });

    group.bench_function("with_excludes", |b| {
        let options = ScanOptions { include_hidden: false, excludes: vec!["**/dir_1".to_string(), "**/*.bin".to_string()] };
        b.iter(|| black_box(scan_folder(temp_dir.path(), &options).unwrap()))
    });
    group.finish();
}

fn benchmark_list_page(c: &mut Criterion) {
    let records = synthetic_records(20_000);
    let mut group = c.benchmark_group("list_page");

    for sort_by in [SortKey::Date, SortKey::Name, SortKey::Size] {
        group.bench_with_input(BenchmarkId::new("all", sort_by), &sort_by, |b, &sort_by| {
            b.iter(|| black_box(list_page(&records, sort_by, CategoryFilter::All, 50, 1_000)))
        });
    }
    group.bench_function("images_by_size", |b| {
        b.iter(|| black_box(list_page(&records, SortKey::Size, CategoryFilter::Only(Category::Images), 50, 0)))
    });
    group.finish();
}

criterion_group!(benches, benchmark_scan_folder, benchmark_list_page);
criterion_main!(benches);
