//! 源目录扫描 - 业务能力层
//!
//! 扫描模式固定为 `<source>/*/*<suffix>`：源目录下每个文档一个子目录，
//! 只取子目录中直接包含的文件。以 `.` 开头的目录和文件（`._*`、
//! `.ipynb_checkpoints/` 等）与 shell glob 一样被忽略。

use crate::error::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// 扫描源目录中所有以 `suffix` 结尾的文档文件
///
/// # 参数
/// - `source_dir`: 源阶段目录
/// - `suffix`: 文件名后缀（如 `.tei.xml`）
///
/// # 返回
/// 按路径排序的文件列表
pub fn scan_document_files(source_dir: &Path, suffix: &str) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for doc_dir in sorted_entries(source_dir)? {
        if is_hidden(&doc_dir) || !doc_dir.is_dir() {
            continue;
        }
        for path in sorted_entries(&doc_dir)? {
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.ends_with(suffix));
            if matches && !is_hidden(&path) && path.is_file() {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// 多个源目录依次扫描后拼接
pub fn scan_all(source_dirs: &[PathBuf], suffix: &str) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in source_dirs {
        files.extend(scan_document_files(dir, suffix)?);
    }
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// 读取目录并按路径排序
pub(crate) fn sorted_entries(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| AppError::read_dir_failed(dir, e))?;
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::read_dir_failed(dir, e))?;
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_scan_only_one_level_deep() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("doc1/a.training.header.tei.xml"));
        touch(&root.join("doc2/b.training.funding.tei.xml"));
        touch(&root.join("doc2/b.training.funding"));
        touch(&root.join("top.training.header.tei.xml"));
        touch(&root.join("doc3/nested/c.training.header.tei.xml"));

        let files = scan_document_files(root, ".tei.xml").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["a.training.header.tei.xml", "b.training.funding.tei.xml"]
        );
    }

    #[test]
    fn test_scan_skips_directories_with_matching_names() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("doc1/fake.segmentation")).unwrap();
        touch(&dir.path().join("doc1/real.segmentation"));

        let files = scan_document_files(dir.path(), ".segmentation").unwrap();
        assert_eq!(files, vec![dir.path().join("doc1/real.segmentation")]);
    }

    #[test]
    fn test_scan_ignores_hidden_entries() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("a/a.training.funding.tei.xml"));
        touch(&root.join("a/._a.training.funding.tei.xml"));
        touch(&root.join("a/._a.segmentation"));
        touch(&root.join(".ipynb_checkpoints/b.training.header.tei.xml"));

        let files = scan_document_files(root, ".tei.xml").unwrap();
        assert_eq!(files, vec![root.join("a/a.training.funding.tei.xml")]);
        assert!(scan_document_files(root, ".segmentation").unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let dir = TempDir::new().unwrap();
        let result = scan_document_files(&dir.path().join("missing"), ".tei.xml");
        assert!(result.is_err());
    }
}
