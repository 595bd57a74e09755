use crate::error::{FashionError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(FashionError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_image = path
            .extension()
            .map(|ext| is_image_extension(&ext.to_string_lossy()))
            .unwrap_or(false);

        if is_image {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            images.push(ImageInfo {
                path: path.to_path_buf(),
                file_name,
            });
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// Check if a file extension is a supported image format
fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(is_image_extension("Jpeg"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("gif"));
        assert!(!is_image_extension("webp"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(FashionError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_file_instead_of_folder() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.jpg");
        File::create(&file).unwrap();

        let result = scan_folder(&file);
        assert!(matches!(result, Err(FashionError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_with_images() {
        let dir = tempdir().unwrap();

        File::create(dir.path().join("test1.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("test2.JPEG")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("test3.png")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("readme.txt")).unwrap().write_all(b"text").unwrap();
        File::create(dir.path().join("noext")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].file_name, "test1.jpg");
        assert_eq!(result[1].file_name, "test2.JPEG");
        assert_eq!(result[2].file_name, "test3.png");
    }

    #[test]
    fn test_scan_ignores_subfolders() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("inner.jpg")).unwrap();
        File::create(dir.path().join("outer.jpg")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].file_name, "outer.jpg");
    }

    #[test]
    fn test_images_sorted_by_filename() {
        let dir = tempdir().unwrap();

        File::create(dir.path().join("c.jpg")).unwrap();
        File::create(dir.path().join("a.jpg")).unwrap();
        File::create(dir.path().join("b.png")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        assert_eq!(result[0].file_name, "a.jpg");
        assert_eq!(result[1].file_name, "b.png");
        assert_eq!(result[2].file_name, "c.jpg");
    }
}
