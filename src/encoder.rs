//! 画像エンコーダ
//!
//! 画像を読み込み、JPEGに統一して再エンコードし、
//! API送信用のBase64文字列に変換する。

use crate::error::{FashionError, Result};
use crate::scanner::ImageInfo;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// 再エンコード時のJPEG品質
const JPEG_QUALITY: u8 = 75;

/// エンコード済み画像
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub file_name: String,
    pub mime_type: &'static str,
    /// Base64（標準アルファベット）
    pub data: String,
}

impl EncodedImage {
    /// `data:image/jpeg;base64,...` 形式のData URL
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// 画像1枚をJPEG + Base64にエンコード
///
/// # Arguments
/// * `image` - スキャン済みの画像情報
/// * `max_size` - 指定時は長辺がこのピクセル数を超えないよう縮小
pub fn encode_image(image: &ImageInfo, max_size: Option<u32>) -> Result<EncodedImage> {
    let read_error = |message: String| FashionError::ImageRead {
        file: image.file_name.clone(),
        message,
    };

    let mut img = load_dynamic_image(&image.path).map_err(|e| read_error(e.to_string()))?;

    if let Some(max) = max_size {
        if img.width() > max || img.height() > max {
            img = img.resize(max, max, FilterType::Triangle);
        }
    }

    let bytes = encode_jpeg(img).map_err(|e| read_error(format!("JPEG変換失敗: {}", e)))?;

    Ok(EncodedImage {
        file_name: image.file_name.clone(),
        mime_type: "image/jpeg",
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    })
}

/// JPEGにはアルファがないためRGBに落としてからエンコード
fn encode_jpeg(img: DynamicImage) -> std::result::Result<Vec<u8>, ImageError> {
    let rgb = DynamicImage::ImageRgb8(img.into_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;
    Ok(buffer.into_inner())
}

/// 拡張子と中身が食い違う画像（.pngの中身がJPEG等）は中身から判定して再試行
fn load_dynamic_image(path: &Path) -> std::result::Result<DynamicImage, ImageError> {
    match image::open(path) {
        Ok(img) => Ok(img),
        Err(err) if matches!(err, ImageError::Decoding(_) | ImageError::Unsupported(_)) => {
            tracing::debug!(
                "通常のデコードに失敗 {} ({err})。形式を推定して再試行します",
                path.display()
            );
            let reader = BufReader::new(File::open(path)?);
            ImageReader::new(reader).with_guessed_format()?.decode()
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn info(path: &Path) -> ImageInfo {
        ImageInfo {
            path: path.to_path_buf(),
            file_name: path.file_name().unwrap().to_string_lossy().to_string(),
        }
    }

    fn decode_base64(data: &str) -> Vec<u8> {
        base64::engine::general_purpose::STANDARD.decode(data).unwrap()
    }

    #[test]
    fn test_png_with_alpha_becomes_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shirt.png");
        RgbaImage::from_pixel(16, 8, Rgba([200, 30, 30, 128])).save(&path).unwrap();

        let encoded = encode_image(&info(&path), None).unwrap();
        assert_eq!(encoded.file_name, "shirt.png");
        assert_eq!(encoded.mime_type, "image/jpeg");

        let bytes = decode_base64(&encoded.data);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn test_downscale_keeps_aspect_ratio() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coat.jpg");
        RgbImage::from_pixel(400, 200, Rgb([10, 20, 30])).save(&path).unwrap();

        let encoded = encode_image(&info(&path), Some(100)).unwrap();
        let decoded = image::load_from_memory(&decode_base64(&encoded.data)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sock.jpg");
        RgbImage::from_pixel(20, 10, Rgb([0, 0, 0])).save(&path).unwrap();

        let encoded = encode_image(&info(&path), Some(100)).unwrap();
        let decoded = image::load_from_memory(&decode_base64(&encoded.data)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[test]
    fn test_mismatched_extension_is_sniffed() {
        let dir = tempdir().unwrap();
        let jpeg_path = dir.path().join("real.jpg");
        RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])).save(&jpeg_path).unwrap();
        let fake_png = dir.path().join("fake.png");
        std::fs::copy(&jpeg_path, &fake_png).unwrap();

        assert!(encode_image(&info(&fake_png), None).is_ok());
    }

    #[test]
    fn test_corrupt_file_is_image_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not an image at all").unwrap();

        let result = encode_image(&info(&path), None);
        match result {
            Err(FashionError::ImageRead { file, .. }) => assert_eq!(file, "broken.jpg"),
            other => panic!("Expected ImageRead error, got {:?}", other),
        }
    }

    #[test]
    fn test_data_url() {
        let encoded = EncodedImage {
            file_name: "a.jpg".to_string(),
            mime_type: "image/jpeg",
            data: "QUJD".to_string(),
        };
        assert_eq!(encoded.data_url(), "data:image/jpeg;base64,QUJD");
    }
}
