//! # 解码适配模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 预乘表面”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素上限快速拒绝
//! 3. 完整解码为 RGBA8
//! 4. 预乘并打包为 ARGB32 表面
//!
//! 任何解码失败立即终止整次合成，不做局部重试。

use std::io::Cursor;

use image::ImageReader;

use crate::config::MergeConfig;
use crate::error::MergeError;
use crate::surface::PixelSurface;

/// 将单张图层的原始字节解码为预乘像素表面。
pub(crate) fn decode_layer(bytes: &[u8], config: &MergeConfig) -> Result<PixelSurface, MergeError> {
    let (header_width, header_height) = inspect_dimensions(bytes)?;
    validate_pixel_limit(config, header_width, header_height)?;

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| MergeError::Decode(format!("图层解码失败：{}", e)))?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    validate_pixel_limit(config, width, height)?;

    PixelSurface::from_straight_rgba(width, height, rgba.as_raw())
}

/// 仅通过内存中的图片头信息读取宽高。
///
/// 用于在完整解码前做像素限制检查。
fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), MergeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| MergeError::Decode(format!("无法识别图层格式：{}", e)))?;

    reader
        .into_dimensions()
        .map_err(|e| MergeError::Decode(format!("无法读取图层尺寸：{}", e)))
}

/// 校验像素数量是否超过配置上限。
fn validate_pixel_limit(config: &MergeConfig, width: u32, height: u32) -> Result<(), MergeError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| MergeError::SurfaceAllocation("图层像素数溢出".to_string()))?;

    if pixels > config.max_layer_pixels {
        return Err(MergeError::SurfaceAllocation(format!(
            "图层像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_layer_pixels
        )));
    }

    Ok(())
}
