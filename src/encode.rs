//! # 编码适配模块
//!
//! ## 设计思路
//!
//! 输出固定采用编码器的最快压缩档（相当于 zlib 的 Z_BEST_SPEED），
//! 是面向批量合成负载的速度/体积取舍：调用方通常一次处理大量图层栈，
//! 吞吐优先于单张体积。底层编码器的失败消息原样透传。

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use crate::error::MergeError;

/// 将非预乘 RGBA8 字节编码为 PNG。
pub(crate) fn encode_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, MergeError> {
    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut out, CompressionType::Fast, FilterType::Adaptive);

    encoder
        .write_image(rgba, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| MergeError::Encode(e.to_string()))?;

    Ok(out)
}
