//! # 核心编排模块
//!
//! ## 设计思路
//!
//! 入口函数只负责流程编排与输入校验，处理链路固定为：
//! 1. 校验图层数量（空列表 / 超出上限，在任何解码前拒绝）
//! 2. 逐张解码并混合进累积画布
//! 3. 反预乘为非预乘 RGBA
//! 4. 编码为 PNG
//!
//! ## 实现思路
//!
//! - 链路同步、单线程，调用间不共享状态；并发调用各自持有全部缓冲。
//! - 记录 `decode/blend/convert/encode/total` 阶段耗时，便于性能诊断。
//! - 任一阶段出错即整体失败，已分配表面随所有权释放，不产出部分结果。

use std::time::Instant;

use crate::compositor::Compositor;
use crate::config::MergeConfig;
use crate::convert::to_straight_alpha;
use crate::decode::decode_layer;
use crate::encode::encode_png;
use crate::error::MergeError;

/// 按默认配置合成图层栈（不启用同色透明掩码）。
///
/// # 示例
/// ```rust,ignore
/// let merged = image_merge::merge(&[bottom_png, top_png])?;
/// # Ok::<(), image_merge::MergeError>(())
/// ```
pub fn merge<B: AsRef<[u8]>>(images: &[B]) -> Result<Vec<u8>, MergeError> {
    merge_with(images, &MergeConfig::default())
}

/// 将一组同尺寸编码图层自下而上合成为单张 PNG。
///
/// `images[0]` 是最底层，末位是最顶层；所有图层必须与首张同宽高。
/// 出错时不返回任何部分结果。
///
/// # 示例
/// ```rust,ignore
/// use image_merge::MergeConfig;
///
/// let config = MergeConfig { preserve_colors: true, ..MergeConfig::default() };
/// let merged = image_merge::merge_with(&[bottom_png, top_png], &config)?;
/// # Ok::<(), image_merge::MergeError>(())
/// ```
pub fn merge_with<B: AsRef<[u8]>>(
    images: &[B],
    config: &MergeConfig,
) -> Result<Vec<u8>, MergeError> {
    if images.is_empty() {
        return Err(MergeError::Input("图层列表为空，没有可合成的内容".to_string()));
    }
    if images.len() > config.max_layers {
        return Err(MergeError::Input(format!(
            "图层数量过多：{} 张（上限：{} 张）",
            images.len(),
            config.max_layers
        )));
    }

    let total_start = Instant::now();
    let mut decode_elapsed = std::time::Duration::ZERO;
    let mut blend_elapsed = std::time::Duration::ZERO;

    let mut compositor = Compositor::new(config.preserve_colors);
    for (index, image) in images.iter().enumerate() {
        let decode_start = Instant::now();
        let layer = decode_layer(image.as_ref(), config)?;
        decode_elapsed += decode_start.elapsed();

        let (width, height) = layer.dimensions();
        log::debug!("图层 {} 解码完成：{}x{}", index, width, height);

        let blend_start = Instant::now();
        compositor.push(layer)?;
        blend_elapsed += blend_start.elapsed();
    }

    let accumulator = compositor.finish()?;
    let (width, height) = accumulator.dimensions();

    let convert_start = Instant::now();
    let rgba = to_straight_alpha(&accumulator);
    let convert_elapsed = convert_start.elapsed();

    let encode_start = Instant::now();
    let output = encode_png(&rgba, width, height)?;
    let encode_elapsed = encode_start.elapsed();

    log::info!(
        "✅ 图层合成完成 - layers={} size={}x{} decode={}ms blend={}ms convert={}ms encode={}ms total={}ms",
        images.len(),
        width,
        height,
        decode_elapsed.as_millis(),
        blend_elapsed.as_millis(),
        convert_elapsed.as_millis(),
        encode_elapsed.as_millis(),
        total_start.elapsed().as_millis()
    );

    Ok(output)
}
