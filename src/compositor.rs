//! # 合成器模块
//!
//! ## 设计思路
//!
//! `Compositor` 持有累积画布并按序接收图层：首张图层确立画布尺寸并
//! 直接成为画布（等价于向全透明画布混合），后续图层先做尺寸校验、
//! 可选地应用同色透明掩码，再按 source-over 规则混合进画布。
//!
//! 状态机通过所有权表达：`None` 画布为空、`Some` 累积中、`finish`
//! 取走画布即完成；任何错误向上传播时已分配的表面随 `Drop` 释放，
//! 无需在每个失败分支重复清理。
//!
//! ## 实现思路
//!
//! 混合在预乘空间逐通道进行（含 Alpha）：
//! `out = src + dst * (255 - src_a) / 255`，除以 255 使用与预乘一致的
//! 四舍五入实现，保证不透明顶层完全覆盖、全透明顶层恒等。

use crate::error::MergeError;
use crate::mask::mask_equal;
use crate::surface::{PixelSurface, mul_div_255};

/// 对单个预乘像素字执行 source-over 混合。
#[inline]
fn blend_word(src: u32, dst: u32) -> u32 {
    let src_a = src >> 24;
    let inv = 255 - src_a;

    let a = src_a + mul_div_255(dst >> 24, inv);
    let r = ((src >> 16) & 0xff) + mul_div_255((dst >> 16) & 0xff, inv);
    let g = ((src >> 8) & 0xff) + mul_div_255((dst >> 8) & 0xff, inv);
    let b = (src & 0xff) + mul_div_255(dst & 0xff, inv);

    (a << 24) | (r << 16) | (g << 8) | b
}

/// 累积画布的所有者。
///
/// 一次合成对应一个实例，调用间不共享任何状态。
pub(crate) struct Compositor {
    accumulator: Option<PixelSurface>,
    preserve_colors: bool,
}

impl Compositor {
    pub(crate) fn new(preserve_colors: bool) -> Self {
        Self {
            accumulator: None,
            preserve_colors,
        }
    }

    /// 将一张已解码图层混合进画布，图层随本次调用被消耗。
    pub(crate) fn push(&mut self, layer: PixelSurface) -> Result<(), MergeError> {
        let Some(accumulator) = self.accumulator.as_mut() else {
            // 首张图层确立画布尺寸。
            self.accumulator = Some(layer);
            return Ok(());
        };

        let (expected_width, expected_height) = accumulator.dimensions();
        let (width, height) = layer.dimensions();
        if (width, height) != (expected_width, expected_height) {
            return Err(MergeError::DimensionMismatch {
                expected_width,
                expected_height,
                width,
                height,
            });
        }

        if self.preserve_colors {
            mask_equal(accumulator, &layer);
        }

        for (dst, &src) in accumulator.data.iter_mut().zip(layer.data.iter()) {
            *dst = blend_word(src, *dst);
        }

        Ok(())
    }

    /// 结束图层循环，取出仍为预乘表示的画布。
    pub(crate) fn finish(self) -> Result<PixelSurface, MergeError> {
        self.accumulator
            .ok_or_else(|| MergeError::Input("没有可合成的图层".to_string()))
    }
}
