//! # 同色透明掩码模块
//!
//! ## 设计思路
//!
//! 在混合前将“画布与新图层逐像素完全相同”的位置清为全透明，
//! 让调用方可以擦除图层中与底层画布重复的内容（图层差分场景），
//! 而不是把相同像素再冗余地混合一遍。
//!
//! 比较针对原始 32 位像素字（含 Alpha）逐位进行，不做感知或
//! Alpha 加权近似：仅最低位不同的两个像素也视为不同。

use crate::surface::PixelSurface;

/// 将 `target` 中与 `source` 对应位置像素字完全相等的像素清零（全透明）。
///
/// 两个表面必须同宽高，由合成器在调用前保证。
pub(crate) fn mask_equal(target: &mut PixelSurface, source: &PixelSurface) {
    debug_assert_eq!(target.dimensions(), source.dimensions());

    for (dst, &src) in target.data.iter_mut().zip(source.data.iter()) {
        if *dst == src {
            *dst = 0;
        }
    }
}
