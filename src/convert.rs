//! # 反预乘转换模块
//!
//! ## 设计思路
//!
//! 累积画布全程保持预乘表示，保存为交换格式前在这里统一转回
//! 非预乘 RGBA。全透明像素直接输出 `(0,0,0,0)`：既避免除零，
//! 也符合“全透明像素不携带颜色信息”的约定。
//!
//! 非零 Alpha 的通道还原采用 `(c*255 + a/2) / a` 整数除法，
//! 是对真实比值的最近整数舍入而非截断；该公式是行为契约，
//! 必须逐字节复现参考输出，不可替换为浮点除法。

use crate::surface::PixelSurface;

/// 将预乘表面转换为非预乘 RGBA8 字节（`width * height * 4`）。
///
/// 输入表面不被修改；由于预乘数据中恒有 `c <= a`，
/// 输出通道天然不会超过 255，无需额外钳制。
pub(crate) fn to_straight_alpha(surface: &PixelSurface) -> Vec<u8> {
    let mut out = Vec::with_capacity(surface.data.len() * 4);

    for &px in &surface.data {
        let a = px >> 24;
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }

        let r = (((px >> 16) & 0xff) * 255 + a / 2) / a;
        let g = (((px >> 8) & 0xff) * 255 + a / 2) / a;
        let b = ((px & 0xff) * 255 + a / 2) / a;
        out.extend_from_slice(&[r as u8, g as u8, b as u8, a as u8]);
    }

    out
}
