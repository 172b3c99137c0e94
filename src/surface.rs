//! # 像素表面模块
//!
//! ## 设计思路
//!
//! 流水线内部统一使用预乘 Alpha 的 ARGB32 像素字（Alpha 占最高字节，
//! 颜色通道已按 Alpha 比例缩放），这是线性混合的正确表示；
//! 保存为交换格式前再统一转回非预乘表示（见 `convert`）。
//!
//! ## 实现思路
//!
//! - 每像素一个 `u32`，行步长恰为 `width` 个字，无对齐填充。
//! - 预乘舍入采用 `t = a*c + 0x80; (t + (t >> 8)) >> 8`，
//!   与参考输出逐字节一致，属于行为契约，不可替换为浮点或截断除法。
//! - 尺寸溢出与内存分配失败统一映射为 `MergeError::SurfaceAllocation`。

use crate::error::MergeError;

/// 以 `(t + (t >> 8)) >> 8` 实现的四舍五入除以 255。
///
/// `v`、`f` 均在 0..=255 范围内时结果不会超过 255。
#[inline]
pub(crate) fn mul_div_255(v: u32, f: u32) -> u32 {
    let t = v * f + 0x80;
    (t + (t >> 8)) >> 8
}

/// 将一个非预乘 RGBA 像素打包为预乘 ARGB32 字。
#[inline]
pub(crate) fn premultiply(r: u8, g: u8, b: u8, a: u8) -> u32 {
    let a = a as u32;
    (a << 24)
        | (mul_div_255(r as u32, a) << 16)
        | (mul_div_255(g as u32, a) << 8)
        | mul_div_255(b as u32, a)
}

/// 预乘 ARGB32 像素表面。
///
/// 参与同一次合成的所有表面宽高必须一致；累积画布在整个图层循环中
/// 保持预乘表示，直到最终转换。
pub(crate) struct PixelSurface {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// 行主序像素字，长度恰为 `width * height`。
    pub(crate) data: Vec<u32>,
}

impl PixelSurface {
    /// 由解码得到的非预乘 RGBA 字节构建预乘表面。
    ///
    /// 字节长度必须恰为 `width * height * 4`，否则视为解码异常。
    pub(crate) fn from_straight_rgba(
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Self, MergeError> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| MergeError::SurfaceAllocation("图层像素数溢出".to_string()))?;

        let expected_len = pixels
            .checked_mul(4)
            .ok_or_else(|| MergeError::SurfaceAllocation("图层字节数溢出".to_string()))?;

        if rgba.len() != expected_len {
            return Err(MergeError::Decode("解码后像素数据长度异常".to_string()));
        }

        let mut data = Vec::new();
        data.try_reserve_exact(pixels)
            .map_err(|e| MergeError::SurfaceAllocation(format!("表面内存分配失败：{}", e)))?;

        for px in rgba.chunks_exact(4) {
            data.push(premultiply(px[0], px[1], px[2], px[3]));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// 表面宽高（像素）。
    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
