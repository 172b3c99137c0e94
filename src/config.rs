//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `MergeConfig`，保证单次合成的行为可观测、可测试。
//! 历史上的两种调用签名（纯位置参数 / 列表加关键字开关）在这里收敛为
//! 一个配置对象，`Default` 提供与原有默认行为一致的参数。
//!
//! ## 实现思路
//!
//! - `preserve_colors` 控制同色透明掩码是否参与合成。
//! - `max_layers` 是调用方输入的硬上限，在任何解码开始前校验。
//! - `max_layer_pixels` 在完整解码前按图片头宽高快速拒绝超大图层，
//!   降低恶意输入触发高内存开销的风险。

/// 单次合成的配置。
///
/// 同一次 `merge_with` 调用全程使用同一份配置，不存在中途漂移。
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// 是否启用同色透明掩码：图层与累积画布逐像素完全相同处，
    /// 先将画布像素清为全透明再混合。默认关闭。
    pub preserve_colors: bool,
    /// 单次合成允许的最大图层数。
    pub max_layers: usize,
    /// 单张图层允许的像素上限（`width * height`），按头信息提前校验。
    pub max_layer_pixels: u64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            preserve_colors: false,
            max_layers: 1024,
            max_layer_pixels: 40_000_000,
        }
    }
}
