//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载合成链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 所有错误对当次合成都是致命的：不重试、不降级，链路上已分配的
//! 表面与缓冲随所有权释放，对外只暴露一条错误消息。

/// 图层合成统一错误类型。
///
/// 每个变体对应链路中的一个失败阶段，调用方可按变体决定重试策略。
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// 调用方输入不合法（空列表、超出图层上限）。在任何解码开始前检出。
    #[error("输入错误：{0}")]
    Input(String),

    /// 图层字节无法被解码器解析，携带底层编解码器的诊断信息。
    #[error("解码错误：{0}")]
    Decode(String),

    /// 非首张图层的宽高与首张图层不一致。
    #[error("尺寸不一致：首张图层为 {expected_width}x{expected_height}，当前图层为 {width}x{height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    /// 工作表面无法分配（尺寸溢出或内存不足一类）。
    #[error("表面分配失败：{0}")]
    SurfaceAllocation(String),

    /// 编码器未能产出输出字节，携带底层编解码器的原始消息。
    #[error("编码错误：{0}")]
    Encode(String),
}

impl From<MergeError> for String {
    /// 兼容仍使用字符串错误的调用点。
    fn from(error: MergeError) -> Self {
        error.to_string()
    }
}
