//! # 图层合成库 — 库入口
//!
//! ## 架构总览
//!
//! 将一组同尺寸 PNG 图层（自下而上）合成为单张 PNG。
//! 数据严格单向流动，每次调用都是独立、无共享状态的流水线：
//!
//! ```text
//! 编码字节 ──► decode（解码 + 预乘 ARGB32）
//!                 │
//!                 ▼
//!         compositor（累积画布）
//!           ├─ mask（可选：同色像素清为全透明）
//!           └─ source-over 预乘混合，逐图层循环
//!                 │
//!                 ▼
//!         convert（反预乘为非预乘 RGBA）
//!                 │
//!                 ▼
//!         encode（PNG，最快压缩档） ──► 输出字节
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `MergeError`，所有入口的返回类型 |
//! | [`config`] | `MergeConfig`：掩码开关、图层数与像素上限 |
//! | `surface` | 预乘 ARGB32 像素表面与预乘舍入 |
//! | `decode` | 字节 → 表面，含完整解码前的头信息尺寸校验 |
//! | `mask` | 同色透明掩码（逐位比较，含 Alpha） |
//! | `compositor` | 累积画布、尺寸校验、source-over 混合 |
//! | `convert` | 预乘 → 非预乘 RGBA，`(c*255 + a/2)/a` 舍入 |
//! | `encode` | RGBA → PNG（Z_BEST_SPEED 等价档位） |
//! | `merge` | 输入校验、图层循环编排、阶段耗时日志 |

pub mod config;
pub mod error;

mod compositor;
mod convert;
mod decode;
mod encode;
mod mask;
mod merge;
mod surface;

pub use config::MergeConfig;
pub use error::MergeError;
pub use merge::{merge, merge_with};
