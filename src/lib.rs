//! # lsb_delim 库
//!
//! 本库包含以定界符成帧的 LSB 隐写工具的核心逻辑：
//! 消息之后追加 `"#####"`，逐位写入 RGB 通道的最低有效位；
//! 提取时逐字节读取，遇到定界符即停止。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod raster;
pub mod steganography;

pub use error::StegoError;
pub use raster::Raster;
pub use steganography::{Extraction, embed, extract, scan};
