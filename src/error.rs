//! # 错误类型模块
//!
//! 核心隐写算法的所有失败情形。命令处理层再用 `anyhow` 为其附加上下文。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StegoError {
    /// 消息加上定界符后超出了图像的隐写容量。
    #[error("Not enough space in the image to hide the text. Maximum characters: {max_chars}")]
    CapacityExceeded { max_chars: usize },

    /// 字符的码位超出 8 bit (Latin-1) 范围，无法按定长编码。
    #[error("Character {character:?} at index {index} does not fit in a single byte (code point > 255)")]
    UnsupportedCharacter { character: char, index: usize },

    /// 遍历完整幅图像仍未找到定界符。
    #[error("No hidden message detected")]
    DelimiterNotFound,

    /// 像素缓冲区长度与行列尺寸不符。
    #[error("Raster buffer holds {actual} channel values, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// 行列尺寸超出图像编码器能表示的范围。
    #[error("Raster dimensions {rows}x{cols} are too large")]
    DimensionsTooLarge { rows: usize, cols: usize },
}

pub type Result<T> = std::result::Result<T, StegoError>;
