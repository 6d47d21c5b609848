//! # 比特打包模块
//!
//! 文本与比特序列之间的定长转换：每个字符占 8 bit，字符内高位在前。
//! 比特序列中的每个元素是取值为 0 或 1 的 `u8`，可直接写入像素的最低位。

use crate::constants::BITS_PER_BYTE;
use crate::error::{Result, StegoError};

/// 把文本转换为单字节序列。
///
/// 码位大于 255 的字符会导致其后所有字节边界错位，因此直接拒绝。
///
/// # Errors
///
/// 遇到第一个无法用单字节表示的字符时返回 [`StegoError::UnsupportedCharacter`]。
pub fn to_latin1(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(index, character)| {
            u8::try_from(character)
                .map_err(|_| StegoError::UnsupportedCharacter { character, index })
        })
        .collect()
}

/// 将文本编码为比特序列，长度恒为字符数的 8 倍。
///
/// # Errors
///
/// 同 [`to_latin1`]。
pub fn encode(text: &str) -> Result<Vec<u8>> {
    let bytes = to_latin1(text)?;
    Ok(bytes
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).rev().map(move |shift| (byte >> shift) & 1))
        .collect())
}

/// 将一组 (最多 8 个) 比特按大端顺序拼成一个字节。
pub fn pack_byte(bits: &[u8]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
}

/// 将比特序列解码为文本，每 8 bit 对应一个码位相同的字符。
///
/// 末尾不足 8 bit 的残余分组被直接丢弃，不会被当作一个字节解码。
pub fn decode(bits: &[u8]) -> String {
    bits.chunks_exact(BITS_PER_BYTE)
        .map(|group| char::from(pack_byte(group)))
        .collect()
}
