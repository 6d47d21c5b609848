//! # 容量计算模块

use crate::constants::{BITS_PER_BYTE, DELIMITER};

/// 给定尺寸的图像最多能容纳多少个载荷字节 (含定界符)。
///
/// 每 8 个通道单元存放一个字节，不足 8 个的尾部不计入。
pub fn max_payload_bytes(rows: usize, cols: usize, channels: usize) -> usize {
    rows.saturating_mul(cols).saturating_mul(channels) / BITS_PER_BYTE
}

/// 扣除定界符后，用户消息允许的最大字符数。
pub fn max_message_chars(capacity: usize) -> usize {
    capacity.saturating_sub(DELIMITER.len())
}
