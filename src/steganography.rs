use crate::bits::{encode, pack_byte};
use crate::capacity::max_message_chars;
use crate::constants::{BITS_PER_BYTE, DELIMITER};
use crate::error::{Result, StegoError};
use crate::raster::Raster;
use log::debug;

/// 一次提取遍历的结果，附带实际读取的通道单元数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub message: Option<String>,
    pub units_read: usize,
}

/// 将 `message` 与定界符一起写入栅格副本的最低有效位。
///
/// 输入栅格不会被修改；返回的栅格与输入尺寸相同，
/// 只有前 `(消息长度 + 5) * 8` 个通道单元的最低位可能改变。
///
/// # Errors
///
/// * 消息含有码位大于 255 的字符：[`StegoError::UnsupportedCharacter`]。
/// * 载荷超出容量：[`StegoError::CapacityExceeded`]，携带允许的最大字符数。
pub fn embed(raster: &Raster, message: &str) -> Result<Raster> {
    let payload = format!("{message}{DELIMITER}");
    let capacity = raster.capacity();
    let payload_len = payload.chars().count();

    debug!(
        "embedding {} payload bytes into {}x{} raster (capacity {})",
        payload_len,
        raster.rows(),
        raster.cols(),
        capacity
    );

    if payload_len > capacity {
        return Err(StegoError::CapacityExceeded {
            max_chars: max_message_chars(capacity),
        });
    }

    let bits = encode(&payload)?;

    let mut doctored = raster.clone();
    doctored
        .as_raw_mut()
        .iter_mut()
        .zip(&bits)
        .for_each(|(unit, &bit)| *unit = (*unit & 0xFE) | bit);

    debug!("wrote {} bits", bits.len());

    Ok(doctored)
}

/// 逐字节读取最低有效位，直到在已解码文本的末尾出现定界符。
///
/// `pack_byte` 只看每个单元的最低位。每个新完成的字节只解码一次并追加到累积文本中。
/// 定界符的首次出现必然结束于刚追加的字节，所以只需检查后缀。
/// 末尾不足 8 bit 的残余不会被解码。
pub fn scan(raster: &Raster) -> Extraction {
    let mut text = String::new();
    let mut units_read = 0;

    for group in raster.as_raw().chunks_exact(BITS_PER_BYTE) {
        units_read += BITS_PER_BYTE;

        text.push(char::from(pack_byte(group)));

        if text.ends_with(DELIMITER) {
            text.truncate(text.len() - DELIMITER.len());
            debug!("delimiter found after {units_read} units");
            return Extraction {
                message: Some(text),
                units_read,
            };
        }
    }

    debug!("no delimiter in {units_read} units");
    Extraction {
        message: None,
        units_read,
    }
}

/// 提取隐藏的消息；未找到定界符时返回 `None`。
pub fn extract(raster: &Raster) -> Option<String> {
    scan(raster).message
}
