//! # 像素栅格模块
//!
//! 按 (行, 列, 通道) 索引的 RGB8 缓冲区，内存布局与展平顺序一致：
//! 先行，再列，最后通道。这也是隐写与提取遍历通道单元的顺序。

use crate::capacity::max_payload_bytes;
use crate::constants::CHANNELS;
use crate::error::{Result, StegoError};
use image::RgbImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl Raster {
    /// 创建全零栅格。
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols * CHANNELS],
        }
    }

    /// 用已展平的通道值构建栅格。
    ///
    /// # Errors
    ///
    /// `data` 的长度不等于 `rows * cols * 3` 时返回 [`StegoError::ShapeMismatch`]。
    pub fn from_raw(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .and_then(|units| units.checked_mul(CHANNELS))
            .ok_or(StegoError::DimensionsTooLarge { rows, cols })?;

        if data.len() != expected {
            return Err(StegoError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 通道单元总数。
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 该栅格可容纳的载荷字节数 (含定界符)。
    pub fn capacity(&self) -> usize {
        max_payload_bytes(self.rows, self.cols, CHANNELS)
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        if row >= self.rows || col >= self.cols || channel >= CHANNELS {
            return None;
        }
        self.data.get((row * self.cols + col) * CHANNELS + channel).copied()
    }

    /// 按遍历顺序展平的通道值。
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// 转换为 `image` 的 RGB 图像，以便编码为无损格式。
    ///
    /// # Errors
    ///
    /// 行或列超出 `u32` 时返回 [`StegoError::DimensionsTooLarge`]。
    pub fn into_image(self) -> Result<RgbImage> {
        let (rows, cols) = (self.rows, self.cols);
        let too_large = || StegoError::DimensionsTooLarge { rows, cols };

        let width = u32::try_from(cols).map_err(|_| too_large())?;
        let height = u32::try_from(rows).map_err(|_| too_large())?;

        RgbImage::from_raw(width, height, self.data).ok_or_else(too_large)
    }
}

impl From<RgbImage> for Raster {
    fn from(image: RgbImage) -> Self {
        let rows = image.height() as usize;
        let cols = image.width() as usize;
        Self {
            rows,
            cols,
            data: image.into_raw(),
        }
    }
}
