use image::ImageFormat;

/// 追加在消息末尾的帧定界符。
/// 提取时一旦在解码文本中遇到它即停止遍历。
pub const DELIMITER: &str = "#####";

/// 每个像素参与隐写的通道数 (R, G, B)。Alpha 通道不用于存储。
pub const CHANNELS: usize = 3;

/// 每个字符按一个 `u8` 处理，需要 8 个通道单元各存 1 bit。
pub const BITS_PER_BYTE: usize = 8;

/// 定界符所占的 bit 数。小于此数的图像不可能包含消息。
pub const DELIMITER_BITS: usize = DELIMITER.len() * BITS_PER_BYTE;

/// 未指定输出路径时，隐写结果图像的文件名前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本的文件名前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";

/// 默认输出图像扩展名 (PNG，无损)。
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// 允许作为隐写结果写出的无损格式。
/// JPEG 等有损格式会破坏最低有效位，因此只能作为输入。
pub const LOSSLESS_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Qoi,
];
