//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、图像格式的选择、调用核心隐写算法以及向用户报告结果。

use crate::capacity::max_message_chars;
use crate::cli::{CapacityArgs, HideArgs, MessageSource, RecoverArgs};
use crate::constants::{DEFAULT_IMAGE_EXTENSION, DOCTORED_PREFIX, LOSSLESS_FORMATS, RECOVERED_PREFIX};
use crate::error::StegoError;
use crate::raster::Raster;
use crate::steganography::{embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{GenericImageView, ImageFormat};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 读取图像并转换为 RGB8 栅格，Alpha 通道被丢弃。
fn load_raster(path: &Path) -> Result<Raster> {
    if let Ok(ImageFormat::Jpeg) = ImageFormat::from_path(path) {
        warn!(
            "{} is a lossy JPEG; it can serve as a cover but will never carry a recoverable message",
            path.display()
        );
    }

    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    let (width, height) = image.dimensions();
    info!(
        "loaded {} ({}x{}, {:?})",
        path.display(),
        width,
        height,
        image.color()
    );

    Ok(Raster::from(image.to_rgb8()))
}

/// 未指定输出路径时，在输入文件所在目录生成 `<prefix><stem>.<extension>`。
fn output_path(explicit: Option<PathBuf>, input: &Path, prefix: &str, extension: &str) -> PathBuf {
    explicit.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        input.with_file_name(format!("{prefix}{stem}.{extension}"))
    })
}

/// 除非指定了 `--force`，否则拒绝覆盖已有文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 根据扩展名确定输出格式，只接受无损格式。
fn lossless_format(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Cannot determine the output image format from: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        LOSSLESS_FORMATS.contains(&format),
        "Output format {:?} is lossy and would destroy the hidden bits. \nUse one of: {}",
        format,
        LOSSLESS_FORMATS
            .iter()
            .flat_map(|format| format.extensions_str().first())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
            .green()
            .bold()
    );

    Ok(format)
}

fn read_message(source: &MessageSource) -> Result<String> {
    match (&source.text, &source.message) {
        (Some(path), _) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        }),
        (None, Some(message)) => Ok(message.clone()),
        (None, None) => anyhow::bail!("Either a text file or a message must be provided."),
    }
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本、检查隐写空间是否足够、调用隐写核心函数写入消息与定界符，
/// 最后将结果以无损格式写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 目标文件已存在且未指定 `--force`，或目标格式不是无损格式。
/// * 文本包含无法用单字节表示的字符。
/// * 图像没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = output_path(
        args.dest,
        &args.image,
        DOCTORED_PREFIX,
        DEFAULT_IMAGE_EXTENSION,
    );
    ensure_writable(&dest, args.force)?;
    let format = lossless_format(&dest)?;

    let raster = load_raster(&args.image)?;
    let message = read_message(&args.source)?;

    let doctored = embed(&raster, &message).map_err(|err| match err {
        StegoError::CapacityExceeded { max_chars } => anyhow::anyhow!(
            "Not enough space in the image to hide the text. \nRequired: {}, Maximum characters: {}",
            message.chars().count().to_string().red().bold(),
            max_chars.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context("The text cannot be hidden in this image."),
    })?;

    doctored
        .into_image()?
        .save_with_format(&dest, format)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;

    info!("wrote {} as {:?}", dest.display(), format);

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用提取核心函数搜索定界符，
/// 最后将恢复的文本内容以 UTF-8 写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像中没有隐藏的消息 (找不到定界符)。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = output_path(args.text, &args.image, RECOVERED_PREFIX, "txt");
    ensure_writable(&dest, args.force)?;

    let raster = load_raster(&args.image)?;

    let text = extract(&raster)
        .ok_or(StegoError::DelimiterNotFound)
        .with_context(|| {
            format!(
                "Failed to recover a message from '{}'. \nThe image may not contain a hidden message, or it was re-encoded in a lossy format.",
                args.image.to_string_lossy().red().bold()
            )
        })?;

    fs::write(&dest, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text ({} characters) has been successfully recovered and saved: {}",
        text.chars().count().to_string().green(),
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑：报告图像尺寸、载荷容量和可隐藏的最大字符数。
///
/// # Errors
///
/// 无法读取输入的图像文件时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let raster = load_raster(&args.image)?;
    let capacity = raster.capacity();

    println!(
        "{}: {}x{} pixels, {} payload bytes, up to {} characters",
        args.image.to_string_lossy().bold(),
        raster.cols(),
        raster.rows(),
        capacity,
        max_message_chars(capacity).to_string().green().bold()
    );
    Ok(())
}
