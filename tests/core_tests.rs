use image::{Rgb, RgbImage};
use lsb_delim::{
    Raster, StegoError,
    bits::encode,
    capacity::max_payload_bytes,
    constants::{BITS_PER_BYTE, DELIMITER},
    embed, extract, scan,
};
use rand::RngCore;

/// 一个辅助函数，用于创建一个带有随机像素的栅格
fn random_raster(rows: usize, cols: usize) -> Raster {
    let mut data = vec![0u8; rows * cols * 3];
    rand::rng().fill_bytes(&mut data);
    Raster::from_raw(rows, cols, data).expect("shape matches")
}

/// 由给定的最低位序列构建一行栅格，其余高位随机
fn raster_from_lsbs(lsbs: &[u8]) -> Raster {
    assert_eq!(lsbs.len() % 3, 0);
    let mut data = vec![0u8; lsbs.len()];
    rand::rng().fill_bytes(&mut data);
    data.iter_mut()
        .zip(lsbs)
        .for_each(|(unit, &bit)| *unit = (*unit & 0xFE) | bit);
    Raster::from_raw(1, lsbs.len() / 3, data).expect("shape matches")
}

/// 10x10 栅格：容量 37 字节，"hi" 可往返
#[test]
fn test_concrete_scenario() -> anyhow::Result<()> {
    let raster = random_raster(10, 10);
    assert_eq!(raster.capacity(), 37);

    let doctored = embed(&raster, "hi")?;
    assert_eq!(extract(&doctored).as_deref(), Some("hi"));

    let long = "x".repeat(40);
    assert_eq!(
        embed(&raster, &long),
        Err(StegoError::CapacityExceeded { max_chars: 32 })
    );
    Ok(())
}

/// 验证多种消息的完整往返
#[test]
fn test_round_trip() -> anyhow::Result<()> {
    let raster = random_raster(64, 48);
    let messages = [
        "",
        "a",
        "Hello, hidden world!",
        "Latin-1 only: café, naïve, ÿ, ©",
        "line one\nline two\ttabbed\r\n",
        "single # and double ## are fine",
        "\u{0}\u{1}\u{ff}",
    ];

    for message in messages {
        let doctored = embed(&raster, message)?;
        assert_eq!(
            extract(&doctored).as_deref(),
            Some(message),
            "round trip failed for {message:?}"
        );
    }
    Ok(())
}

/// 容量边界：C - 5 个字符成功，C - 4 个字符失败并报告 C - 5
#[test]
fn test_capacity_boundary() -> anyhow::Result<()> {
    let raster = random_raster(10, 10);
    let capacity = raster.capacity();

    let fits = "z".repeat(capacity - DELIMITER.len());
    let doctored = embed(&raster, &fits)?;
    assert_eq!(extract(&doctored), Some(fits));

    let too_long = "z".repeat(capacity - DELIMITER.len() + 1);
    assert_eq!(
        embed(&raster, &too_long),
        Err(StegoError::CapacityExceeded {
            max_chars: capacity - DELIMITER.len()
        })
    );
    Ok(())
}

/// 容量不足以放下定界符时，空消息也会失败
#[test]
fn test_capacity_below_delimiter() {
    let raster = Raster::new(1, 8);
    assert_eq!(max_payload_bytes(1, 8, 3), 3);
    assert_eq!(
        embed(&raster, ""),
        Err(StegoError::CapacityExceeded { max_chars: 0 })
    );
    assert_eq!(
        embed(&Raster::new(0, 0), ""),
        Err(StegoError::CapacityExceeded { max_chars: 0 })
    );
}

/// 输入栅格在隐写后保持不变
#[test]
fn test_input_is_not_mutated() -> anyhow::Result<()> {
    let raster = random_raster(20, 20);
    let snapshot = raster.clone();

    let doctored = embed(&raster, "do not touch the original")?;

    assert_eq!(raster, snapshot);
    assert_eq!(doctored.rows(), raster.rows());
    assert_eq!(doctored.cols(), raster.cols());
    Ok(())
}

/// 只有最低位可能改变，且载荷之后的单元完全不变
#[test]
fn test_only_lsbs_change() -> anyhow::Result<()> {
    let raster = random_raster(30, 30);
    let message = "only the lowest bit moves";
    let doctored = embed(&raster, message)?;

    let written = (message.len() + DELIMITER.len()) * BITS_PER_BYTE;
    let expected_bits = encode(&format!("{message}{DELIMITER}"))?;

    for (i, (&before, &after)) in raster.as_raw().iter().zip(doctored.as_raw()).enumerate() {
        assert_eq!(before & 0xFE, after & 0xFE, "high bits changed at unit {i}");
        if i < written {
            assert_eq!(after & 1, expected_bits[i], "wrong bit at unit {i}");
        } else {
            assert_eq!(before, after, "unit {i} beyond the payload changed");
        }
    }
    Ok(())
}

/// 同样的输入总是产生同样的输出
#[test]
fn test_embed_is_deterministic() -> anyhow::Result<()> {
    let raster = random_raster(16, 16);
    assert_eq!(embed(&raster, "same")?, embed(&raster, "same")?);
    Ok(())
}

/// 未隐写的图像返回未找到
#[test]
fn test_no_message_detected() {
    assert_eq!(extract(&Raster::new(50, 50)), None);

    // 随机 LSB 流中出现 "#####" 的概率可忽略
    assert_eq!(extract(&random_raster(50, 50)), None);

    let blank = Raster::new(0, 0);
    let extraction = scan(&blank);
    assert_eq!(extraction.message, None);
    assert_eq!(extraction.units_read, 0);
}

/// 少于 40 bit 的栅格永远找不到定界符
#[test]
fn test_raster_smaller_than_delimiter() {
    let lsbs: Vec<u8> = encode("####").unwrap().into_iter().chain([0, 0, 1, 0]).collect();
    assert_eq!(lsbs.len(), 36);
    assert_eq!(extract(&raster_from_lsbs(&lsbs)), None);
}

/// 末尾不足 8 bit 的残余被丢弃，即使补 1 后会凑成定界符
#[test]
fn test_trailing_partial_byte_is_dropped() {
    // '#' = 0x23 = 0010_0011，只保留前 7 bit
    let mut lsbs = encode("####").unwrap();
    lsbs.extend_from_slice(&[0, 0, 1, 0, 0, 0, 1]);
    assert_eq!(lsbs.len(), 39);

    let extraction = scan(&raster_from_lsbs(&lsbs));
    assert_eq!(extraction.message, None);
    assert_eq!(extraction.units_read, 32);
}

/// 找到定界符后立即停止，不再读取后面的像素
#[test]
fn test_early_exit() -> anyhow::Result<()> {
    let raster = random_raster(1000, 1000);
    let message: String = (0..200u8).map(|i| char::from(b'a' + i % 26)).collect();

    let doctored = embed(&raster, &message)?;
    let extraction = scan(&doctored);

    assert_eq!(extraction.message.as_deref(), Some(message.as_str()));
    assert_eq!(
        extraction.units_read,
        (message.len() + DELIMITER.len()) * BITS_PER_BYTE
    );
    assert!(extraction.units_read < doctored.len());
    Ok(())
}

/// 消息本身包含定界符时，只返回第一次出现之前的部分
#[test]
fn test_message_containing_delimiter_is_cut() -> anyhow::Result<()> {
    let raster = random_raster(10, 10);
    let doctored = embed(&raster, "before#####after")?;
    assert_eq!(extract(&doctored).as_deref(), Some("before"));

    // 连续 6 个 '#' 在第 5 个处即结束
    let doctored = embed(&raster, "x#")?;
    assert_eq!(extract(&doctored).as_deref(), Some("x"));
    Ok(())
}

/// 超出单字节范围的字符在写入前被拒绝
#[test]
fn test_unsupported_character_rejected() {
    let raster = random_raster(10, 10);
    assert_eq!(
        embed(&raster, "price: 5€"),
        Err(StegoError::UnsupportedCharacter {
            character: '€',
            index: 8
        })
    );
}

/// 栅格与 `image::RgbImage` 之间的转换保持 (行, 列, 通道) 布局
#[test]
fn test_raster_image_conversion() -> anyhow::Result<()> {
    let mut image = RgbImage::new(3, 2);
    image.put_pixel(2, 1, Rgb([10, 20, 30]));
    image.put_pixel(0, 1, Rgb([1, 2, 3]));

    let raster = Raster::from(image.clone());
    assert_eq!((raster.rows(), raster.cols(), raster.len()), (2, 3, 18));
    assert_eq!(raster.get(1, 2, 0), Some(10));
    assert_eq!(raster.get(1, 2, 2), Some(30));
    assert_eq!(raster.get(1, 0, 1), Some(2));
    assert_eq!(raster.get(2, 0, 0), None);
    assert_eq!(raster.get(0, 0, 3), None);

    assert_eq!(raster.into_image()?, image);
    Ok(())
}

#[test]
fn test_raster_shape_mismatch() {
    assert_eq!(
        Raster::from_raw(2, 2, vec![0; 11]),
        Err(StegoError::ShapeMismatch {
            expected: 12,
            actual: 11
        })
    );
}
