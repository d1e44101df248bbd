//! 工具模块
//!
//! 提供十六进制格式化、十六进制文本解析和API帧校验和计算

use crate::error::ProtocolError;
use crate::frame_meta::CHECKSUM_VALID;

/// 计算帧体对应的校验字节，使帧体与校验字节之和的低8位为0xFF
pub fn calculate_checksum(body: &[u8]) -> u8 {
    CHECKSUM_VALID.wrapping_sub(sum_bytes(body))
}

/// 帧体字节和的低8位
pub fn sum_bytes(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// 将字节数组转换为十六进制字符串（大写，空格分隔，用于日志）
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 将字节数组渲染为显示文本：每个字节两位小写十六进制后跟一个空格
pub fn format_hex_values(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x} ", b)).collect()
}

/// 将十六进制文本转换为字节数组
///
/// 接受任意空白分隔，以及可选的`0x`前缀，例如 `"7E 00 04"`、`"0x7e,0x00"`
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, ProtocolError> {
    let clean: String = hex_str
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token)
        })
        .map(|token| {
            // 单个半字节按一个字节补零
            if token.len() == 1 {
                format!("0{token}")
            } else {
                token.to_string()
            }
        })
        .collect();

    hex::decode(&clean).map_err(|e| ProtocolError::ParseError(format!("invalid hex input: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_checksum() {
        // 0x08 + 0x01 + 0x42 + 0x43 = 0x8E, 0xFF - 0x8E = 0x71
        assert_eq!(calculate_checksum(&[0x08, 0x01, 0x42, 0x43]), 0x71);
        assert_eq!(calculate_checksum(&[]), 0xFF);
        let body = [0x8A, 0x06];
        assert_eq!(sum_bytes(&body).wrapping_add(calculate_checksum(&body)), 0xFF);
    }

    #[test]
    fn test_bytes_to_hex() {
        let bytes = [0xAB, 0xCD, 0xEF];
        let hex = bytes_to_hex(&bytes);
        assert_eq!(hex, "AB CD EF");
    }

    #[test]
    fn test_format_hex_values() {
        assert_eq!(format_hex_values(&[0x01, 0xAB]), "01 ab ");
        assert_eq!(format_hex_values(&[]), "");
    }

    #[test]
    fn test_hex_to_bytes() {
        let bytes = hex_to_bytes("AB CD EF").unwrap();
        assert_eq!(bytes, [0xAB, 0xCD, 0xEF]);

        let bytes = hex_to_bytes("0x7e,0x00\n04\t8").unwrap();
        assert_eq!(bytes, [0x7E, 0x00, 0x04, 0x08]);

        let bytes = hex_to_bytes("7E0004").unwrap();
        assert_eq!(bytes, [0x7E, 0x00, 0x04]);
    }

    #[test]
    fn test_hex_to_bytes_invalid() {
        assert!(matches!(
            hex_to_bytes("7E GG"),
            Err(ProtocolError::ParseError(_))
        ));
        assert!(hex_to_bytes("7E0").is_err());
    }
}
