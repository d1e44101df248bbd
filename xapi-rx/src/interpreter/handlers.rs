//! 各帧类型的解释函数
//!
//! 偏移量与各帧类型的固定头部绑定，不同帧类型的头部长度不同。

use xapi_core::frame_meta::frame_type::{
    RECEIVE_OPTIONS_OFFSET, RECEIVE_PACKET_HEADER_LEN, TRANSMIT_OPTIONS_OFFSET,
    TRANSMIT_REQUEST_HEADER_LEN,
};
use xapi_core::{at_command_description, utils::format_hex_values};

use super::Summary;

/// AT命令助记符在帧体中的偏移（帧类型码和帧ID之后）
const MNEMONIC_OFFSET: usize = 2;
/// AT命令请求中命令值的偏移
const AT_REQUEST_VALUE_OFFSET: usize = 4;
/// AT命令响应中状态字节的偏移
const AT_RESPONSE_STATUS_OFFSET: usize = 4;
/// AT命令响应中命令值的偏移
const AT_RESPONSE_VALUE_OFFSET: usize = 5;

/// 提取两字节的AT命令助记符，每个字节按一个字符解释
fn mnemonic(body: &[u8]) -> Option<String> {
    let bytes = body.get(MNEMONIC_OFFSET..MNEMONIC_OFFSET + 2)?;
    Some(bytes.iter().map(|&b| b as char).collect())
}

/// 助记符及其描述，`closing` 为助记符后的引号
fn mnemonic_text(mnemonic: &str, closing: &str) -> String {
    let mut text = format!("\"{mnemonic}{closing} ");
    if let Some(desc) = at_command_description(mnemonic) {
        text.push_str(&format!("({desc}) "));
    }
    text
}

/// 本地AT命令请求（0x08）
pub fn at_command_request(body: &[u8]) -> Summary {
    let Some(mnemonic) = mnemonic(body) else {
        return Summary::truncated(String::new());
    };

    let mut text = mnemonic_text(&mnemonic, "\"");
    text.push_str(&format_hex_values(&body[AT_REQUEST_VALUE_OFFSET..]));
    Summary::text(text)
}

/// 本地AT命令响应（0x88）
pub fn at_command_response(body: &[u8]) -> Summary {
    let Some(mnemonic) = mnemonic(body) else {
        return Summary::truncated(String::new());
    };

    // 现有显示格式在助记符后输出两个引号，保持不变
    let mut text = mnemonic_text(&mnemonic, "\"\"");
    let Some(&status) = body.get(AT_RESPONSE_STATUS_OFFSET) else {
        return Summary::truncated(text);
    };

    text.push_str(&format_hex_values(&body[AT_RESPONSE_VALUE_OFFSET..]));
    text.push_str(&format!(", cmd status {status}"));
    Summary::text(text)
}

/// 调制解调器状态（0x8A）
pub fn modem_status(body: &[u8]) -> Summary {
    match body.get(1) {
        Some(status) => Summary::text(format!("{status:#x}")),
        None => Summary::truncated(String::new()),
    }
}

/// 接收包（0x90）
pub fn receive_packet(body: &[u8]) -> Summary {
    if body.len() < RECEIVE_PACKET_HEADER_LEN {
        return Summary::truncated(String::new());
    }

    let payload = &body[RECEIVE_PACKET_HEADER_LEN..];
    Summary {
        text: format!(
            " {} bytes payload, receive options 0x{:02X}",
            payload.len(),
            body[RECEIVE_OPTIONS_OFFSET]
        ),
        payload: Some(format_hex_values(payload)),
        truncated: false,
    }
}

/// 发送请求（0x10）
pub fn transmit_request(body: &[u8]) -> Summary {
    if body.len() < TRANSMIT_REQUEST_HEADER_LEN {
        return Summary::truncated(String::new());
    }

    let payload = &body[TRANSMIT_REQUEST_HEADER_LEN..];
    Summary {
        text: format!(
            " {} bytes payload, transmit options 0x{:02X}",
            payload.len(),
            body[TRANSMIT_OPTIONS_OFFSET]
        ),
        payload: Some(format_hex_values(payload)),
        truncated: false,
    }
}
