//! 流量生成器模块
//!
//! 按API帧格式组装线路字节，用于构造测试流量：
//! 定界符、两字节大端长度、帧体、校验字节，模式2下对帧内特殊字节转义。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xapi_core::{
    utils::calculate_checksum, ApiMode, FrameType, ProtocolError, DELIMITER, ESCAPE, ESCAPE_XOR,
    XOFF, XON,
};

/// 可生成的最大帧体长度
///
/// 解码端对长度高字节乘以10，只有高字节为0时两端长度一致。
pub const MAX_BODY_LEN: usize = u8::MAX as usize;

/// 帧组装器
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameBuilder {
    mode: ApiMode,
}

impl FrameBuilder {
    pub fn new(mode: ApiMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ApiMode {
        self.mode
    }

    /// 组装帧，自动计算校验字节
    pub fn build(&self, body: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        self.build_with_checksum(body, calculate_checksum(body))
    }

    /// 以指定校验字节组装帧（可用于构造校验错误的帧）
    pub fn build_with_checksum(&self, body: &[u8], checksum: u8) -> Result<Vec<u8>, ProtocolError> {
        if body.len() > MAX_BODY_LEN {
            return Err(ProtocolError::LengthError(format!(
                "frame body of {} bytes exceeds {} bytes",
                body.len(),
                MAX_BODY_LEN
            )));
        }

        let mut frame = Vec::with_capacity(body.len() + 4);
        frame.push(DELIMITER);

        let length = (body.len() as u16).to_be_bytes();
        for &byte in length.iter().chain(body).chain(std::iter::once(&checksum)) {
            self.push_byte(&mut frame, byte);
        }

        Ok(frame)
    }

    fn push_byte(&self, frame: &mut Vec<u8>, byte: u8) {
        if self.mode.is_escaped() && needs_escape(byte) {
            frame.push(ESCAPE);
            frame.push(byte ^ ESCAPE_XOR);
        } else {
            frame.push(byte);
        }
    }
}

/// 模式2中需要转义的字节
pub fn needs_escape(byte: u8) -> bool {
    matches!(byte, DELIMITER | ESCAPE | XON | XOFF)
}

/// 构造各帧类型的帧体
pub mod body {
    use super::*;

    fn mnemonic_bytes(mnemonic: &str) -> Result<[u8; 2], ProtocolError> {
        match mnemonic.as_bytes() {
            [a, b] if mnemonic.is_ascii() => Ok([*a, *b]),
            _ => Err(ProtocolError::ParseError(format!(
                "AT command mnemonic must be two ASCII characters, got '{mnemonic}'"
            ))),
        }
    }

    /// 本地AT命令请求：类型、帧ID、助记符、命令值
    pub fn at_command_request(
        frame_id: u8,
        mnemonic: &str,
        value: &[u8],
    ) -> Result<Vec<u8>, ProtocolError> {
        let mut body = vec![FrameType::LocalAtCommandRequest.code(), frame_id];
        body.extend_from_slice(&mnemonic_bytes(mnemonic)?);
        body.extend_from_slice(value);
        Ok(body)
    }

    /// 本地AT命令响应：类型、帧ID、助记符、状态、命令值
    pub fn at_command_response(
        frame_id: u8,
        mnemonic: &str,
        status: u8,
        value: &[u8],
    ) -> Result<Vec<u8>, ProtocolError> {
        let mut body = vec![FrameType::LocalAtCommandResponse.code(), frame_id];
        body.extend_from_slice(&mnemonic_bytes(mnemonic)?);
        body.push(status);
        body.extend_from_slice(value);
        Ok(body)
    }

    /// 调制解调器状态：类型、状态
    pub fn modem_status(status: u8) -> Vec<u8> {
        vec![FrameType::ModemStatus.code(), status]
    }

    /// 接收包：类型、64位源地址、16位源地址、接收选项、数据
    pub fn receive_packet(addr64: u64, addr16: u16, options: u8, data: &[u8]) -> Vec<u8> {
        let mut body = vec![FrameType::ReceivePacket.code()];
        body.extend_from_slice(&addr64.to_be_bytes());
        body.extend_from_slice(&addr16.to_be_bytes());
        body.push(options);
        body.extend_from_slice(data);
        body
    }

    /// 发送请求：类型、帧ID、64位目的地址、16位目的地址、广播半径、发送选项、数据
    pub fn transmit_request(
        frame_id: u8,
        addr64: u64,
        addr16: u16,
        radius: u8,
        options: u8,
        data: &[u8],
    ) -> Vec<u8> {
        let mut body = vec![FrameType::TransmitRequest.code(), frame_id];
        body.extend_from_slice(&addr64.to_be_bytes());
        body.extend_from_slice(&addr16.to_be_bytes());
        body.push(radius);
        body.push(options);
        body.extend_from_slice(data);
        body
    }
}

/// 随机流量生成器
pub struct TrafficGenerator {
    builder: FrameBuilder,
    rng: StdRng,
    sequence_number: u8,
}

impl TrafficGenerator {
    /// 使用指定种子创建（用于可重复测试）
    pub fn with_seed(mode: ApiMode, seed: u64) -> Self {
        Self {
            builder: FrameBuilder::new(mode),
            rng: StdRng::seed_from_u64(seed),
            sequence_number: 0,
        }
    }

    fn random_byte(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        self.rng.fill_bytes(&mut buf);
        buf[0]
    }

    fn random_bytes(&mut self, max_len: usize) -> Vec<u8> {
        let len = self.random_byte() as usize % (max_len + 1);
        let mut bytes = vec![0u8; len];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }

    fn random_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.rng.fill_bytes(&mut buf);
        u64::from_be_bytes(buf)
    }

    /// 生成一个随机的已知类型帧体
    pub fn next_body(&mut self) -> Result<Vec<u8>, ProtocolError> {
        self.sequence_number = self.sequence_number.wrapping_add(1);
        let frame_id = self.sequence_number;
        let (mnemonic, _) = xapi_core::AT_COMMANDS
            [self.random_byte() as usize % xapi_core::AT_COMMANDS.len()];

        let body = match self.random_byte() % 5 {
            0 => {
                let value = self.random_bytes(4);
                body::at_command_request(frame_id, mnemonic, &value)?
            }
            1 => {
                let status = self.random_byte() % 5;
                let value = self.random_bytes(4);
                body::at_command_response(frame_id, mnemonic, status, &value)?
            }
            2 => body::modem_status(self.random_byte()),
            3 => {
                let addr64 = self.random_u64();
                let options = self.random_byte();
                let data = self.random_bytes(32);
                body::receive_packet(addr64, 0xFFFE, options, &data)
            }
            _ => {
                let addr64 = self.random_u64();
                let options = self.random_byte();
                let data = self.random_bytes(32);
                body::transmit_request(frame_id, addr64, 0xFFFE, 0, options, &data)
            }
        };
        Ok(body)
    }

    /// 生成由count个帧组成的字节流，返回线路字节和各帧帧体
    pub fn generate_stream(&mut self, count: usize) -> Result<(Vec<u8>, Vec<Vec<u8>>), ProtocolError> {
        let mut wire = Vec::new();
        let mut bodies = Vec::with_capacity(count);
        for _ in 0..count {
            let body = self.next_body()?;
            wire.extend(self.builder.build(&body)?);
            bodies.push(body);
        }
        Ok((wire, bodies))
    }

    /// 生成帧间噪声，不含定界符和转义标记
    pub fn noise(&mut self, max_len: usize) -> Vec<u8> {
        self.random_bytes(max_len)
            .into_iter()
            .map(|b| if b == DELIMITER || b == ESCAPE { 0x00 } else { b })
            .collect()
    }
}
