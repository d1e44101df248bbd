//! AT命令助记符表
//!
//! 仅用于显示增强，未收录的助记符不影响解码

/// 助记符到描述的静态映射
pub static AT_COMMANDS: &[(&str, &str)] = &[
    ("BC", "Bytes Transmitted"),
    ("CH", "Channel"),
    ("CM", "Channel Mask"),
    ("EE", "Encryption Enable"),
    ("HV", "Hardware Version"),
    ("NP", "Maximum Packet Payload Bytes"),
    ("ID", "Network ID"),
    ("KY", "AES Encryption Key"),
    ("SL", "Serial Number Low"),
    ("SH", "Serial Number High"),
    ("VR", "Firmware Version"),
];

/// 查询AT命令描述
pub fn at_command_description(mnemonic: &str) -> Option<&'static str> {
    AT_COMMANDS
        .iter()
        .find(|(name, _)| *name == mnemonic)
        .map(|(_, desc)| *desc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_mnemonic() {
        assert_eq!(at_command_description("BC"), Some("Bytes Transmitted"));
        assert_eq!(at_command_description("VR"), Some("Firmware Version"));
    }

    #[test]
    fn test_unknown_mnemonic() {
        assert_eq!(at_command_description("ZZ"), None);
        // 区分大小写
        assert_eq!(at_command_description("bc"), None);
    }
}
