//! XAPI (XBee API frame decoder) Application
//!
//! Feeds a byte capture through the frame decoder and prints one line per
//! decoded frame.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use xapi_core::{utils::hex_to_bytes, ApiMode, ByteEvent, DecodedFrame, DecoderConfig, StreamDecoder};
use xapi_rx::FrameDecoder;

#[derive(Parser, Debug)]
#[command(name = "xapi", author, version, about = "Decode XBee API frames from a byte capture", long_about = None)]
struct Args {
    /// Capture file to decode, `-` reads stdin
    input: String,

    /// Treat the input as raw bytes instead of hex text
    #[arg(long)]
    binary: bool,

    /// API mode: 1 (unescaped) or 2 (escaped); overrides --config
    #[arg(short, long)]
    mode: Option<ApiMode>,

    /// JSON decoder configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Timestamp ticks per byte
    #[arg(long, default_value_t = 1)]
    byte_time: u64,

    /// Print one JSON object per frame
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn resolve_config(args: &Args) -> Result<DecoderConfig> {
    let mut config = match &args.config {
        Some(path) => DecoderConfig::from_json_file(path)?,
        None => DecoderConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.api_mode = mode;
    }
    Ok(config)
}

async fn read_input(input: &str) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    if input == "-" {
        tokio::io::stdin()
            .read_to_end(&mut data)
            .await
            .context("failed to read stdin")?;
    } else {
        data = tokio::fs::read(input)
            .await
            .with_context(|| format!("failed to read {input}"))?;
    }
    Ok(data)
}

fn parse_capture(raw: &[u8], binary: bool) -> Result<Vec<u8>> {
    if binary {
        return Ok(raw.to_vec());
    }
    let text = std::str::from_utf8(raw).context("hex capture is not valid UTF-8")?;
    Ok(hex_to_bytes(text)?)
}

fn run_decoder<D: StreamDecoder>(decoder: &mut D, events: &[ByteEvent]) -> Vec<D::Output> {
    events
        .iter()
        .filter_map(|event| decoder.decode(event))
        .collect()
}

fn render_text(frame: &DecodedFrame) -> String {
    format!(
        "[{}..{}] {} | payload: {}",
        frame.start_time,
        frame.end_time,
        frame.label(),
        frame.payload_or_placeholder()
    )
}

fn render(frame: &DecodedFrame, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(frame)?)
    } else {
        Ok(render_text(frame))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = resolve_config(&args)?;
    let raw = read_input(&args.input).await?;
    let bytes = parse_capture(&raw, args.binary)?;
    log::info!(
        "Decoding {} bytes in API mode {}",
        bytes.len(),
        config.api_mode
    );

    let mut decoder = FrameDecoder::new(config);
    let events = ByteEvent::sequence(&bytes, args.byte_time);
    let frames = run_decoder(&mut decoder, &events);

    let mut out = std::io::stdout().lock();
    for frame in &frames {
        writeln!(out, "{}", render(frame, args.json)?)?;
    }

    if decoder.is_mid_frame() {
        log::warn!(
            "Capture ended inside a frame (state {:?})",
            decoder.state()
        );
    }
    if args.verbose {
        eprintln!("{}", serde_json::to_string(decoder.stats())?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT_REQUEST_HEX: &str = "7E 00 04 08 01 42 43 71";

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["xapi", "-m", "2", "--json", "capture.txt"]).unwrap();
        assert_eq!(args.mode, Some(ApiMode::Escaped));
        assert!(args.json);
        assert_eq!(args.byte_time, 1);
        assert_eq!(args.input, "capture.txt");

        assert!(Args::try_parse_from(["xapi", "-m", "3", "capture.txt"]).is_err());
    }

    #[test]
    fn test_mode_flag_overrides_default() {
        let args = Args::try_parse_from(["xapi", "--mode", "2", "-"]).unwrap();
        assert_eq!(resolve_config(&args).unwrap().api_mode, ApiMode::Escaped);

        let args = Args::try_parse_from(["xapi", "-"]).unwrap();
        assert_eq!(resolve_config(&args).unwrap().api_mode, ApiMode::Unescaped);
    }

    #[test]
    fn test_parse_capture() {
        let bytes = parse_capture(AT_REQUEST_HEX.as_bytes(), false).unwrap();
        assert_eq!(bytes, vec![0x7E, 0x00, 0x04, 0x08, 0x01, 0x42, 0x43, 0x71]);

        let raw = [0x7E, 0x00];
        assert_eq!(parse_capture(&raw, true).unwrap(), raw.to_vec());
        assert!(parse_capture(b"zz", false).is_err());
    }

    #[test]
    fn test_decode_and_render() {
        let bytes = parse_capture(AT_REQUEST_HEX.as_bytes(), false).unwrap();
        let mut decoder = FrameDecoder::default();
        let frames = run_decoder(&mut decoder, &ByteEvent::sequence(&bytes, 10));
        assert_eq!(frames.len(), 1);
        assert_eq!(
            render(&frames[0], false).unwrap(),
            "[0..80] Local AT command request, \"BC\" (Bytes Transmitted)  | payload: -"
        );

        let json = render(&frames[0], true).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"frame_type\":\"Local AT command request\""));
    }
}
