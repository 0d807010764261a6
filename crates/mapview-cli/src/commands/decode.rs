//! Decode command implementation.

use mapview_codec::DecodedFrame;
use tokio::io::AsyncReadExt;

use crate::cli::DecodeArgs;
use crate::error::Result;

/// Execute the decode command.
pub async fn execute(args: DecodeArgs) -> Result<()> {
    let input = if args.token == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        args.token
    };

    let frame = mapview_codec::decode(extract_token(&input))?;
    println!("{}", format_frame(&frame, args.json)?);
    Ok(())
}

/// Token part of `input`: whatever follows the last `#` of a link, trimmed.
pub fn extract_token(input: &str) -> &str {
    let input = input.trim();
    match input.rfind('#') {
        Some(index) => &input[index + 1..],
        None => input,
    }
}

fn format_frame(frame: &DecodedFrame, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(frame)?)
    } else {
        Ok(format!("{}\n{}", frame.code, frame.pretty_map()))
    }
}
