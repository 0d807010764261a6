//! Encode command implementation.

use serde_json::Value;
use tokio::fs;

use crate::cli::EncodeArgs;
use crate::error::{Result, ResultExt};

/// Execute the encode command.
///
/// # Errors
///
/// Fails when a file cannot be read or the map file is not JSON.
pub async fn execute(args: EncodeArgs) -> Result<()> {
    let token = encode_files(&args).await?;

    if args.link {
        println!("{}", mapview_codec::visualizer_link(&token));
    } else {
        println!("{token}");
    }
    Ok(())
}

/// Read the code and map files of `args` and encode them.
pub async fn encode_files(args: &EncodeArgs) -> Result<String> {
    let code = fs::read_to_string(&args.code).await.with_path(&args.code)?;

    let map = match &args.map {
        Some(path) => {
            let text = fs::read_to_string(path).await.with_path(path)?;
            serde_json::from_str::<Value>(&text)
                .with_hint(format!("{} must contain a JSON source map", path.display()))?
        }
        None => Value::Null,
    };

    tracing::debug!(code = %args.code.display(), has_map = !map.is_null(), "encoding");
    Ok(mapview_codec::encode(&code, &map)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_encode_files_without_map() {
        let temp = TempDir::new().unwrap();
        let code = temp.path().join("out.js");
        std::fs::write(&code, "let a;").unwrap();

        let args = EncodeArgs {
            code,
            map: None,
            link: false,
        };
        let token = encode_files(&args).await.unwrap();
        assert_eq!(token, mapview_codec::encode("let a;", &Value::Null).unwrap());
    }

    #[tokio::test]
    async fn test_invalid_map_has_hint() {
        let temp = TempDir::new().unwrap();
        let code = temp.path().join("out.js");
        let map = temp.path().join("out.js.map");
        std::fs::write(&code, "").unwrap();
        std::fs::write(&map, "{ not json").unwrap();

        let args = EncodeArgs {
            code,
            map: Some(map),
            link: false,
        };
        let err = encode_files(&args).await.unwrap_err();
        assert!(err.to_string().contains("must contain a JSON source map"));
    }

    #[tokio::test]
    async fn test_missing_code_file() {
        let args = EncodeArgs {
            code: PathBuf::from("/definitely/missing.js"),
            map: None,
            link: false,
        };
        assert!(matches!(
            encode_files(&args).await,
            Err(CliError::FileNotFound(_))
        ));
    }
}
