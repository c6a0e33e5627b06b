use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use crate::command::CommandBuilder;
use crate::error::{Error, Result};
use crate::types::{ExtractOptions, Metadata};

#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies_file: Option<PathBuf>,
    extra_args: Vec<String>,
    env_vars: HashMap<String, String>
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlp {
    pub fn new() -> Self {
        Self::with_binary("yt-dlp")
    }

    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            binary: path.into(),
            cookies_file: None,
            extra_args: Vec::new(),
            env_vars: HashMap::new()
        }
    }

    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }

    pub fn set_cookies_file(&mut self, path: Option<PathBuf>) {
        self.cookies_file = path;
    }

    pub fn set_extra_args(&mut self, args: Vec<String>) {
        self.extra_args = args;
    }

    pub fn set_env(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }

    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env_vars.get(key).map(String::as_str)
    }

    pub async fn check_binary(&self) -> Result<String> {
        let output = CommandBuilder::new(&self.binary)
            .arg("--version")
            .build_with_env(&self.env_vars)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::BinaryNotExecutable(self.binary.clone()))
        }
    }

    /// Extracts metadata for `url` without downloading anything.
    ///
    /// The yt-dlp process lives only as long as the returned future: it is
    /// reaped on completion and killed if the future is dropped first.
    pub async fn extract_info(&self, url: &str, options: &ExtractOptions) -> Result<Metadata> {
        if url.trim().is_empty() {
            return Err(Error::InvalidUrl(url.to_string()));
        }

        let builder = self
            .command()
            .single_json_output()
            .no_progress()
            .with_options(options)
            .url(url);

        tracing::debug!(
            binary = %self.binary.display(),
            args = ?builder.get_args(),
            "spawning yt-dlp"
        );

        let output = builder
            .build_with_env(&self.env_vars)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = output.status.code().unwrap_or(-1);
            return Err(Error::CommandFailed {
                code,
                message: error_message(&stderr, code)
            });
        }

        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        Ok(Metadata::new(value).sanitize())
    }

    fn command(&self) -> CommandBuilder {
        CommandBuilder::new(&self.binary)
            .cookies_file_opt(self.cookies_file.as_ref())
            .args(self.extra_args.iter().map(String::as_str))
    }

    fn spawn_error(&self, err: std::io::Error) -> Error {
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::BinaryNotFound(self.binary.clone()),
            std::io::ErrorKind::PermissionDenied => Error::BinaryNotExecutable(self.binary.clone()),
            _ => Error::ExecutionFailed(err)
        }
    }
}

/// Picks the message yt-dlp reported for a failed run: the last `ERROR:`
/// line, then the whole trimmed stderr, then the exit code alone.
fn error_message(stderr: &str, code: i32) -> String {
    if let Some(line) = stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with("ERROR:"))
    {
        return line.to_string();
    }

    match stderr.trim() {
        "" => format!("yt-dlp exited with code {code}"),
        trimmed => trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_last_error_line() {
        let stderr = "WARNING: [youtube] falling back\n\
                      ERROR: [youtube] first\n\
                      ERROR: [youtube] BaW_jenozKc: Video unavailable\n";
        assert_eq!(
            error_message(stderr, 1),
            "ERROR: [youtube] BaW_jenozKc: Video unavailable"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_stderr() {
        assert_eq!(error_message("  something broke \n", 1), "something broke");
        assert_eq!(error_message(" \n", 2), "yt-dlp exited with code 2");
    }

    #[test]
    fn test_ytdlp_default() {
        let client = YtDlp::default();
        assert_eq!(client.binary, PathBuf::from("yt-dlp"));
        assert!(client.cookies_file.is_none());
        assert!(client.extra_args.is_empty());
    }

    #[test]
    fn test_ytdlp_with_binary() {
        let client = YtDlp::with_binary("/usr/local/bin/yt-dlp");
        assert_eq!(client.binary(), &PathBuf::from("/usr/local/bin/yt-dlp"));
    }

    #[test]
    fn test_ytdlp_set_cookies_and_extra_args() {
        let mut client = YtDlp::new();
        client.set_cookies_file(Some(PathBuf::from("/tmp/cookies.txt")));
        client.set_extra_args(vec![
            "--extractor-args".to_string(),
            "youtube:player-client=mweb".to_string()
        ]);
        assert_eq!(client.cookies_file, Some(PathBuf::from("/tmp/cookies.txt")));
        assert_eq!(client.command().get_args(), &[
            "--cookies", "/tmp/cookies.txt",
            "--extractor-args", "youtube:player-client=mweb"
        ]);
    }

    #[test]
    fn test_ytdlp_env_vars() {
        let mut client = YtDlp::new();
        client.set_env("PATH_PREPEND".to_string(), "/opt/bin".to_string());
        assert_eq!(client.env_var("PATH_PREPEND"), Some("/opt/bin"));
        assert_eq!(client.env_var("HOME"), None);
    }

    #[tokio::test]
    async fn test_extract_info_rejects_empty_url() {
        let client = YtDlp::new();
        let err = client.extract_info("  ", &ExtractOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_extract_info_missing_binary() {
        let client = YtDlp::with_binary("/nonexistent/bin/yt-dlp");
        let err = client
            .extract_info("https://example.com/x", &ExtractOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BinaryNotFound(_)));
        assert!(err.exit_code().is_none());
    }

    #[tokio::test]
    async fn test_check_binary_missing_binary() {
        let client = YtDlp::with_binary("/nonexistent/bin/yt-dlp");
        assert!(matches!(client.check_binary().await, Err(Error::BinaryNotFound(_))));
    }

    // `sh -c <script>` stands in for yt-dlp; the appended yt-dlp arguments
    // become positional parameters the script ignores.
    #[cfg(unix)]
    fn fake_ytdlp(script: &str) -> YtDlp {
        let mut client = YtDlp::with_binary("sh");
        client.set_extra_args(vec!["-c".to_string(), script.to_string()]);
        client
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_info_parses_and_sanitizes_output() {
        let client = fake_ytdlp(r#"printf '%s' '{"id":"abc","title":"T","__files_to_move":{}}'"#);
        let metadata = client
            .extract_info("https://example.com/x", &ExtractOptions::new().format("best"))
            .await
            .unwrap();
        assert_eq!(metadata.id(), Some("abc"));
        assert_eq!(metadata.title(), Some("T"));
        assert!(metadata.as_value().get("__files_to_move").is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_info_reports_command_failure() {
        let client = fake_ytdlp(
            "echo 'WARNING: retrying' >&2; echo 'ERROR: [generic] Unsupported URL: x' >&2; exit 1"
        );
        let err = client
            .extract_info("https://example.com/x", &ExtractOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), Some(1));
        assert_eq!(err.to_string(), "ERROR: [generic] Unsupported URL: x");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_info_silent_failure_reports_exit_code() {
        let client = fake_ytdlp("exit 3");
        let err = client
            .extract_info("https://example.com/x", &ExtractOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
        assert_eq!(err.to_string(), "yt-dlp exited with code 3");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_info_applies_path_prepend() {
        let dir = std::env::temp_dir().join(format!("ytdlp-path-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut client = fake_ytdlp(r#"printf '{"id":"%s"}' "${PATH%%:*}""#);
        client.set_env("PATH_PREPEND".to_string(), dir.display().to_string());
        let metadata = client
            .extract_info("https://example.com/x", &ExtractOptions::default())
            .await
            .unwrap();
        assert_eq!(metadata.id(), Some(dir.display().to_string().as_str()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_info_rejects_invalid_json() {
        let client = fake_ytdlp("echo 'not json'");
        let err = client
            .extract_info("https://example.com/x", &ExtractOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::JsonParseFailed(_)));
    }
}
