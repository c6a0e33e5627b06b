//! Async Rust wrapper for yt-dlp CLI metadata extraction.
//!
//! This library runs the yt-dlp command-line tool as a child process and
//! returns the extracted metadata as an opaque JSON document. Nothing is
//! downloaded: every call runs in simulation mode.
//!
//! # Example
//!
//! ```no_run
//! use yt_dlp::{ExtractOptions, YtDlp};
//!
//! #[tokio::main]
//! async fn main() -> yt_dlp::Result<()> {
//!     let client = YtDlp::new();
//!
//!     // Check that yt-dlp is available
//!     let version = client.check_binary().await?;
//!     println!("yt-dlp version: {}", version);
//!
//!     let options = ExtractOptions::new()
//!         .format("best")
//!         .no_playlist(true)
//!         .ignore_no_formats_error(true);
//!
//!     let metadata = client
//!         .extract_info("https://www.youtube.com/watch?v=BaW_jenozKc", &options)
//!         .await?;
//!     println!("Title: {:?}", metadata.title());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod command;
pub mod error;
pub mod types;

pub use client::YtDlp;
pub use error::{Error, Result};
pub use types::{ExtractOptions, Metadata};
