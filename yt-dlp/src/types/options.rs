/// Flags passed to a single metadata extraction.
///
/// The default value is yt-dlp's own default behaviour: no format
/// selection, playlists expanded, and a missing format is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Format-selection hint, passed through verbatim as `-f`.
    pub format: Option<String>,
    pub no_playlist: bool,
    pub ignore_no_formats_error: bool
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn no_playlist(mut self, no_playlist: bool) -> Self {
        self.no_playlist = no_playlist;
        self
    }

    pub fn ignore_no_formats_error(mut self, ignore: bool) -> Self {
        self.ignore_no_formats_error = ignore;
        self
    }
}
