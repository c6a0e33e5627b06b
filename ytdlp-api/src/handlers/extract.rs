use axum::{
    Json,
    extract::{Query, State}
};
use axum_extra::extract::WithRejection;
use yt_dlp::{ExtractOptions, Metadata};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of `GET /info`. Both fields are required; they are optional
/// here so the handler can name the missing one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InfoQuery {
    pub url: Option<String>,
    pub format: Option<String>
}

impl InfoQuery {
    /// Takes the first value of each parameter; repeats are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "url" if query.url.is_none() => query.url = Some(value),
                "format" if query.format.is_none() => query.format = Some(value),
                _ => {}
            }
        }
        query
    }
}

#[tracing::instrument(skip(state))]
pub async fn ytdlp(State(state): State<AppState>) -> Result<Json<Metadata>, ApiError> {
    let url = &state.config.ytdlp.demo_url;

    let metadata = state
        .extractor
        .extract(url, &ExtractOptions::default())
        .await?;

    tracing::info!(id = ?metadata.id(), title = ?metadata.title(), "extracted demo video");

    Ok(Json(metadata))
}

#[tracing::instrument(skip_all)]
pub async fn info(
    State(state): State<AppState>,
    WithRejection(Query(pairs), _): WithRejection<Query<Vec<(String, String)>>, ApiError>
) -> Result<Json<Metadata>, ApiError> {
    let query = InfoQuery::from_pairs(pairs);
    let format = query.format.ok_or(ApiError::MissingParam("format"))?;
    let url = query.url.ok_or(ApiError::MissingParam("url"))?;

    tracing::info!(%url, %format, "extracting info");

    let options = ExtractOptions::new()
        .format(format)
        .no_playlist(true)
        .ignore_no_formats_error(true);

    let metadata = state.extractor.extract(&url, &options).await?;

    Ok(Json(metadata))
}
