use thiserror::Error;
use url::Url;

use crate::models::{HandoffParams, RegistryEntry, SessionRecord};

pub const PARAM_USERNAME: &str = "username";
pub const PARAM_ROLE: &str = "role";
pub const PARAM_SESSION_ID: &str = "sessionId";
pub const PARAM_TERMINAL: &str = "terminal";

/// Page the launcher itself is served from, relative to the pages base.
pub const LAUNCHER_PAGE: &str = "index.html";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandoffError {
    #[error("invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("launch parameter '{0}' is missing")]
    MissingParameter(&'static str),
}

/// URL a terminal of `entry`'s kind is opened at, carrying `record`'s identity.
pub fn build_launch_url(
    base: &Url,
    entry: &RegistryEntry,
    record: &SessionRecord,
) -> Result<Url, HandoffError> {
    let mut url = base.join(&entry.page)?;
    url.query_pairs_mut()
        .clear()
        .append_pair(PARAM_USERNAME, &record.username)
        .append_pair(PARAM_ROLE, &record.role)
        .append_pair(PARAM_SESSION_ID, &record.session_id)
        .append_pair(PARAM_TERMINAL, record.terminal_kind.as_str());
    Ok(url)
}

/// Reads the handoff payload back out of a terminal's URL.
///
/// `username`, `role` and `sessionId` must be present and non-empty. An
/// unrecognised `terminal` value is treated as absent.
pub fn parse_launch_url(url: &Url) -> Result<HandoffParams, HandoffError> {
    let mut username = None;
    let mut role = None;
    let mut session_id = None;
    let mut terminal = None;

    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            PARAM_USERNAME => username = Some(value.into_owned()),
            PARAM_ROLE => role = Some(value.into_owned()),
            PARAM_SESSION_ID => session_id = Some(value.into_owned()),
            PARAM_TERMINAL => terminal = value.parse().ok(),
            _ => {}
        }
    }

    Ok(HandoffParams {
        username: username.ok_or(HandoffError::MissingParameter(PARAM_USERNAME))?,
        role: role.ok_or(HandoffError::MissingParameter(PARAM_ROLE))?,
        session_id: session_id.ok_or(HandoffError::MissingParameter(PARAM_SESSION_ID))?,
        terminal,
    })
}

pub fn launcher_url(base: &Url) -> Result<Url, HandoffError> {
    Ok(base.join(LAUNCHER_PAGE)?)
}

/// Serialized origin (`scheme://host[:port]`) of `url`.
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}
