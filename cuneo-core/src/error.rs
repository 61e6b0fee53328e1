use reqwest::StatusCode;
use thiserror::Error;

/// External services this crate talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    OpenMeteo,
    OpenAi,
}

impl Upstream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Upstream::OpenMeteo => "Open-Meteo",
            Upstream::OpenAi => "OpenAI",
        }
    }
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while calling an upstream API.
///
/// All variants currently surface as the same HTTP status; the split exists so
/// callers can tell an unreachable upstream from one that refused the request
/// or one that answered with something we could not read.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// `detail` holds the whole cause chain, down to the OS error.
    #[error("request to {upstream} failed: {detail}")]
    Transport {
        upstream: Upstream,
        detail: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{upstream} responded with status {status}: {message}")]
    Rejected {
        upstream: Upstream,
        status: StatusCode,
        message: String,
    },

    #[error("could not process {upstream} response: {detail}")]
    Decode { upstream: Upstream, detail: String },
}

impl UpstreamError {
    pub fn upstream(&self) -> Upstream {
        match self {
            UpstreamError::Transport { upstream, .. }
            | UpstreamError::Rejected { upstream, .. }
            | UpstreamError::Decode { upstream, .. } => *upstream,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport { .. } => "transport",
            UpstreamError::Rejected { .. } => "rejected",
            UpstreamError::Decode { .. } => "decode",
        }
    }

    pub(crate) fn transport(upstream: Upstream, source: reqwest::Error) -> Self {
        UpstreamError::Transport { upstream, detail: error_chain(&source), source }
    }

    pub(crate) fn decode(upstream: Upstream, detail: impl std::fmt::Display) -> Self {
        UpstreamError::Decode { upstream, detail: detail.to_string() }
    }
}

/// Join an error and its sources with `: `, skipping causes whose text a
/// previous layer already printed.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        let text = e.to_string();
        if !chain.contains(&text) {
            chain.push_str(": ");
            chain.push_str(&text);
        }
        cause = e.source();
    }
    chain
}
