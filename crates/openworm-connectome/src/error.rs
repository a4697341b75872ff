//! Error types for the openworm-connectome crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectomeError {
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Resource unreachable: {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed {resource} table at line {line}: {message}")]
    Parse {
        resource: &'static str,
        line: u64,
        message: String,
    },
}

impl ConnectomeError {
    /// True for failures to reach a resource, as opposed to malformed content
    /// or a client that could not be set up.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConnectomeError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn builder_error() -> reqwest::Error {
        reqwest::Client::new()
            .get("not a url")
            .send()
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn test_client_setup_is_not_transport() {
        let err = ConnectomeError::Client(builder_error().await);
        assert!(!err.is_transport());

        let err = ConnectomeError::Transport {
            url: "http://127.0.0.1:1/neurons.csv".to_string(),
            source: builder_error().await,
        };
        assert!(err.is_transport());
    }
}
