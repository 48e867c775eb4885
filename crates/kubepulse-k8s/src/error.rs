/// Failure of a single API call.
///
/// The server's structured rejections are kept apart from everything else
/// (connection, TLS, auth plugin, decode) so callers can match on them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    /// The API server answered with a typed status
    #[error("{message}")]
    Api { code: u16, message: String },

    #[error("{0}")]
    Transport(String),
}

impl From<kube::Error> for ApiError {
    fn from(error: kube::Error) -> Self {
        match error {
            kube::Error::Api(response) if response.code == 404 => Self::NotFound,
            kube::Error::Api(response) => Self::Api {
                code: response.code,
                message: response.message,
            },
            other => Self::Transport(other.to_string()),
        }
    }
}
