use ::std::fmt::{self, Display};

pub type Result<T> = ::std::result::Result<T, AppManagerError>;

/// Category of an [AppManagerError].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    IllegalArgument,
    /// The target of a wait is not a legal state for the resource kind.
    InvalidState,
    /// Fetching the resource failed while polling for a state change.
    FailToFetch,
    /// The wait deadline passed before the target state was observed.
    Timeout,
    /// The service answered with a non-2xx status code.
    Api(u16),
    FailToSendRequest,
    FailToDecodeResponse,
    FailToResolveImage,
    FailToLoadConfig,
}

#[derive(Debug)]
pub struct AppManagerError {
    error_type: ErrorType,
    source: anyhow::Error,
}

macro_rules! error_constructor {
    ($fn_name: ident, $error_type: expr) => {
        pub fn $fn_name<E: Into<anyhow::Error>>(e: E) -> Self {
            Self::new($error_type, e)
        }
    };
}

impl AppManagerError {
    fn new<E: Into<anyhow::Error>>(error_type: ErrorType, source: E) -> Self {
        Self {
            error_type,
            source: source.into(),
        }
    }

    error_constructor!(illegal_argument, ErrorType::IllegalArgument);
    error_constructor!(invalid_state, ErrorType::InvalidState);
    error_constructor!(fail_to_fetch, ErrorType::FailToFetch);
    error_constructor!(timeout, ErrorType::Timeout);
    error_constructor!(fail_to_send_request, ErrorType::FailToSendRequest);
    error_constructor!(fail_to_decode_response, ErrorType::FailToDecodeResponse);
    error_constructor!(fail_to_resolve_image, ErrorType::FailToResolveImage);
    error_constructor!(fail_to_load_config, ErrorType::FailToLoadConfig);

    /// Non-2xx response from the service with status code `status`.
    pub fn api<E: Into<anyhow::Error>>(status: u16, e: E) -> Self {
        Self::new(ErrorType::Api(status), e)
    }

    pub fn get_error_type(&self) -> ErrorType {
        self.error_type
    }

    /// HTTP status of the response that caused this error, if there was one.
    /// Looks through [ErrorType::FailToFetch] to the wrapped cause.
    pub fn status(&self) -> Option<u16> {
        match self.error_type {
            ErrorType::Api(status) => Some(status),
            ErrorType::FailToFetch => self
                .source
                .downcast_ref::<AppManagerError>()
                .and_then(AppManagerError::status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn source_error(&self) -> &anyhow::Error {
        &self.source
    }
}

impl Display for AppManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_type {
            ErrorType::IllegalArgument => write!(f, "Illegal argument: {}", self.source),
            ErrorType::InvalidState => write!(f, "Invalid state: {}", self.source),
            ErrorType::FailToFetch => write!(f, "Fail to fetch resource: {}", self.source),
            ErrorType::Timeout => write!(f, "Timeout: {}", self.source),
            // the service already composes a user facing message
            ErrorType::Api(_) => write!(f, "{}", self.source),
            ErrorType::FailToSendRequest => write!(f, "Fail to send request: {}", self.source),
            ErrorType::FailToDecodeResponse => {
                write!(f, "Fail to decode response: {}", self.source)
            }
            ErrorType::FailToResolveImage => {
                write!(f, "Fail to resolve Flink image: {}", self.source)
            }
            ErrorType::FailToLoadConfig => write!(f, "Fail to load config: {}", self.source),
        }
    }
}

impl ::std::error::Error for AppManagerError {}
