use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation request failed")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Generation API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Generation API returned no choices")]
    EmptyResponse,
}
