use tonic::Status;

pub type Result<T> = std::result::Result<T, PollsError>;

#[derive(Debug, thiserror::Error)]
pub enum PollsError {
    /// No published question with this id. Unpublished questions report this
    /// too so their existence is not disclosed.
    #[error("question {0} not found")]
    NotFound(u64),

    #[error("publication offset of {0} days is out of range")]
    InvalidOffset(i64),

    #[error("store error: {0}")]
    Store(#[from] sled::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

impl From<PollsError> for Status {
    fn from(e: PollsError) -> Self {
        match e {
            PollsError::NotFound(_) => Status::not_found(e.to_string()),
            PollsError::InvalidOffset(_) => Status::invalid_argument(e.to_string()),
            PollsError::Store(_) | PollsError::Encoding(_) => {
                log::error!("Encountered an error while talking to the database! {}", e);
                Status::internal("internal error")
            }
        }
    }
}
