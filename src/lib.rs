pub mod error;
pub mod service;
pub mod settings;
pub mod store;
pub mod structures;

pub mod polls {
    tonic::include_proto!("polls"); // The string specified here must match the proto package name
}

pub use error::{PollsError, Result};
pub use service::PollsAPI;
pub use settings::Settings;
pub use store::QuestionStore;
pub use structures::{Question, QuestionSeed};
