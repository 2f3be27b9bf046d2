pub mod atcoder;

pub use atcoder::client::{AtCoderProblemsClient, SubmissionApi, SubmissionApiError};
pub use atcoder::model::Submission;
