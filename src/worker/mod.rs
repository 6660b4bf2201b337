pub mod upload_worker;

pub use upload_worker::{Submission, UploadWorker};
