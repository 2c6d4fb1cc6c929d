pub mod jobs;
pub mod replies;
pub mod sampling;
