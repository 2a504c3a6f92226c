pub mod fake;
pub mod gateway;

pub use gateway::{ApiError, Gateway, HttpGateway, TaskDraft};
