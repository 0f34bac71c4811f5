pub mod request;
pub mod scene;
