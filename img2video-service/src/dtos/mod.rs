pub mod img2video;

pub use img2video::{GenericTaskResponse, Img2VideoRequest, TaskStatus};
