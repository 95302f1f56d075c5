pub mod batch;
pub mod preview;
pub mod stamp;
