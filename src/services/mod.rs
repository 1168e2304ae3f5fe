pub mod file_ingest;
pub mod table_renderer;
pub mod validator;

pub use file_ingest::UploadedFile;
pub use validator::{validate, validate_list, MAX_BATCH_SIZE};
