mod upload_stager;

pub use upload_stager::{StagedUpload, StagingError, UploadStager};
