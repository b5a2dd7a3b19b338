mod delete;
mod download;
mod list;
mod upload;

pub use delete::delete_file;
pub use download::download_file;
pub use list::{occupant_files, property_files};
pub use upload::upload_file;

use serde_json::{json, Value};

use crate::database::models::file_upload::FileUpload;

/// Client view of a stored file: everything but the disk path
pub(crate) fn file_view(file: &FileUpload) -> Value {
    json!({
        "id": file.id,
        "property_id": file.property_id,
        "file_title": file.file_title,
        "description": file.description,
        "file_name": file.file_name,
        "file_size": file.file_size,
        "uploaded_by": file.uploaded_by,
        "uploaded_at": file.created_at,
    })
}
