mod download;
mod list;
mod manage;
mod send;

pub use download::download_communication;
pub use list::{occupant_communications, property_communications};
pub use manage::{delete_communication, mark_read};
pub use send::{send_bulk, send_individual};

use serde_json::{json, Value};

use crate::database::models::communication::Communication;

/// Client view of a communication: everything but the disk path
pub(crate) fn communication_view(comm: &Communication) -> Value {
    json!({
        "id": comm.id,
        "recipient_type": comm.recipient_type,
        "recipient_property_id": comm.recipient_property_id,
        "file_title": comm.file_title,
        "message": comm.message,
        "file_name": comm.file_name,
        "file_size": comm.file_size,
        "status": comm.status,
        "sent_at": comm.sent_at,
    })
}
