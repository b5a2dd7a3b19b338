mod admins;
mod dashboard;
mod properties;

pub use admins::{create_admin, list_admins, update_admin_status};
pub use dashboard::dashboard;
pub use properties::{
    create_property, list_properties_by_type, property_details, reset_occupant_password,
    update_occupant,
};
