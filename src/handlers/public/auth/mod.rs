mod login;

pub use login::{admin_login, occupant_login};
