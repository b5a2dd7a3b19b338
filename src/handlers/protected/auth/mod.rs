mod password;
mod verify;

pub use password::change_password;
pub use verify::verify_token;
