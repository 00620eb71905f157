pub mod attendance;
pub mod leave_request;
pub mod student;
pub mod user_role;
