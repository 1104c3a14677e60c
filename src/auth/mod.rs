//! User authentication: private-cookie sessions, guards for protected routes,
//! and the log in/out handlers.

mod cookie;
mod log_in;
mod log_out;
mod middleware;

pub(crate) use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
