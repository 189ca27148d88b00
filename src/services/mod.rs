//! Domain services wrapping the REST resources

pub mod order;
pub mod user;

pub use order::{OrderPayload, OrderService, parse_quantity};
pub use user::UserService;
