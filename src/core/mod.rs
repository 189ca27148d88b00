//! Core module containing the order model, errors and the transport seam

pub mod error;
pub mod order;
pub mod pagination;
pub mod roles;
pub mod transport;
pub mod validation;

pub use error::{AdminError, FieldErrors};
pub use order::{Order, OrderField, OrderForm, OrderId};
pub use pagination::{PaginatedResult, PaginationParams, SortDirection};
pub use roles::Roles;
pub use transport::ApiTransport;
