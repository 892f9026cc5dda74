pub mod customer;
pub mod field;
pub mod owner;
pub mod rating;
pub mod service;

pub use customer::CustomerByIdLoader;
pub use field::FieldByIdLoader;
pub use owner::OwnerByIdLoader;
pub use rating::RatingByFieldLoader;
pub use service::ServicesByFieldLoader;

/// Error shared by every loader. Loader errors must be `Clone` because one
/// failed batch is reported to each waiting caller.
pub type LoaderError = std::sync::Arc<sqlx::Error>;
