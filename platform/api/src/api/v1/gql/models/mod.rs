pub mod booking;
pub mod customer;
pub mod field;
pub mod offer;
pub mod owner;
pub mod payment;
pub mod quote;
pub mod review;
pub mod search_result;
pub mod service;
pub mod session;
pub mod setup;
pub mod subscription;
pub mod ulid;
