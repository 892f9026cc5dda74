mod booker;
mod booking;
mod customer;
mod enums;
mod field;
mod offer;
mod owner;
mod payment;
mod review;
mod search_result;
mod service;
mod session;
mod subscription;

pub use booker::*;
pub use booking::*;
pub use customer::*;
pub use enums::*;
pub use field::*;
pub use offer::*;
pub use owner::*;
pub use payment::*;
pub use review::*;
pub use search_result::*;
pub use service::*;
pub use session::*;
pub use subscription::*;
