// Domain models shared by the store, services and HTTP layer

pub mod user;
pub mod preference;
pub mod catalog;
pub mod subscription;
pub mod advertising;
pub mod plan;

pub use user::*;
pub use preference::*;
pub use catalog::*;
pub use subscription::*;
pub use advertising::*;
pub use plan::*;
