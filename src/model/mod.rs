//! Plain data types shared by the collaborators, the store and the order service.

pub mod account;
pub mod order;
pub mod page;
pub mod product;

pub use account::*;
pub use order::*;
pub use page::*;
pub use product::*;
