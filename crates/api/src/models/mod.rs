//! Domain models returned by the repository layer and serialized to clients.

pub mod address;
pub mod category;
pub mod order;
pub mod product;
pub mod user;

pub use address::{Address, AddressOwner, AddressWithUser};
pub use category::{Category, CategoryRef};
pub use order::{NewOrderItem, Order, OrderDetail, OrderItemDetail, OrderWithAddress};
pub use product::{NewProduct, Product, ProductWithCategory};
pub use user::User;
