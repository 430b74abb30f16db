pub mod customer;
pub mod links;
pub mod pagination;
pub mod product;
pub mod user;
