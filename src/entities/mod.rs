pub mod brand;
pub mod customer;
pub mod product;
pub mod sale;
pub mod sale_item;
pub mod support_ticket;
pub mod user;
pub mod warranty_card;
