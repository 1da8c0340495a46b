pub mod brands;
pub mod customers;
pub mod products;
pub mod sales;
pub mod tickets;
pub mod users;
pub mod warranties;

pub use brands::BrandService;
pub use customers::CustomerService;
pub use products::ProductService;
pub use sales::SaleService;
pub use tickets::TicketService;
pub use users::UserService;
pub use warranties::WarrantyService;
