pub mod constants;
pub mod price;
pub mod status;

pub use price::PricePage;
pub use status::StatusPage;
