pub mod invoices;
pub mod jwt;
pub mod users;
