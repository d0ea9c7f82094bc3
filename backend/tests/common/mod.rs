pub mod helpers;
pub mod test_app;

pub use helpers::{create_invoice, generate_test_email, signup_and_login};
pub use test_app::TestApp;
