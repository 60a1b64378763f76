pub mod poker;
pub mod prelude;
