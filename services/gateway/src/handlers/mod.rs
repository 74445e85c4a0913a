pub mod book;
pub mod order;
