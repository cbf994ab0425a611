pub mod errors;
pub mod db;
pub mod category;
pub mod sub_category;
pub mod business;

#[cfg(test)]
mod tests;
