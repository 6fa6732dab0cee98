// src/handlers/mod.rs
pub mod frame;
pub mod generate;
pub mod status;
pub mod ui;
pub mod youtube;

#[cfg(test)]
pub(crate) mod test_support;
