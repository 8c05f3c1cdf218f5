pub mod bsp;
pub mod entities;
pub mod error;
pub mod level;
pub mod map_writer;
pub mod prelude;
pub mod reconstruct;

#[cfg(test)]
mod testing;
