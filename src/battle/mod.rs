pub mod actions;
pub mod ai;
pub mod calculators;
pub mod catch;
pub mod items;
pub mod moves;
pub mod runner;
pub mod state;
pub mod summary;

#[cfg(test)]
mod tests;
