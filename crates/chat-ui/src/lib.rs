pub mod state;
pub mod render;
pub mod theme;
pub mod panels;

#[cfg(test)]
mod tests;
