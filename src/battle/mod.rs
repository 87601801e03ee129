pub mod actions;
pub mod arbiter;
pub mod damage;
pub mod effects;
pub mod end_of_turn;
pub mod executor;
pub mod field;
pub mod flow;
pub mod handlers;
pub mod order;
pub mod queue;
pub mod side;
pub mod slot;
pub mod stats;
pub mod validation;

#[cfg(test)]
mod tests;
