pub mod payoff;
pub mod planning;
pub mod scenarios;
