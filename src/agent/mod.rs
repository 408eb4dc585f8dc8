mod base_agent;
mod random_agent;
mod search_agent;

pub use base_agent::Agent;
pub use random_agent::RandomAgent;
pub use search_agent::SearchAgent;
