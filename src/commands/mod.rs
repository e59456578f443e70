pub mod agent;
pub mod helpers;
pub mod kill;
