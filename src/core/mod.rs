//! Services that move planner records between storage and the computations.

pub mod services;
