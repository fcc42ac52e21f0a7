pub mod bridge;
pub mod catalog;
pub mod datum;
pub mod error;
pub mod executor;
pub mod expr;
pub mod fdw;
pub mod options;
pub mod planner;
pub mod scan;
pub mod settings;
pub mod sql;
