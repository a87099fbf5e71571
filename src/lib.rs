pub mod cli;
pub mod config;
pub mod error;
pub mod ignore;
pub mod prompt;
pub mod scanner;
pub mod session;
pub mod workflow;
