// One module per subcommand; main.rs only parses and dispatches.

pub mod mcp;
pub mod news;
pub mod sources;
pub mod tools;
