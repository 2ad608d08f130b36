//! Contains subcommands for the opnode binary.

mod node;
pub use node::NodeCommand;

mod derive;
pub use derive::DeriveCommand;
