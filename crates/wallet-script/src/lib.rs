/// Wallet SDK - Script parsing, standard templates, and address handling.
///
/// Provides the Bitcoin Script type, opcode definitions, script chunk parsing,
/// standard output-script matchers and builders, witness-program detection,
/// and chain-tagged address payloads.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod address;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use address::Address;
pub use chunk::ScriptChunk;
