pub mod compression;
pub mod errors;
pub mod node;
pub mod proofs;

pub use compression::*;
pub use errors::*;
pub use node::*;
pub use proofs::*;
