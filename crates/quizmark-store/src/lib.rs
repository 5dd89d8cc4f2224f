//! quizmark-store — In-memory implementation of the quizmark record store.
//!
//! Backs the service layer in tests and the CLI. Transactions are
//! snapshot-based: `begin` clones the current state, writes mutate the
//! clone, and `commit` swaps it back in. Dropping a transaction without
//! committing is the rollback.

mod memory;

pub use memory::MemoryStore;
