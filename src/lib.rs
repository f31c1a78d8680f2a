// Library surface for headless/integration tests and reuse.
// The binary only adds the terminal front end on top of this.
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod distractor;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod question;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod word_bank;

pub use engine::SessionEngine;
pub use error::GameError;
pub use session::{Mistake, Phase, Selection, SessionConfig, SessionState};
pub use word_bank::{WordBank, WordPair};
