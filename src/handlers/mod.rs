//! Request handlers
//!
//! Each handler validates its input, builds a prompt, calls the shared
//! providers and reshapes the result. Handlers never call each other.
//!
//! ## Key Components
//!
//! - [`DefinitionHandler`] - context-aware word definitions
//! - [`FeedHandler`] - search results condensed into a [`SuggestionsFeed`]
//! - [`ArticleHandler`] - page extraction synthesized into an article on disk
//! - [`ChatHandler`] - multi-turn chat about a document
//!
//! ## Example
//!
//! ```rust,ignore
//! use adoread::handlers::DefinitionHandler;
//!
//! let handler = DefinitionHandler::new(generator);
//! let result = handler.handle("bank", "We sat on the river bank.").await?;
//! println!("{}", result.definition);
//! ```

mod article;
mod chat;
mod definition;
mod error;
mod feed;
pub(crate) mod types;

pub use article::{ArticleHandler, build_article_prompt};
pub use chat::{ChatHandler, build_chat_instruction};
pub use definition::{DefinitionHandler, build_definition_prompt};
pub use error::HandlerError;
pub use feed::{FeedHandler, build_feed_prompt};
pub use types::{ArticleArtifact, ChatReply, DefinitionResult, SuggestionsFeed};
