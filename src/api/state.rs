use std::sync::Arc;

use crate::config::Config;
use crate::handlers::{ArticleHandler, ChatHandler, DefinitionHandler, FeedHandler};
use crate::observability::Metrics;
use crate::providers::{GenerationProvider, SearchProvider};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub definitions: Arc<DefinitionHandler>,
    pub feeds: Arc<FeedHandler>,
    pub articles: Arc<ArticleHandler>,
    pub chat: Arc<ChatHandler>,
    pub metrics: Arc<Metrics>,
    pub search_provider: &'static str,
    pub generation_provider: &'static str,
}

impl AppState {
    /// Wire every handler to the same pair of providers
    pub fn new(
        config: Config,
        search: Arc<dyn SearchProvider>,
        generator: Arc<dyn GenerationProvider>,
    ) -> Self {
        let articles = ArticleHandler::new(
            search.clone(),
            generator.clone(),
            config.article.output_path.clone(),
        );
        let chat = ChatHandler::new(generator.clone(), config.chat.max_sessions);

        Self {
            definitions: Arc::new(DefinitionHandler::new(generator.clone())),
            feeds: Arc::new(FeedHandler::new(search.clone(), generator.clone())),
            articles: Arc::new(articles),
            chat: Arc::new(chat),
            metrics: Arc::new(Metrics::new()),
            search_provider: search.name(),
            generation_provider: generator.name(),
            config: Arc::new(config),
        }
    }
}
