use std::sync::Arc;

use crate::analysis::EssayAnalyzer;
use crate::grammar::GrammarService;

#[derive(Debug)]
pub struct HandlerState<G: GrammarService + 'static> {
    pub analyzer: Arc<EssayAnalyzer<G>>,
}

impl<G: GrammarService + 'static> Clone for HandlerState<G> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
        }
    }
}

impl<G: GrammarService + 'static> HandlerState<G> {
    pub fn new(analyzer: EssayAnalyzer<G>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}
