use std::sync::Arc;

use crate::config::Config;
use crate::ocr::OcrEngine;
use crate::pipeline::Pipeline;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<OcrEngine>,
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(config: Config, engine: OcrEngine) -> Self {
        let config = Arc::new(config);
        let engine = Arc::new(engine);
        let pipeline = Pipeline::new(Arc::clone(&engine), Arc::clone(&config));

        Self {
            config,
            engine,
            pipeline,
        }
    }
}
