use crate::pipeline::Predictor;

pub struct AppState {
    pub predictor: Predictor,
}
