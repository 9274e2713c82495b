use crate::config::Config;
use crate::question_gen::QuestionService;
use crate::store::{rooms::RoomStore, users::UserStore};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub rooms: RoomStore,
    pub users: UserStore,
    pub questions: QuestionService,
    pub config: Config,
}

impl FromRef<AppState> for QuestionService {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for RoomStore {
    fn from_ref(state: &AppState) -> Self {
        state.rooms.clone()
    }
}

impl FromRef<AppState> for UserStore {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
