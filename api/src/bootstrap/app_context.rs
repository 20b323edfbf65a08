use std::sync::Arc;

use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::ports::health_probe::HealthProbe;
use crate::application::ports::password_hasher::PasswordHashPort;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::infrastructure::memory::InMemoryStore;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    feedback_repo: Arc<dyn FeedbackRepository>,
    password_hasher: Arc<dyn PasswordHashPort>,
    health_probe: Arc<dyn HealthProbe>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        feedback_repo: Arc<dyn FeedbackRepository>,
        password_hasher: Arc<dyn PasswordHashPort>,
        health_probe: Arc<dyn HealthProbe>,
    ) -> Self {
        Self {
            user_repo,
            feedback_repo,
            password_hasher,
            health_probe,
        }
    }

    /// All repositories backed by one shared [`InMemoryStore`].
    pub fn in_memory(password_hasher: Arc<dyn PasswordHashPort>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store.clone(), password_hasher, store)
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn feedback_repo(&self) -> Arc<dyn FeedbackRepository> {
        self.services.feedback_repo.clone()
    }

    pub fn password_hasher(&self) -> Arc<dyn PasswordHashPort> {
        self.services.password_hasher.clone()
    }

    pub fn health_probe(&self) -> Arc<dyn HealthProbe> {
        self.services.health_probe.clone()
    }
}
