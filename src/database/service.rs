//! Database service layer
//!
//! Bundles the main service's repositories behind one handle.

use crate::database::repositories::{
    CategoryRepository, CommentRepository, CompilationRepository, EventRepository,
    LocationRepository, RequestRepository, UserRepository,
};
use crate::database::DatabasePool;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub categories: CategoryRepository,
    pub locations: LocationRepository,
    pub events: EventRepository,
    pub requests: RequestRepository,
    pub compilations: CompilationRepository,
    pub comments: CommentRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            locations: LocationRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            requests: RequestRepository::new(pool.clone()),
            compilations: CompilationRepository::new(pool.clone()),
            comments: CommentRepository::new(pool),
        }
    }
}
