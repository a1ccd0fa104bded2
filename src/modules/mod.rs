pub mod user {
    pub mod repository;
    pub mod repository_pg;
}

pub mod friendship {
    pub mod schema;
    pub mod model;
    pub mod transition;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}

pub mod friend {
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}
