use actix_cors::Cors;
use actix_web::{
    self, App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, connect_read_database, run_migrations},
    middlewares::authentication,
    modules::{
        friend::{repository_pg::FriendQueryRepositoryPg, service::FriendQueryService},
        friendship::{repository_pg::FriendshipRepositoryPg, service::FriendshipService},
        user::repository_pg::UserRepositoryPg,
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    LazyLock::force(&ENV);

    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;
    let read_pool = connect_read_database(&db_pool)
        .await
        .map_err(|_| std::io::Error::other("Read database connection error"))?;

    run_migrations(&db_pool).await.map_err(|e| std::io::Error::other(e.to_string()))?;

    let user_repo = UserRepositoryPg::new(db_pool.clone());
    let friendship_repo = FriendshipRepositoryPg::new(db_pool.clone());
    let friend_query_repo = FriendQueryRepositoryPg::new(read_pool);

    let friendship_service =
        FriendshipService::with_dependencies(Arc::new(friendship_repo), Arc::new(user_repo));
    let friend_query_service = FriendQueryService::with_dependencies(Arc::new(friend_query_repo));

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(friendship_service.clone()))
            .app_data(web::Data::new(friend_query_service.clone()))
            .service(health_check)
            .service(
                web::scope("/api")
                    .wrap(from_fn(authentication))
                    .configure(modules::friendship::route::configure)
                    .configure(modules::friend::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(ENV.workers)
    .run()
    .await
}
