use actix_web::{
    self,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware, web, App, HttpServer,
};

use crate::config::Config;
use crate::todo_logic::TodoLogic;

use super::{
    logging::LogSink,
    middlewares::cors::{Cors, CorsPolicy},
    todos_handler,
};

/// Routes as the gateway exposes them, one handler per operation
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/todos")
            .route(web::get().to(todos_handler::get_todos))
            .route(web::post().to(todos_handler::create_todo)),
    )
    .service(
        web::resource("/todos/{todoId}")
            .route(web::patch().to(todos_handler::update_todo))
            .route(web::delete().to(todos_handler::delete_todo)),
    );
}

/// Assemble the app with its collaborators injected. `Cors` sits inside the
/// access logger so logged responses already carry the CORS headers.
pub fn build_app(
    logic: web::Data<dyn TodoLogic>,
    sink: web::Data<dyn LogSink>,
    policy: CorsPolicy,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(logic)
        .app_data(sink)
        .configure(configure_routes)
        .default_service(web::to(todos_handler::not_found))
        .wrap(Cors::new(policy))
        .wrap(middleware::Logger::default())
}

pub async fn start_server(
    config: Config,
    policy: CorsPolicy,
    logic: web::Data<dyn TodoLogic>,
    sink: web::Data<dyn LogSink>,
) -> std::io::Result<()> {
    log::info!(
        "Starting Server on {} with {} worker(s)",
        config.bind,
        config.workers
    );

    HttpServer::new(move || build_app(logic.clone(), sink.clone(), policy.clone()))
        .workers(config.workers)
        .bind(config.bind.as_str())?
        .run()
        .await
}
