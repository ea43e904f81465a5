use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use qudurat_prep::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if let Err(err) = config.validate() {
        log::error!("Invalid configuration: {err}");
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()));
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    log::info!(
        "Starting HTTP server on {host}:{port} (model {}, strict payloads {})",
        config.openai_model,
        config.strict_payloads
    );

    let state = AppState::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
