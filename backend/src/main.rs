use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use printshop_backend::{
    config::Config,
    db::connection::create_pool,
    docs::ApiDoc,
    handlers,
    middleware as auth_middleware,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "printshop_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        session_ttl_seconds = config.session_ttl_seconds,
        gemini_model = %config.gemini_image_model,
        storage_root_configured = config.storage_root.is_some(),
        gemini_key_configured = config.gemini_api_key.is_some(),
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout));

    // User-protected routes (auth required)
    let user_routes = Router::new()
        .route("/api/auth/session", get(handlers::auth::session_info))
        .route("/api/user/images", get(handlers::images::list_my_images))
        .route(
            "/api/user/images/{filename}",
            get(handlers::images::serve_my_image),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            (pool.clone(), config.clone()),
            auth_middleware::auth,
        ));

    // Admin-protected routes (auth + ADMIN role)
    let admin_routes = Router::new()
        .route(
            "/api/admin/vat",
            get(handlers::admin::vat::list_vats).post(handlers::admin::vat::create_vat),
        )
        .route(
            "/api/admin/vat/{id}",
            get(handlers::admin::vat::get_vat)
                .put(handlers::admin::vat::update_vat)
                .delete(handlers::admin::vat::delete_vat),
        )
        .route(
            "/api/admin/suppliers",
            get(handlers::admin::suppliers::list_suppliers)
                .post(handlers::admin::suppliers::create_supplier),
        )
        .route(
            "/api/admin/suppliers/{id}",
            get(handlers::admin::suppliers::get_supplier)
                .put(handlers::admin::suppliers::update_supplier)
                .delete(handlers::admin::suppliers::delete_supplier),
        )
        .route(
            "/api/admin/countries",
            get(handlers::admin::countries::list_countries)
                .post(handlers::admin::countries::create_country),
        )
        .route(
            "/api/admin/countries/{id}",
            get(handlers::admin::countries::get_country)
                .put(handlers::admin::countries::update_country)
                .delete(handlers::admin::countries::delete_country),
        )
        .route(
            "/api/admin/prompts",
            get(handlers::admin::prompts::list_prompts)
                .post(handlers::admin::prompts::create_prompt),
        )
        .route(
            "/api/admin/prompts/categories",
            get(handlers::admin::prompts::list_categories)
                .post(handlers::admin::prompts::create_category),
        )
        .route(
            "/api/admin/prompts/categories/{id}",
            put(handlers::admin::prompts::update_category)
                .delete(handlers::admin::prompts::delete_category),
        )
        .route(
            "/api/admin/prompts/subcategories",
            get(handlers::admin::prompts::list_subcategories)
                .post(handlers::admin::prompts::create_subcategory),
        )
        .route(
            "/api/admin/prompts/subcategories/{id}",
            put(handlers::admin::prompts::update_subcategory)
                .delete(handlers::admin::prompts::delete_subcategory),
        )
        .route(
            "/api/admin/prompts/{id}",
            get(handlers::admin::prompts::get_prompt)
                .put(handlers::admin::prompts::update_prompt)
                .delete(handlers::admin::prompts::delete_prompt),
        )
        .route(
            "/api/admin/images",
            post(handlers::admin::images::upload_image),
        )
        .route(
            "/api/admin/images/prompt-test/{filename}",
            get(handlers::admin::images::get_prompt_test_image)
                .delete(handlers::admin::images::delete_prompt_test_image),
        )
        .route(
            "/api/admin/ai/image-edit",
            post(handlers::admin::ai::image_edit),
        )
        .route(
            "/api/admin/ai/test-prompt",
            post(handlers::admin::ai::test_prompt),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            (pool.clone(), config.clone()),
            auth_middleware::auth_admin,
        ));

    // Compose app with shared layers (CORS/Trace) and shared state
    let app = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config)),
        )
        .with_state((pool, config));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(24 * 60 * 60));

    if config.cors_allow_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allow_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
