use actix_web::web;

pub mod games;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure)
        .configure(games::configure_routes)
        .configure(users::configure_routes);
}
