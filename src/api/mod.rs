use rocket::Route;

mod admin;
mod creator;
mod public;
mod voter;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(admin::routes());
    routes.extend(creator::routes());
    routes.extend(voter::routes());
    routes.extend(public::routes());
    routes
}
