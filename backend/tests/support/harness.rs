//! Server harness and shared world for the complaint lifecycle scenarios.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use backend::Trace;
use backend::inbound::http::admin::{
    get_all_complaints_for_admin as admin_listing_handler,
    resolve_complaint as resolve_complaint_handler,
};
use backend::inbound::http::auth::AdminCapability;
use backend::inbound::http::complaints::{
    get_all_complaints_for_user as user_listing_handler,
    submit_complaint as submit_complaint_handler, view_complaint as view_complaint_handler,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{login as login_handler, register as register_handler};
use backend::outbound::memory::InMemoryComplaintStore;
use credentials::SecretCode;

/// Bearer token wired into the spawned server's admin capability.
pub(crate) const ADMIN_TOKEN: &str = "bddAdminT0kenForLifecycle";

/// Mutable state threaded through the lifecycle steps.
pub(crate) struct LifecycleWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_text: Option<String>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) session_cookie: Option<String>,
    pub(crate) second_session_cookie: Option<String>,
    pub(crate) secret_code: Option<String>,
    pub(crate) complaint_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<LifecycleWorld>>;

/// Fixture wrapper that stops the server when the scenario finishes.
pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// Session middleware mirroring production apart from `cookie_secure`, which
/// must be off because the harness serves plain HTTP.
fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

async fn spawn_lifecycle_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .wrap(test_session_middleware(key.clone()))
            .wrap(Trace)
            .service(register_handler)
            .service(login_handler)
            .service(submit_complaint_handler)
            .service(user_listing_handler)
            .service(view_complaint_handler)
            .service(admin_listing_handler)
            .service(resolve_complaint_handler)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

/// Spin up a server backed by a fresh in-memory store.
#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let admin = AdminCapability::new(SecretCode::new(ADMIN_TOKEN).expect("fixture admin token"));
    let http_state = HttpState::new(Arc::new(InMemoryComplaintStore::default()), admin);

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_lifecycle_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(LifecycleWorld {
        runtime,
        local,
        base_url,
        server,
        last_status: None,
        last_body: None,
        last_text: None,
        last_trace_id: None,
        session_cookie: None,
        second_session_cookie: None,
        secret_code: None,
        complaint_id: None,
    }));

    WorldFixture { world }
}
