//! End-to-end authentication and navigation flows
//!
//! Drives the auth state machine with a mocked gateway and an in-memory
//! session store, then checks where the route guard sends each kind of
//! visitor. No network is involved.

use async_trait::async_trait;
use deskctl::auth::{AuthContext, AuthGateway, AuthState, LoginCredentials, RegisterData};
use deskctl::cli::handlers::require_route_with_state;
use deskctl::core::{Role, User};
use deskctl::error::{DeskError, Result};
use deskctl::routes::{self, Navigation, Route};
use deskctl::session::{MemorySessionStore, SessionStore};
use mockall::mock;
use std::sync::Arc;

mock! {
    Gateway {}

    #[async_trait]
    impl AuthGateway for Gateway {
        async fn login(&self, credentials: &LoginCredentials) -> Result<String>;
        async fn register(&self, data: &RegisterData) -> Result<(User, String)>;
        async fn current_user(&self) -> Result<Option<User>>;
        fn logout(&self) -> Result<()>;
    }
}

fn make_user(id: i64, role: Role) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        role,
    }
}

#[tokio::test]
async fn rejected_startup_token_falls_back_to_anonymous_and_clears_it() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_current_user()
        .times(1)
        .returning(|| Ok(None));

    let store = Arc::new(MemorySessionStore::with_token("expired"));
    let session: Arc<dyn SessionStore> = store.clone();
    let mut context = AuthContext::new(Arc::new(gateway), session);

    context.initialize().await.unwrap();

    assert_eq!(*context.state(), AuthState::Anonymous);
    assert!(store.get().unwrap().is_none(), "stale token must be cleared");

    // An anonymous visitor is then sent to login from anywhere protected.
    assert_eq!(
        routes::resolve(Route::Root, context.state()),
        Navigation::View {
            route: Route::Login,
            redirected_from: Some(Route::Root),
        }
    );
}

#[tokio::test]
async fn plain_user_login_lands_on_tickets() {
    let store = Arc::new(MemorySessionStore::new());
    let mut gateway = MockGateway::new();
    let login_store = store.clone();
    gateway.expect_login().times(1).returning(move |_| {
        login_store.set("fresh-token").unwrap();
        Ok("fresh-token".to_string())
    });
    gateway
        .expect_current_user()
        .times(1)
        .returning(|| Ok(Some(make_user(1, Role::User))));

    let session: Arc<dyn SessionStore> = store.clone();
    let mut context = AuthContext::new(Arc::new(gateway), session);
    context.initialize().await.ok();

    let user = context.login("user1", "secret").await.unwrap();
    assert_eq!(user.id, 1);
    assert!(store.get().unwrap().is_some(), "token must be stored");

    // Home is /tickets for plain users, and /login bounces them there too.
    assert_eq!(
        routes::resolve(Route::Root, context.state()),
        Navigation::View {
            route: Route::Tickets,
            redirected_from: Some(Route::Root),
        }
    );
    assert_eq!(
        routes::resolve(Route::Login, context.state()),
        Navigation::View {
            route: Route::Tickets,
            redirected_from: Some(Route::Login),
        }
    );
}

#[tokio::test]
async fn admin_login_lands_on_users_and_cannot_create_tickets() {
    let store = Arc::new(MemorySessionStore::new());
    let mut gateway = MockGateway::new();
    let login_store = store.clone();
    gateway.expect_login().times(1).returning(move |_| {
        login_store.set("admin-token").unwrap();
        Ok("admin-token".to_string())
    });
    gateway
        .expect_current_user()
        .times(1)
        .returning(|| Ok(Some(make_user(9, Role::Admin))));

    let session: Arc<dyn SessionStore> = store.clone();
    let mut context = AuthContext::new(Arc::new(gateway), session);

    context.login("admin", "secret").await.unwrap();

    assert_eq!(
        routes::resolve(Route::Root, context.state()),
        Navigation::View {
            route: Route::Users,
            redirected_from: Some(Route::Root),
        }
    );

    // /tickets/new is for users and managers; the admin is bounced.
    assert_eq!(
        routes::resolve(Route::TicketNew, context.state()),
        Navigation::View {
            route: Route::Tickets,
            redirected_from: Some(Route::TicketNew),
        }
    );
    let err = require_route_with_state(Route::TicketNew, context.state()).unwrap_err();
    assert!(err.to_string().contains("/tickets"));
}

#[tokio::test]
async fn failed_login_keeps_the_visitor_anonymous() {
    let mut gateway = MockGateway::new();
    gateway.expect_login().times(1).returning(|_| {
        Err(DeskError::Auth {
            message: "Unable to log in with provided credentials.".to_string(),
        })
    });

    let store = Arc::new(MemorySessionStore::new());
    let session: Arc<dyn SessionStore> = store.clone();
    let mut context = AuthContext::new(Arc::new(gateway), session);
    context.initialize().await.unwrap();

    let err = context.login("user1", "wrong").await.unwrap_err();
    assert!(matches!(err, DeskError::Auth { .. }));
    assert_eq!(*context.state(), AuthState::Anonymous);

    for route in [
        Route::Users,
        Route::Tickets,
        Route::TicketDetail(5),
        Route::TicketNew,
    ] {
        match routes::resolve(route, context.state()) {
            Navigation::View { route: landed, .. } => assert_eq!(landed, Route::Login),
            Navigation::Pending => panic!("anonymous state must settle"),
        }
    }
}

#[tokio::test]
async fn registration_authenticates_and_routes_by_role() {
    let store = Arc::new(MemorySessionStore::new());
    let mut gateway = MockGateway::new();
    let register_store = store.clone();
    gateway.expect_register().times(1).returning(move |data| {
        register_store.set("new-token").unwrap();
        let user = User {
            id: 50,
            username: data.username.clone(),
            email: data.email.clone(),
            role: Role::User,
        };
        Ok((user, "new-token".to_string()))
    });
    gateway.expect_login().times(0);

    let session: Arc<dyn SessionStore> = store.clone();
    let mut context = AuthContext::new(Arc::new(gateway), session);

    let user = context
        .register("newbie", "newbie@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(user.username, "newbie");
    assert!(context.state().is_authenticated());

    // Registered users go straight to their home view.
    assert_eq!(
        routes::resolve(Route::Register, context.state()),
        Navigation::View {
            route: Route::Tickets,
            redirected_from: Some(Route::Register),
        }
    );
}

#[tokio::test]
async fn logout_returns_every_route_to_login() {
    let store = Arc::new(MemorySessionStore::with_token("tok"));
    let mut gateway = MockGateway::new();
    gateway
        .expect_current_user()
        .times(1)
        .returning(|| Ok(Some(make_user(2, Role::Manager))));
    let logout_store = store.clone();
    gateway.expect_logout().times(1).returning(move || {
        logout_store.clear().unwrap();
        Ok(())
    });

    let session: Arc<dyn SessionStore> = store.clone();
    let mut context = AuthContext::new(Arc::new(gateway), session);
    context.initialize().await.unwrap();
    assert!(context.state().is_authenticated());

    context.logout().unwrap();

    assert_eq!(*context.state(), AuthState::Anonymous);
    assert!(store.get().unwrap().is_none());
    match routes::resolve(Route::Tickets, context.state()) {
        Navigation::View { route, .. } => assert_eq!(route, Route::Login),
        Navigation::Pending => panic!("anonymous state must settle"),
    }
}
