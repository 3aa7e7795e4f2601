//! Composes three guarded middlewares and runs a few requests through them.
//!
//! Mirrors a typical gateway setup: a request logger scoped by
//! include/exclude, an auth gate over the account pages, and an admin gate
//! with a structured matcher.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waypoint::{
    compose, Flow, FlowEvent, MatchConfig, Matcher, MatcherCondition, MatcherElement, Module,
    RequestContext,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waypoint=debug,compose_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let logger = Module::new(|request: RequestContext, _event: FlowEvent| async move {
        info!(path = request.path(), "request observed");
        Ok(Flow::Continue)
    })
    .named("logger")
    .with_config(MatchConfig::scope(
        Some(Matcher::Any(vec![
            "/".into(),
            "/dashboard".into(),
            "/admin/{*path}".into(),
        ])),
        Some("/profile".into()),
    ));

    let auth = Module::new(|request: RequestContext, _event: FlowEvent| async move {
        if request.cookie("auth-token").is_none() {
            return Ok(Flow::redirect("/login"));
        }
        Ok(Flow::Continue)
    })
    .named("auth")
    .with_config(MatchConfig::matcher(Matcher::Any(vec![
        "/dashboard/{*path}".into(),
        "/profile/{*path}".into(),
    ])));

    let admin = Module::new(|request: RequestContext, _event: FlowEvent| async move {
        if request.cookie("is-admin") != Some("true") {
            return Ok(Flow::redirect("/unauthorized"));
        }
        Ok(Flow::Continue)
    })
    .named("admin")
    .with_config(MatchConfig::matcher(Matcher::Any(vec![
        MatcherCondition {
            regexp: Some("^/admin/(.*)$".to_string()),
            locale: Some(false),
            has: vec![MatcherElement::header("x-admin-check").value("check")],
            missing: vec![MatcherElement::cookie("bypass-admin").value("true")],
            ..MatcherCondition::new("/admin/{*path}")
        }
        .into(),
        "/admin/{*path}".into(),
    ])));

    let stack = compose(vec![logger, auth, admin])?;

    let requests = vec![
        RequestContext::builder("/dashboard/settings").build(),
        RequestContext::builder("/dashboard/settings")
            .cookie("auth-token", "secret")
            .build(),
        RequestContext::builder("/admin/users")
            .header("x-admin-check", "check")
            .build(),
        RequestContext::builder("/admin/users")
            .header("x-admin-check", "check")
            .cookie("is-admin", "true")
            .build(),
    ];

    for request in requests {
        let path = request.path().to_string();
        let event = FlowEvent::new();
        match stack.handle(request, event.clone()).await? {
            Flow::Respond(response) => {
                let location = response
                    .headers()
                    .get("location")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");
                info!(path = %path, status = %response.status(), location, "responded");
            }
            Flow::Continue => info!(path = %path, "passed through"),
        }
        event.drain().await;
    }

    Ok(())
}
