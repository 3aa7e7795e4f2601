//! End-to-end behavior of composed middleware stacks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::{header::LOCATION, StatusCode};
use waypoint::{
    compose, Flow, FlowEvent, MatchConfig, Matcher, MatcherCondition, MatcherElement, Module,
    RequestContext,
};

mod common;

fn assert_redirect(flow: Flow, location: &str) {
    let response = flow.into_response().expect("expected a response");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get(LOCATION).unwrap(), location);
}

#[tokio::test]
async fn single_declining_module_resolves_to_passthrough() {
    let stack = compose(vec![common::passthrough("noop")]).unwrap();
    let flow = stack
        .handle(RequestContext::builder("/").build(), FlowEvent::new())
        .await
        .unwrap();
    assert!(!flow.is_respond());
}

#[tokio::test]
async fn first_response_short_circuits_the_chain() {
    let stack = compose(vec![
        common::redirecter("login-gate", "/login"),
        common::must_not_run("unreachable"),
    ])
    .unwrap();
    let flow = stack
        .handle(RequestContext::builder("/anything").build(), FlowEvent::new())
        .await
        .unwrap();
    assert_redirect(flow, "/login");
}

#[tokio::test]
async fn unmatched_matcher_skips_the_module() {
    let stack = compose(vec![
        common::must_not_run("about-only").with_config(MatchConfig::matcher("/about"))
    ])
    .unwrap();
    let flow = stack
        .handle(RequestContext::builder("/not-about").build(), FlowEvent::new())
        .await
        .unwrap();
    assert!(!flow.is_respond());
}

#[tokio::test]
async fn matched_matcher_runs_the_module() {
    let stack = compose(vec![
        common::redirecter("about", "/about-v2").with_config(MatchConfig::matcher("/about"))
    ])
    .unwrap();
    let flow = stack
        .handle(RequestContext::builder("/about").build(), FlowEvent::new())
        .await
        .unwrap();
    assert_redirect(flow, "/about-v2");
}

fn api_guard() -> MatchConfig {
    MatchConfig::matcher(Matcher::Condition(MatcherCondition {
        has: vec![MatcherElement::header("authorization").value("Bearer Token")],
        ..MatcherCondition::new("/api/{*path}")
    }))
}

#[tokio::test]
async fn header_condition_selects_the_module() {
    let stack =
        compose(vec![common::redirecter("api", "/api/welcome").with_config(api_guard())]).unwrap();
    let request = RequestContext::builder("/api/data")
        .header("authorization", "Bearer Token")
        .build();
    let flow = stack.handle(request, FlowEvent::new()).await.unwrap();
    assert_redirect(flow, "/api/welcome");
}

#[tokio::test]
async fn absent_header_skips_the_module() {
    let stack = compose(vec![common::must_not_run("api").with_config(api_guard())]).unwrap();
    let request = RequestContext::builder("/api/data").build();
    let flow = stack.handle(request, FlowEvent::new()).await.unwrap();
    assert!(!flow.is_respond());
}

#[tokio::test]
async fn include_exclude_carves_out_a_subtree() {
    let config = MatchConfig::scope(
        Some(Matcher::Any(vec![
            "/dashboard".into(),
            "/dashboard/{*rest}".into(),
        ])),
        Some(Matcher::Any(vec![
            "/dashboard/admin".into(),
            "/dashboard/admin/{*rest}".into(),
        ])),
    );
    let stack =
        compose(vec![common::redirecter("dashboard", "/dashboard/home").with_config(config)])
            .unwrap();

    let flow = stack
        .handle(
            RequestContext::builder("/dashboard/user").build(),
            FlowEvent::new(),
        )
        .await
        .unwrap();
    assert_redirect(flow, "/dashboard/home");

    for skipped in ["/dashboard/admin", "/dashboard/admin/panel", "/elsewhere"] {
        let flow = stack
            .handle(RequestContext::builder(skipped).build(), FlowEvent::new())
            .await
            .unwrap();
        assert!(!flow.is_respond(), "path {skipped} should be skipped");
    }
}

#[tokio::test]
async fn scope_eligibility_truth_table() {
    let include: Matcher = "/in/{*rest}".into();
    let exclude: Matcher = "/in/private/{*rest}".into();
    let cases = [
        (MatchConfig::scope(None, None), "/anywhere", true),
        (MatchConfig::scope(Some(include.clone()), None), "/in/a", true),
        (MatchConfig::scope(Some(include.clone()), None), "/out/a", false),
        (MatchConfig::scope(None, Some(exclude.clone())), "/in/a", true),
        (
            MatchConfig::scope(None, Some(exclude.clone())),
            "/in/private/a",
            false,
        ),
        (
            MatchConfig::scope(Some(include.clone()), Some(exclude.clone())),
            "/in/a",
            true,
        ),
        (
            MatchConfig::scope(Some(include), Some(exclude)),
            "/in/private/a",
            false,
        ),
    ];
    for (config, path, eligible) in cases {
        let stack =
            compose(vec![common::redirecter("scoped", "/hit").with_config(config.clone())])
                .unwrap();
        let flow = stack
            .handle(RequestContext::builder(path).build(), FlowEvent::new())
            .await
            .unwrap();
        assert_eq!(
            flow.is_respond(),
            eligible,
            "path {path} with config {config:?}"
        );
    }
}

#[tokio::test]
async fn modules_run_in_registration_order() {
    let hits = Arc::new(AtomicUsize::new(0));
    let stack = compose(vec![
        common::counting("first", hits.clone()),
        common::counting("second", hits.clone()),
        common::redirecter("third", "/done"),
        common::must_not_run("fourth"),
    ])
    .unwrap();
    let flow = stack
        .handle(RequestContext::builder("/").build(), FlowEvent::new())
        .await
        .unwrap();
    assert_redirect(flow, "/done");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn all_declining_modules_resolve_to_passthrough() {
    let stack = compose(vec![
        common::passthrough("a"),
        common::must_not_run("b").with_config(MatchConfig::matcher("/never")),
        common::passthrough("c"),
    ])
    .unwrap();
    let flow = stack
        .handle(RequestContext::builder("/somewhere").build(), FlowEvent::new())
        .await
        .unwrap();
    assert!(!flow.is_respond());
}

#[tokio::test]
async fn handler_errors_propagate_unchanged() {
    let stack = compose(vec![Module::new(|_request, _event| async {
        Err::<Flow, _>("boom".into())
    })
    .named("faulty")])
    .unwrap();
    let err = stack
        .handle(RequestContext::builder("/").build(), FlowEvent::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

#[tokio::test]
async fn invalid_pattern_surfaces_on_first_use() {
    let stack = compose(vec![
        common::must_not_run("broken").with_config(MatchConfig::matcher("/{unclosed"))
    ])
    .unwrap();
    let err = stack
        .handle(RequestContext::builder("/").build(), FlowEvent::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid path pattern"));
}

#[test]
fn conflicting_config_never_reaches_request_handling() {
    let result = compose(vec![common::passthrough("ok"), {
        common::passthrough("conflicted").with_config(MatchConfig {
            matcher: Some("/a".into()),
            include: Some("/b".into()),
            exclude: None,
        })
    }]);
    assert!(result.is_err());
}

#[tokio::test]
async fn detached_work_survives_the_response() {
    let done = Arc::new(AtomicUsize::new(0));
    let observed = done.clone();
    let stack = compose(vec![Module::new(move |_request, event| {
        let done = observed.clone();
        async move {
            event.wait_until(async move {
                done.fetch_add(1, Ordering::SeqCst);
            });
            Ok(Flow::redirect("/done"))
        }
    })
    .named("audited")])
    .unwrap();

    let event = FlowEvent::new();
    let flow = stack
        .handle(RequestContext::builder("/").build(), event.clone())
        .await
        .unwrap();
    assert_redirect(flow, "/done");
    event.drain().await;
    assert_eq!(done.load(Ordering::SeqCst), 1);
}
