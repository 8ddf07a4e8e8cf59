use std::time::{Duration, Instant};

use minihttp::http::request::{Method, Request};
use minihttp::routing::{HandlerResult, PathParams, PathTemplate, Reply, RouteError, Router};

async fn noop(_req: Request, _params: PathParams) -> HandlerResult {
    Ok(Reply::Text(String::new()))
}

#[test]
fn test_template_must_start_with_slash() {
    let err = PathTemplate::parse("echo/{content}").unwrap_err();
    assert!(matches!(err, RouteError::InvalidTemplate { .. }));

    let mut router = Router::new();
    assert!(router.get("files", noop).is_err());
    assert!(router.is_empty());
}

#[test]
fn test_template_rejects_repeated_variable() {
    let err = PathTemplate::parse("/{a}/{a}").unwrap_err();
    assert!(matches!(err, RouteError::InvalidTemplate { .. }));
}

#[test]
fn test_template_variable_names_in_order() {
    let t = PathTemplate::parse("/users/{user}/posts/{post}").unwrap();
    assert_eq!(t.variables(), ["user".to_string(), "post".to_string()]);
    assert_eq!(t.as_str(), "/users/{user}/posts/{post}");
}

#[test]
fn test_template_match_is_anchored() {
    let t = PathTemplate::parse("/echo/{content}").unwrap();

    assert!(t.matches("/echo/abc").is_some());
    assert!(t.matches("/echo/").is_none());
    assert!(t.matches("/echoabc").is_none());
    assert!(t.matches("/v1/echo/abc").is_none());
}

#[test]
fn test_template_variable_spans_slashes() {
    let t = PathTemplate::parse("/files/{name}").unwrap();
    let params = t.matches("/files/dir/sub/x.txt").unwrap();
    assert_eq!(params["name"], "dir/sub/x.txt");
}

#[test]
fn test_template_variable_is_greedy() {
    let t = PathTemplate::parse("/{a}/{b}").unwrap();
    let params = t.matches("/x/y/z").unwrap();
    assert_eq!(params["a"], "x/y");
    assert_eq!(params["b"], "z");
}

#[test]
fn test_template_literal_after_variable() {
    let t = PathTemplate::parse("/users/{id}/profile").unwrap();

    let params = t.matches("/users/42/profile").unwrap();
    assert_eq!(params["id"], "42");
    assert!(t.matches("/users/42/settings").is_none());
    assert!(t.matches("/users//profile").is_none());
}

#[test]
fn test_template_handles_multibyte_captures() {
    let t = PathTemplate::parse("/echo/{content}").unwrap();
    assert_eq!(t.matches("/echo/héllo").unwrap()["content"], "héllo");
}

#[test]
fn test_find_requires_matching_method() {
    let mut router = Router::new();
    router.get("/echo/{content}", noop).unwrap();

    assert!(router.find(Method::GET, "/echo/abc").is_some());
    assert!(router.find(Method::POST, "/echo/abc").is_none());
    assert!(router.find(Method::GET, "/nope").is_none());
}

#[test]
fn test_find_first_match_wins() {
    let mut router = Router::new();
    router
        .get("/files/{name}", noop)
        .unwrap()
        .get("/files/special", noop)
        .unwrap();

    let route = router.find(Method::GET, "/files/special").unwrap();
    assert_eq!(route.template().as_str(), "/files/{name}");
}

#[test]
fn test_find_identical_templates_coexist() {
    let mut router = Router::new();
    router.get("/same", noop).unwrap();
    router.get("/same", noop).unwrap();
    router.post("/same", noop).unwrap();

    assert_eq!(router.len(), 3);
    let route = router.find(Method::POST, "/same").unwrap();
    assert_eq!(route.method(), Method::POST);
}

#[test]
fn test_register_all_methods() {
    let mut router = Router::new();
    router
        .get("/r", noop)
        .unwrap()
        .post("/r", noop)
        .unwrap()
        .put("/r", noop)
        .unwrap()
        .patch("/r", noop)
        .unwrap()
        .delete("/r", noop)
        .unwrap()
        .register(Method::OPTIONS, "/r", noop)
        .unwrap();

    for method in [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ] {
        assert_eq!(router.find(method, "/r").unwrap().method(), method);
    }
    assert!(router.find(Method::HEAD, "/r").is_none());
}

#[test]
fn test_extract_variables() {
    let mut router = Router::new();
    router.get("/echo/{content}", noop).unwrap();
    let route = router.find(Method::GET, "/echo/abc").unwrap();

    let params = router.extract_variables(route, "/echo/abc");
    assert_eq!(params.len(), 1);
    assert_eq!(params["content"], "abc");

    assert!(router.extract_variables(route, "/other").is_empty());
}

#[test]
fn test_find_iff_structure_matches() {
    let mut router = Router::new();
    router.get("/a/{x}/b/{y}", noop).unwrap();

    let cases = [
        ("/a/1/b/2", true),
        ("/a/one/b/two", true),
        ("/a/1/2/b/3", true),
        ("/a//b/2", false),
        ("/a/1/b/", false),
        ("/a/1/c/2", false),
        ("a/1/b/2", false),
    ];

    for (path, expected) in cases {
        assert_eq!(router.find(Method::GET, path).is_some(), expected, "{path}");
    }
}

#[test]
fn test_template_match_time_stays_bounded() {
    let t = PathTemplate::parse("/{a}/{b}/{c}/x").unwrap();
    let path = "/".repeat(8 * 1024);

    let started = Instant::now();
    assert!(t.matches(&path).is_none());
    assert!(started.elapsed() < Duration::from_secs(2));

    let long = format!("/{}/b/c/x", "a".repeat(8000));
    let params = t.matches(&long).unwrap();
    assert_eq!(params["a"].len(), 8000);
    assert_eq!(params["c"], "c");
}

#[test]
fn test_template_greedy_with_repeated_literals() {
    let t = PathTemplate::parse("/{a}-{b}-end").unwrap();
    let params = t.matches("/x-y-z-end").unwrap();
    assert_eq!(params["a"], "x-y");
    assert_eq!(params["b"], "z");

    assert!(t.matches("/x--end").is_none());
    assert!(t.matches("/x-end").is_none());
}

#[test]
fn test_lookup_matches_find_and_extract_variables() {
    let mut router = Router::new();
    router.get("/a/{x}", noop).unwrap();
    router.get("/a/{x}/b/{y}", noop).unwrap();

    let (route, params) = router.lookup(Method::GET, "/a/1/b/2").unwrap();
    assert_eq!(route.template().as_str(), "/a/{x}");
    assert_eq!(params["x"], "1/b/2");
    assert_eq!(params, router.extract_variables(route, "/a/1/b/2"));

    assert!(router.lookup(Method::POST, "/a/1").is_none());
}
