//! Basic pattern matcher usage.
//!
//! Builds a small routing table, resolves a few requests against it and
//! round-trips the table through JSON.
//!
//! Run with: `RUST_LOG=pattern_recognition=debug cargo run --example basic_usage`

use pattern_recognition::{Matcher, MatcherConfig, Pattern, Subject};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Pattern Matcher Basic Usage");
    println!("===========================\n");

    routing_example()?;
    println!();

    custom_subject_example();
    println!();

    serialization_example()?;

    Ok(())
}

/// Resolve upstreams for incoming requests.
fn routing_example() -> anyhow::Result<()> {
    println!("Routing table");

    let mut routes = Matcher::new();
    routes
        .add(Pattern::root(), "default-pool")
        .add([("host", "api.*")], "api-pool")
        .add([("host", "api.*"), ("path", "/v2/*")], "api-v2-pool")
        .add([("host", "api.example.com"), ("method", "POST")], "api-write-pool");

    let requests = [
        Pattern::from([("host", "api.example.com"), ("method", "GET"), ("path", "/v1/users")]),
        Pattern::from([("host", "api.example.com"), ("method", "GET"), ("path", "/v2/users")]),
        Pattern::from([("host", "api.example.com"), ("method", "POST"), ("path", "/v1/users")]),
        Pattern::from([("host", "www.example.com"), ("method", "GET"), ("path", "/")]),
    ];

    for request in &requests {
        let result = routes
            .find_match(request)
            .ok_or_else(|| anyhow::anyhow!("no route for {request}"))?;
        println!(
            "  {request} -> {} ({} match, score {})",
            result.data, result.kind, result.score
        );
    }

    Ok(())
}

struct Request<'a> {
    tenant: &'a str,
    plan: &'a str,
}

impl Subject for Request<'_> {
    fn get_field(&self, field: &str) -> Option<&str> {
        match field {
            "tenant" => Some(self.tenant),
            "plan" => Some(self.plan),
            _ => None,
        }
    }
}

/// Query with a caller-defined type instead of a `Pattern`.
fn custom_subject_example() {
    println!("Feature flag targeting");

    let flags = Matcher::new()
        .with(Pattern::root(), false)
        .with([("plan", "enterprise")], true)
        .with([("tenant", "acme-*"), ("plan", "trial")], true);

    for request in [
        Request {
            tenant: "acme-eu",
            plan: "trial",
        },
        Request {
            tenant: "globex",
            plan: "trial",
        },
        Request {
            tenant: "globex",
            plan: "enterprise",
        },
    ] {
        let enabled = flags.find(&request).copied().unwrap_or_default();
        println!("  tenant={} plan={} -> {enabled}", request.tenant, request.plan);
    }
}

/// Persist a table as JSON and load it back.
fn serialization_example() -> anyhow::Result<()> {
    println!("Serialization");

    let json = r#"[
        {"match": {"status": 404}, "data": "not-found"},
        {"match": {"status": "5??"}, "data": "server-error"},
        {"match": {}, "data": "ok"}
    ]"#;

    let matcher: Matcher<String> = Matcher::from_json_value(
        &serde_json::from_str(json)?,
        MatcherConfig::permissive(),
    )?;

    for status in ["404", "503", "200"] {
        let outcome = matcher
            .find(&Pattern::from([("status", status)]))
            .map(String::as_str)
            .unwrap_or("unmatched");
        println!("  status={status} -> {outcome}");
    }

    println!("  encoded: {}", matcher.to_json_string()?);
    Ok(())
}
