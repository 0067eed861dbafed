//! Reference resolution properties
//!
//! These tests pin down the resolver contract:
//! - pure references keep the referenced type, interpolation always yields strings
//! - alias chains resolve transitively
//! - cycles and dangling references fail instead of looping or defaulting
//! - output is deterministic and free of placeholders

use glint_tokens::{Context, Resolver, Stripper, TokenError, TokenValue};
use pretty_assertions::assert_eq;
use serde_json::json;

fn context(v: serde_json::Value) -> Context {
    Context::new()
        .with_layer("test", &TokenValue::from(v))
        .expect("test context is an object")
}

fn resolve(ctx: &Context, v: serde_json::Value) -> Result<TokenValue, TokenError> {
    Resolver::new(ctx).resolve(&TokenValue::from(v))
}

#[test]
fn test_two_node_cycle_is_detected() {
    let ctx = context(json!({ "a": "{b}", "b": "{a}" }));

    match resolve(&ctx, json!("{a}")) {
        Err(TokenError::CircularReference { path, chain }) => {
            assert_eq!(path, "a");
            assert_eq!(chain, vec!["a", "b", "a"]);
        }
        other => panic!("expected circular reference, got {other:?}"),
    }
}

#[test]
fn test_cycle_inside_interpolation_is_detected() {
    let ctx = context(json!({
        "a": "{b} solid",
        "b": "1px {c}",
        "c": "{a}"
    }));

    let err = resolve(&ctx, json!({ "border": "{a}" })).unwrap_err();
    assert!(matches!(err, TokenError::CircularReference { .. }));
}

#[test]
fn test_missing_path_is_named() {
    let ctx = Context::new();

    let err = resolve(&ctx, json!("{missing.path}")).unwrap_err();
    match err {
        TokenError::UnresolvedReference { ref path } => assert_eq!(path, "missing.path"),
        other => panic!("expected unresolved reference, got {other:?}"),
    }
}

#[test]
fn test_missing_path_inside_interpolation_is_named() {
    let ctx = context(json!({ "x": 1 }));

    let err = resolve(&ctx, json!("{x} and {y.z}")).unwrap_err();
    assert_eq!(err.path(), Some("y.z"));
}

#[test]
fn test_pure_vs_interpolated() {
    let ctx = context(json!({ "size": 8 }));

    assert_eq!(resolve(&ctx, json!("{size}")).unwrap(), TokenValue::from(8i64));
    assert_eq!(
        resolve(&ctx, json!("value: {size}px")).unwrap(),
        TokenValue::from("value: 8px")
    );
}

#[test]
fn test_transitive_alias_chain() {
    let ctx = context(json!({ "a": "{b}", "b": "{c}", "c": 16 }));

    assert_eq!(resolve(&ctx, json!("{a}")).unwrap(), TokenValue::from(16i64));
}

#[test]
fn test_multi_placeholder_interpolation() {
    let ctx = context(json!({ "x": 1, "y": 2 }));

    assert_eq!(resolve(&ctx, json!("{x}-{y}")).unwrap(), TokenValue::from("1-2"));
}

#[test]
fn test_float_and_bool_stringify() {
    let ctx = context(json!({ "ratio": 1.5, "on": true, "none": null }));

    assert_eq!(
        resolve(&ctx, json!("{ratio}x {on} {none}")).unwrap(),
        TokenValue::from("1.5x true null")
    );
}

#[test]
fn test_nested_tree_keeps_shape() {
    let ctx = context(json!({
        "blue": "#3b82f6",
        "space": { "sm": 4 }
    }));

    let resolved = resolve(
        &ctx,
        json!({
            "button": {
                "bg": "{blue}",
                "padding": ["{space.sm}", "{space.sm}px"],
                "enabled": true
            },
            "literal": "no refs"
        }),
    )
    .unwrap();

    assert_eq!(
        resolved,
        TokenValue::from(json!({
            "button": {
                "bg": "#3b82f6",
                "padding": [4, "4px"],
                "enabled": true
            },
            "literal": "no refs"
        }))
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let ctx = context(json!({
        "a": "{b}",
        "b": 2,
        "c": "{a}/{b}",
        "group": { "x": "{c}", "y": ["{a}", "{c}"] }
    }));
    let node = json!({ "one": "{group}", "two": "{c}!" });

    let first = serde_json::to_string(&resolve(&ctx, node.clone()).unwrap()).unwrap();
    let second = serde_json::to_string(&resolve(&ctx, node).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_no_placeholders_survive() {
    let ctx = context(json!({
        "base": "{scale.1}",
        "scale": { "1": 4, "2": "{scale.1}" },
        "mix": "{base} {scale.2}",
        "group": { "inner": "{mix}" }
    }));

    let resolved = resolve(
        &ctx,
        json!({
            "a": "{group}",
            "b": ["{mix}", { "c": "{scale}" }],
            "d": "calc({base}px * 2)"
        }),
    )
    .unwrap();

    assert_eq!(resolved.find_placeholder(), None);
    assert_eq!(
        resolved.get_path("d"),
        Some(&TokenValue::from("calc(4px * 2)"))
    );
}

#[test]
fn test_stripping_then_resolving() {
    let raw = TokenValue::from(json!({
        "color": {
            "white": { "$type": "color", "$value": "#ffffff" },
            "surface": { "$type": "color", "$value": "{color.white}" }
        }
    }));
    let stripped = Stripper::new().strip(raw);
    let ctx = Context::new().with_layer("tokens", &stripped).unwrap();

    assert_eq!(
        Resolver::new(&ctx).resolve(&stripped).unwrap(),
        TokenValue::from(json!({
            "color": { "white": "#ffffff", "surface": "#ffffff" }
        }))
    );
}

#[test]
fn test_stripping_is_total_and_leaves_no_wrappers() {
    let raw = TokenValue::from(json!({
        "a": { "$value": 1 },
        "b": [{ "$value": "x" }, { "nested": { "$value": true } }, null, 3],
        "c": { "d": { "e": { "$value": "{a}" } } },
        "f": "plain"
    }));

    let stripped = Stripper::new().strip(raw);
    let json = serde_json::to_string(&stripped).unwrap();
    assert!(!json.contains("$value"), "{json}");
    assert_eq!(Stripper::new().strip(stripped.clone()), stripped);
}
