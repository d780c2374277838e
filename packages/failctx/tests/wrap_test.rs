//! Tests for wrap orchestration, annotators and extraction

use failctx::{
    unwrap, with_code, with_ignorable, with_message, with_param, with_params, with_tags, wrap,
    wrap_opt, Annotator, Error, Extract, Extracted, ResultExt, Traced,
};
use proptest::prelude::*;
use serde_json::json;
use std::io;

fn io_error(text: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, text.to_string())
}

#[test]
fn test_wrap_none_is_none() {
    let wrapped = wrap_opt(None::<io::Error>, [with_message("ignored")]);
    assert!(wrapped.is_none());

    let wrapped = wrap_opt(Some(io_error("gone")), [with_message("load")]);
    assert_eq!(wrapped.expect("wrapped").to_string(), "load: gone");
}

#[test]
fn test_ok_passes_through() {
    let ok: Result<u8, io::Error> = Ok(7);
    assert_eq!(ok.wrap_err().expect("ok untouched"), 7);

    let ok: Result<u8, io::Error> = Ok(8);
    assert_eq!(ok.context("unused").expect("ok untouched"), 8);
}

#[test]
fn test_wrapped_foreign_error_is_contextual() {
    let err = wrap!(io_error("config.toml"));

    assert!(unwrap(&err).is_some());
    assert_eq!(err.messages(), ["config.toml"]);
    assert_eq!(err.to_string(), "config.toml");

    let cause = err.cause().downcast_ref::<io::Error>().expect("io cause");
    assert_eq!(cause.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_unwrap_foreign_error_is_none() {
    let err = io_error("plain");
    assert!(unwrap(&err).is_none());

    let fmt_err = std::fmt::Error;
    assert!(unwrap(&fmt_err).is_none());
}

#[test]
fn test_unwrap_through_boxed_error() {
    let boxed: Box<dyn std::error::Error + Send + Sync> =
        Box::new(wrap!(Error::new("root"), with_code(409)));

    let err = unwrap(boxed.as_ref()).expect("contextual");
    assert_eq!(err.code(), Some(&json!(409)));
}

fn load_user() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let failed: Result<(), Error> = Err(wrap!(
        Error::new("root"),
        with_message("query"),
        with_code(404),
        with_tags(["db"])
    ));
    failed?;
    Ok(())
}

#[test]
fn test_boxed_contextual_error_can_be_rewrapped() {
    let boxed = load_user().unwrap_err();
    let inner = unwrap(boxed.as_ref()).expect("contextual").clone();

    let err = wrap(Extracted::from(boxed), [with_message("load user")]);
    assert_eq!(err.full_message(), "load user: query: root");
    assert_eq!(err.code(), Some(&json!(404)));
    assert!(err.has_tag("db"));
    assert!(err.stack_trace().len() >= inner.stack_trace().len());

    let err = load_user()
        .map_err(Extracted::from)
        .wrap_with([with_code(500)])
        .unwrap_err();
    assert_eq!(err.full_message(), "query: root");
    assert_eq!(err.code(), Some(&json!(500)));
}

#[test]
fn test_boxed_foreign_error_is_structured() {
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(io_error("gone"));
    let err = wrap!(Extracted::from(boxed), with_message("open"));

    assert_eq!(err.to_string(), "open: gone");
    assert!(err.cause().downcast_ref::<io::Error>().is_some());
}

#[test]
fn test_message_stack_order() {
    let mid = wrap!(Error::new("root"), with_message("mid"));
    let outer = wrap!(mid, with_message("outer"));

    assert_eq!(outer.full_message(), "outer: mid: root");
    assert_eq!(outer.last_message(), "outer");
}

#[test]
fn test_double_wrap_without_annotators() {
    let err = wrap!(wrap!(Error::new("root")));

    assert_eq!(err.full_message(), "root");
    assert_eq!(err.to_string(), "root");
}

#[test]
fn test_rewrap_preserves_metadata() {
    let inner = wrap!(
        Error::new("root"),
        with_message("query"),
        with_code(404),
        with_tags(["db", "read"]),
        with_param("id", 7),
        with_ignorable(true)
    );
    let outer = wrap!(inner.clone());

    assert_eq!(outer.messages(), inner.messages());
    assert_eq!(outer.code(), inner.code());
    assert_eq!(outer.tags(), inner.tags());
    assert_eq!(outer.params(), inner.params());
    assert_eq!(outer.is_ignorable(), inner.is_ignorable());
    assert!(outer.stack_trace().len() >= inner.stack_trace().len());
}

#[test]
fn test_wrap_never_mutates_the_wrapped_value() {
    let original = wrap!(Error::new("root"), with_message("mid"), with_tags(["a"]));
    let outer = wrap!(
        original.clone(),
        with_message("outer"),
        with_code(500),
        with_tags(["b"]),
        with_param("k", "v")
    );

    assert_eq!(original.full_message(), "mid: root");
    assert!(original.code().is_none());
    assert!(!original.has_tag("b"));
    assert!(original.params().is_empty());

    assert_eq!(outer.full_message(), "outer: mid: root");
    assert!(outer.has_tag("a") && outer.has_tag("b"));
}

#[test]
fn test_annotators_apply_in_order() {
    let err = wrap!(
        Error::new("root"),
        with_code(1),
        with_message("a"),
        with_code(2),
        with_message("b"),
        with_ignorable(true),
        with_ignorable(false)
    );

    assert_eq!(err.code(), Some(&json!(2)));
    assert_eq!(err.full_message(), "b: a: root");
    assert!(!err.is_ignorable());
}

#[test]
fn test_params_last_write_wins() {
    let err = wrap!(
        io_error("x"),
        with_params([("k", json!(1)), ("j", json!(2))]),
        with_param("k", "override")
    );

    assert_eq!(err.param("k"), Some(&json!("override")));
    assert_eq!(err.param("j"), Some(&json!(2)));
    assert_eq!(err.params().len(), 2);
}

#[test]
fn test_tags_are_a_set() {
    let err = wrap!(io_error("x"), with_tags(["a", "b"]), with_tags(["a"]));

    assert_eq!(err.tags().len(), 2);
    assert!(err.has_tag("a"));
    assert!(err.has_tag("b"));
}

#[test]
fn test_custom_annotator() {
    let retry = Annotator::new(|err: &mut Error| {
        err.add_tags(["retryable"]);
        err.insert_params([("attempts", 3)]);
    });
    let err = wrap(io_error("busy"), [retry, with_message("send")]);

    assert!(err.has_tag("retryable"));
    assert_eq!(err.param("attempts"), Some(&json!(3)));
    assert_eq!(err.full_message(), "send: busy");
}

#[test]
fn test_result_ext_context() {
    let failed: Result<(), io::Error> = Err(io_error("permission denied"));
    let err = failed.context("open socket").unwrap_err();
    assert_eq!(err.full_message(), "open socket: permission denied");

    let failed: Result<(), Error> = Err(err);
    let err = failed
        .wrap_with([with_message("start server"), with_code(500)])
        .unwrap_err();
    assert_eq!(err.full_message(), "start server: open socket: permission denied");
    assert_eq!(err.code(), Some(&json!(500)));
}

#[test]
fn test_extract_variants() {
    match Error::new("ours").extract() {
        Extracted::Contextual(err) => assert_eq!(err.to_string(), "ours"),
        Extracted::Structured { .. } => panic!("contextual error not recognised"),
    }

    match io_error("theirs").extract() {
        Extracted::Structured {
            message,
            stack_trace,
            ..
        } => {
            assert_eq!(message, "theirs");
            assert!(stack_trace.is_empty());
        }
        Extracted::Contextual(_) => panic!("foreign error taken as contextual"),
    }
}

#[test]
fn test_traced_contextual_error_is_copied() {
    let err = wrap!(Traced::new(Error::new("inner")), with_message("outer"));
    assert_eq!(err.full_message(), "outer: inner");
}

#[test]
fn test_top_level_anyhow_handler_recovers_metadata() {
    fn handler() -> anyhow::Result<()> {
        Err(wrap!(
            Error::new("upstream timeout"),
            with_message("fetch profile"),
            with_code(504),
            with_ignorable(true)
        )
        .into())
    }

    let err = handler().unwrap_err();
    let ctx = err.downcast_ref::<Error>().expect("contextual error");

    assert_eq!(ctx.full_message(), "fetch profile: upstream timeout");
    assert_eq!(ctx.code(), Some(&json!(504)));
    assert!(ctx.is_ignorable());
}

proptest! {
    #[test]
    fn prop_message_stack_is_latest_first(layers in proptest::collection::vec("[a-z]{1,8}", 0..6)) {
        let mut err = Error::new("root");
        for layer in &layers {
            err = wrap!(err, with_message(layer.clone()));
        }

        let mut expected: Vec<&str> = layers.iter().rev().map(String::as_str).collect();
        expected.push("root");

        prop_assert_eq!(err.to_string(), expected.join(": "));
        prop_assert_eq!(err.last_message(), layers.last().map_or("", String::as_str));
        prop_assert!(unwrap(&err).is_some());
    }
}
