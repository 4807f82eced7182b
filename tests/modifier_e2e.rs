use byob::{
    merge_context_modifiers, ChangeOp, ContextModifier, ExecError, Flaggable, FlaggableChangeset,
    LogLevel, RequestContext, Scope, Value,
};
use std::collections::HashMap;

fn context_with_user() -> RequestContext {
    let mut ctx = RequestContext::new();
    ctx.user.name = "Ada".to_string();
    ctx.user.platform_id = "tg:42".to_string();
    ctx.user.data.set("plan", "free");
    ctx.session.data.set("draft", "hello");
    ctx
}

#[test]
fn parallel_branches_merge_then_apply() {
    let mut ctx = context_with_user();

    // Two branches run against the same snapshot and record edits independently.
    let mut billing = ContextModifier::new();
    billing
        .set_user("plan", "pro")
        .set("invoice", 1001)
        .log_info("billing done");

    let mut cleanup = ContextModifier::new();
    cleanup
        .delete_session("draft")
        .set("invoice", 1002)
        .error(ExecError::node(7, "checkout", 3, "card declined"));

    let merged = merge_context_modifiers(&billing, &cleanup);
    assert_eq!(merged.changes.len(), 4);
    assert_eq!(merged.logs.len(), 1);
    assert_eq!(merged.errors.len(), 1);

    merged.apply(&mut ctx);

    assert_eq!(ctx.user.data.get_string("plan"), "pro");
    assert_eq!(ctx.user.name, "Ada");
    assert_eq!(ctx.data.get_int("invoice"), 1002);
    assert!(!ctx.session.data.present("draft"));
    assert_eq!(ctx.errors.len(), 1);
    assert_eq!(ctx.last_error().map(|e| e.message.as_str()), Some("card declined"));
}

#[test]
fn merge_order_decides_last_write() {
    let mut a = ContextModifier::new();
    a.set("k", "a");
    let mut b = ContextModifier::new();
    b.set("k", "b");

    let mut ctx = RequestContext::new();
    merge_context_modifiers(&a, &b).apply(&mut ctx);
    assert_eq!(ctx.data.get_string("k"), "b");

    let mut ctx = RequestContext::new();
    merge_context_modifiers(&b, &a).apply(&mut ctx);
    assert_eq!(ctx.data.get_string("k"), "a");
}

#[test]
fn merge_leaves_inputs_untouched() {
    let mut a = ContextModifier::new();
    a.set("x", 1).log_debug("a");
    let b = a.clone();

    let merged = merge_context_modifiers(&a, &b);
    assert_eq!(merged.changes.len(), 2);
    assert_eq!(a, b);
    assert_eq!(a.changes.len(), 1);
}

#[test]
fn user_clear_wipes_identity_but_session_clear_keeps_stack() {
    let mut ctx = context_with_user();
    ctx.session.stack.push(byob::Frame { module: 1, node: 1 });

    let mut modifier = ContextModifier::new();
    modifier.clear_user().clear_session();
    modifier.apply(&mut ctx);

    assert_eq!(ctx.user, byob::RequestUser::default());
    assert!(ctx.user.data.data().is_none());
    assert!(ctx.session.data.is_empty());
    assert!(ctx.session.data.data().is_some());
    assert!(ctx.session.stack.is_on_main_graph());
}

#[test]
fn environment_lifecycle() {
    let mut ctx = RequestContext::new();
    assert!(ctx.environment_data.is_none());

    // Deleting from an unset environment is a no-op.
    let mut modifier = ContextModifier::new();
    modifier.delete_environment("missing");
    modifier.apply(&mut ctx);
    assert!(ctx.environment_data.is_none());

    let mut modifier = ContextModifier::new();
    modifier
        .set_environment("API_URL", "https://example.test")
        .set_environment("RETRIES", 3);
    modifier.apply(&mut ctx);

    let env = ctx.environment_data.as_ref().unwrap();
    assert_eq!(env.len(), 2);
    assert_eq!(env["RETRIES"], Value::Int(3));

    let mut modifier = ContextModifier::new();
    modifier.clear_environment();
    modifier.apply(&mut ctx);
    assert!(ctx.environment_data.is_none());
}

#[test]
fn apply_is_replayable_from_wire() {
    let mut modifier = ContextModifier::new();
    modifier
        .add_operation(Scope::Context, ChangeOp::Set, "tags", vec!["a".to_string()])
        .add_operation(Scope::Session, ChangeOp::Set, "count", 2)
        .log(LogLevel::Warning, "slow node");

    let wire = serde_json::to_string(&modifier).unwrap();
    let replayed: ContextModifier = serde_json::from_str(&wire).unwrap();
    assert_eq!(replayed.changes, modifier.changes);

    let mut first = RequestContext::default();
    let mut second = RequestContext::default();
    modifier.apply(&mut first);
    replayed.apply(&mut second);

    assert_eq!(first.data, second.data);
    assert_eq!(first.session, second.session);
    assert_eq!(second.data.get_string_slice("tags"), vec!["a"]);
    assert_eq!(second.session.data.get_int64("count"), 2);
}

#[test]
fn errors_accumulate_across_applies() {
    let mut ctx = RequestContext::new();

    let mut first = ContextModifier::new();
    first.error(ExecError::other(1, "main", "first"));
    first.apply(&mut ctx);

    let mut second = ContextModifier::new();
    second
        .error(ExecError::link(1, "main", 2, 3, "dangling"))
        .error(ExecError::other(1, "main", "third"));
    second.apply(&mut ctx);

    let messages: Vec<_> = ctx.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "dangling", "third"]);
    assert_eq!(ctx.last_error().unwrap().message, "third");

    // A log without errors leaves the last error alone.
    let mut quiet = ContextModifier::new();
    quiet.set("ok", true);
    quiet.apply(&mut ctx);
    assert_eq!(ctx.last_error().unwrap().message, "third");
}

#[test]
fn changeset_applies_in_order_to_any_store() {
    let mut store = Flaggable::new(HashMap::from([("keep".to_string(), Value::from(1))]));

    let mut changes = FlaggableChangeset::new();
    changes.set("a", "x");
    changes.delete("a");
    changes.set("b", 2.5);
    changes.delete("never-set");
    changes.apply(&mut store);

    assert!(!store.present("a"));
    assert!((store.get_float64("b") - 2.5).abs() < f64::EPSILON);
    assert_eq!(store.get_int("keep"), 1);
    assert_eq!(store.len(), 2);
}
