use byob::{
    ExecutionMatcher, ExecutionOp, ExecutionQuery, UQBuilder, UserQuery, UserQueryMode,
    UserQueryOp,
};
use serde_json::json;

#[test]
fn execution_query_for_failed_runs() {
    let query = ExecutionMatcher::new()
        .env("prod")
        .field("status")
        .equals("failed")
        .field("startedAt")
        .between("2024-01-01", "2024-02-01", false)
        .field("graphName")
        .not()
        .has_prefix("test_")
        .sort_desc("startedAt")
        .limit(25)
        .build();

    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({
            "envId": "prod",
            "limit": 25,
            "offset": 0,
            "filters": [
                {
                    "op": 0,
                    "field": "status",
                    "matcher": ["failed"],
                    "lowerBound": null,
                    "upperBound": null
                },
                {
                    "op": 2,
                    "field": "startedAt",
                    "matcher": [],
                    "lowerBound": "2024-01-01",
                    "upperBound": "2024-02-01"
                }
            ],
            "mustNot": [
                {
                    "op": 4,
                    "field": "graphName",
                    "matcher": ["test_"],
                    "lowerBound": null,
                    "upperBound": null
                }
            ],
            "sort": [{"Field": "startedAt", "asc": false}]
        })
    );
}

#[test]
fn execution_query_decodes_from_wire() {
    let wire = r#"{"envId":"e","filters":[{"op":1,"field":"nodeId"}]}"#;
    let query: ExecutionQuery = serde_json::from_str(wire).unwrap();
    assert_eq!(query.filters[0].op, ExecutionOp::Exists);
    assert!(query.must_not.is_empty());

    let bad = r#"{"filters":[{"op":9,"field":"x"}]}"#;
    let err = serde_json::from_str::<ExecutionQuery>(bad).unwrap_err();
    assert!(err.to_string().contains("unknown execution query operation: 9"));
}

#[test]
fn builder_reuse_keeps_earlier_clauses() {
    let mut builder = UQBuilder::new(UserQueryMode::All);
    builder.field("plan").equals("pro");
    let first = builder.build();

    builder.field("country").not_equals("FR");
    let second = builder.build();

    assert_eq!(first.checks.len(), 1);
    assert_eq!(second.checks.len(), 2);
    assert_eq!(second.checks[0], first.checks[0]);
}

#[test]
fn user_query_with_exclusions() {
    let query = UQBuilder::new(UserQueryMode::Any)
        .field("tags")
        .equals_any(["vip", "beta"])
        .field("email")
        .not()
        .exists()
        .limit(100)
        .build();

    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(json["mode"], 0);
    assert_eq!(json["limit"], 100);
    assert!(json.get("offset").is_none());
    assert_eq!(json["mustNot"][0]["field"], "email");
    assert_eq!(json["mustNot"][0]["operation"], 1);

    let decoded: UserQuery = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, query);
    assert_eq!(decoded.checks[0].operation, UserQueryOp::Equals);
}

#[test]
fn blank_field_is_rejected_even_with_whitespace() {
    let result = std::panic::catch_unwind(|| {
        ExecutionMatcher::new().field("\n\t ");
    });
    assert!(result.is_err());
}
