use forma::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Failure {
    code: u32,
    message: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Status {
    Active,
    #[forma(rename = "on-hold")]
    OnHold,
    Failed(Failure),
}

#[test]
fn unit_variants_render_as_bare_strings() {
    assert_eq!(forma::json::to_string(&Status::Active).unwrap(), r#""Active""#);
    assert_eq!(forma::json::to_string(&Status::OnHold).unwrap(), r#""on-hold""#);
}

#[test]
fn data_variants_render_as_single_entry_objects() {
    let status = Status::Failed(Failure {
        code: 3,
        message: "gone".to_owned(),
    });
    assert_eq!(
        forma::json::to_string(&status).unwrap(),
        r#"{"Failed":{"code":3,"message":"gone"}}"#
    );
}

#[test]
fn variants_round_trip() {
    for status in [
        Status::Active,
        Status::OnHold,
        Status::Failed(Failure {
            code: 7,
            message: "x".to_owned(),
        }),
    ] {
        let text = forma::json::to_string(&status).unwrap();
        assert_eq!(forma::json::from_str::<Status>(&text).unwrap(), status);
    }
}

#[test]
fn variants_round_trip_through_yaml() {
    assert_eq!(forma::yaml::to_string(&Status::Active).unwrap(), "Active\n");
    assert_eq!(
        forma::yaml::from_str::<Status>("Active\n").unwrap(),
        Status::Active
    );

    let status = Status::Failed(Failure {
        code: 3,
        message: "gone".to_owned(),
    });
    let yaml = forma::yaml::to_string(&status).unwrap();
    assert_eq!(yaml, "Failed:\n  code: 3\n  message: gone\n");
    assert_eq!(forma::yaml::from_str::<Status>(&yaml).unwrap(), status);
}

#[test]
fn unknown_variants_are_rejected() {
    let err = forma::json::from_str::<Status>(r#""Retired""#).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("unknown variant `Retired`"), "{message}");
    assert!(message.contains("on-hold"), "{message}");
}

#[test]
fn non_enum_shapes_are_rejected() {
    let err = forma::json::from_str::<Status>("42").unwrap_err();
    assert!(err.to_string().contains("invalid enum format"), "{err}");

    // Two entries cannot name a single variant.
    let err = forma::json::from_str::<Status>(r#"{"Failed":{},"Active":null}"#).unwrap_err();
    assert!(err.to_string().contains("invalid enum format"), "{err}");
}

#[test]
fn unit_variant_with_payload_is_rejected() {
    let err = forma::json::from_str::<Status>(r#"{"Active":1}"#).unwrap_err();
    assert!(err.to_string().contains("carries no data"), "{err}");
}

#[test]
fn variant_payload_failures_report_the_variant_path() {
    let err = forma::json::from_str::<Status>(r#"{"Failed":{"code":"x","message":"m"}}"#)
        .unwrap_err();
    assert!(err.to_string().contains("`Failed.code`"), "{err}");
}
