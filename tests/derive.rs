use forma::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    name: String,
    #[forma(rename = "email_address")]
    email: String,
    age: u32,
}

fn john() -> User {
    User {
        name: "John Doe".to_owned(),
        email: "john@example.com".to_owned(),
        age: 30,
    }
}

#[test]
fn struct_renders_fields_in_declaration_order() {
    let text = forma::json::to_string(&john()).unwrap();
    assert_eq!(
        text,
        r#"{"name":"John Doe","email_address":"john@example.com","age":30}"#
    );
}

#[test]
fn struct_round_trips() {
    let text = forma::json::to_string(&john()).unwrap();
    let back: User = forma::json::from_str(&text).unwrap();
    assert_eq!(back, john());
}

#[test]
fn unknown_keys_are_ignored() {
    let text = r#"{"name":"John Doe","email_address":"john@example.com","age":30,"extra":[1,2]}"#;
    let back: User = forma::json::from_str(text).unwrap();
    assert_eq!(back, john());
}

#[test]
fn missing_required_field_fails_with_its_path() {
    let err = forma::json::from_str::<User>(r#"{"name":"John Doe","age":30}"#).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("`email_address`"), "{message}");
    assert!(message.contains("found null"), "{message}");
}

#[test]
fn wrong_field_type_fails_with_its_path() {
    let err = forma::json::from_str::<User>(
        r#"{"name":"John Doe","email_address":"john@example.com","age":"thirty"}"#,
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("`age`"), "{message}");
    assert!(message.contains("expected number"), "{message}");
    assert!(message.contains("found string"), "{message}");
}

// -----------------------------------------------------------------------------
// Optional and defaulted fields

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Profile {
    login: String,
    bio: Option<String>,
    #[forma(default)]
    karma: u32,
    #[forma(default = "default_theme")]
    theme: String,
}

fn default_theme() -> String {
    "dark".to_owned()
}

#[test]
fn missing_optional_field_becomes_none() {
    let back: Profile = forma::json::from_str(r#"{"login":"ada"}"#).unwrap();
    assert_eq!(back.bio, None);
    assert_eq!(back.karma, 0);
    assert_eq!(back.theme, "dark");
}

#[test]
fn explicit_null_matches_absence() {
    let back: Profile = forma::json::from_str(r#"{"login":"ada","bio":null}"#).unwrap();
    assert_eq!(back.bio, None);
}

#[test]
fn present_fields_win_over_defaults() {
    let back: Profile =
        forma::json::from_str(r#"{"login":"ada","bio":"hi","karma":7,"theme":"light"}"#).unwrap();
    assert_eq!(back.bio.as_deref(), Some("hi"));
    assert_eq!(back.karma, 7);
    assert_eq!(back.theme, "light");
}

#[test]
fn none_renders_as_null() {
    let profile = Profile {
        login: "ada".to_owned(),
        bio: None,
        karma: 0,
        theme: "dark".to_owned(),
    };
    assert_eq!(
        forma::json::to_string(&profile).unwrap(),
        r#"{"login":"ada","bio":null,"karma":0,"theme":"dark"}"#
    );
}

// -----------------------------------------------------------------------------
// Skips and custom conversions

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Session {
    user: String,
    #[forma(skip)]
    cached_score: u32,
    #[forma(serialize_with = "port_to_string", deserialize_with = "port_from_string")]
    port: u16,
}

fn port_to_string<S: forma::Serializer>(
    port: &u16,
    serializer: S,
) -> Result<S::Ok, forma::SerializeError> {
    serializer.serialize_string(&port.to_string())
}

fn port_from_string<D: forma::Deserializer>(deserializer: D) -> Result<u16, forma::DeserializeError> {
    let text = String::deserialize(deserializer)?;
    text.parse()
        .map_err(|_| forma::DeserializeError::custom(format!("invalid port `{text}`")))
}

#[test]
fn skipped_fields_stay_out_of_the_output() {
    let session = Session {
        user: "ada".to_owned(),
        cached_score: 99,
        port: 8080,
    };
    let text = forma::json::to_string(&session).unwrap();
    assert_eq!(text, r#"{"user":"ada","port":"8080"}"#);

    let back: Session = forma::json::from_str(&text).unwrap();
    assert_eq!(back.cached_score, 0);
    assert_eq!(back.port, 8080);
}

#[test]
fn skipped_fields_ignore_input_values() {
    let back: Session =
        forma::json::from_str(r#"{"user":"ada","cached_score":42,"port":"1"}"#).unwrap();
    assert_eq!(back.cached_score, 0);
}

// -----------------------------------------------------------------------------
// Nesting

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Post {
    title: String,
    author: User,
    tags: Vec<String>,
}

#[test]
fn nested_failures_report_dotted_paths() {
    let err = forma::json::from_str::<Post>(
        r#"{"title":"t","author":{"name":"n","email_address":9,"age":1},"tags":[]}"#,
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("`author.email_address`"), "{message}");
}

#[test]
fn element_failures_report_indexed_paths() {
    let err = forma::json::from_str::<Post>(
        r#"{"title":"t","author":{"name":"n","email_address":"e","age":1},"tags":["ok",5]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("`tags[1]`"), "{err}");
}

#[test]
fn two_level_nesting_round_trips_in_both_formats() {
    let post = Post {
        title: "Visitors".to_owned(),
        author: john(),
        tags: vec!["rust".to_owned(), "serialization".to_owned()],
    };

    let json = forma::json::to_string(&post).unwrap();
    assert_eq!(forma::json::from_str::<Post>(&json).unwrap(), post);

    let yaml = forma::yaml::to_string(&post).unwrap();
    assert_eq!(forma::yaml::from_str::<Post>(&yaml).unwrap(), post);
}

// -----------------------------------------------------------------------------
// Newtype structs

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct UserId(u64);

#[test]
fn newtype_structs_are_transparent() {
    assert_eq!(forma::json::to_string(&UserId(7)).unwrap(), "7");
    assert_eq!(forma::json::from_str::<UserId>("7").unwrap(), UserId(7));
}
