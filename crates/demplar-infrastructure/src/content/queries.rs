//! GROQ projections sent to the content store.
//!
//! Defaults for class name, faction and location are applied server-side so
//! every record comes back with those fields present.

pub const CHARACTERS_QUERY: &str = r#"*[_type == "character"]{
  _id,
  name,
  cardImage,
  level,
  "className": coalesce(className, "Undecided"),
  "faction": coalesce(
    faction->{_id, name},
    {"_id": "311351ad-8f81-4299-912a-287161e5cab1", "name": "Undecided"}
  ),
  "location": coalesce(
    location->{_id, name},
    {"_id": "f00bd95c-8d32-40c3-96ba-4e4e3a1bb9c9", "name": "Kingdom"}
  ),
  buffs,
  profileUrl,
  twitterHandle,
  skills[]->{_id, name},
  talents[]->{_id, name},
  pondRefCode
}"#;

pub const NEWS_QUERY: &str = r#"*[_type == "news"]{
  _id,
  title,
  author->{_id, name},
  publishedAt,
  body
}"#;
