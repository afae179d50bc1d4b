//! App Links (applinks.org) deep-link targets, one per platform.

use serde::{Deserialize, Serialize};

use crate::metadata::decode::{assign, assign_opt, fill, Decode, Field};

/// Target for the iOS family (`ios`, `iphone`, `ipad`). Keys are read
/// relative to the platform namespace, e.g. `al:iphone:url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ios {
    // Serialized as null when absent, unlike the other platforms' urls.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

impl Decode for Ios {
    const NAME: &'static str = "Ios";
    const FIELDS: &'static [Field<Self>] = &[
        Field::key("url", "url", |i: &mut Self, raw| assign_opt(&mut i.url, raw)),
        Field::key("app_store_id", "app_store_id", |i: &mut Self, raw| {
            assign_opt(&mut i.app_store_id, raw)
        }),
        Field::key("app_name", "app_name", |i: &mut Self, raw| {
            assign_opt(&mut i.app_name, raw)
        }),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Android {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

impl Decode for Android {
    const NAME: &'static str = "Android";
    const FIELDS: &'static [Field<Self>] = &[
        Field::key("url", "url", |a: &mut Self, raw| assign_opt(&mut a.url, raw)),
        Field::key("package", "package", |a: &mut Self, raw| {
            assign(&mut a.package, raw)
        }),
        Field::key("class", "class", |a: &mut Self, raw| {
            assign_opt(&mut a.class, raw)
        }),
        Field::key("app_name", "app_name", |a: &mut Self, raw| {
            assign_opt(&mut a.app_name, raw)
        }),
    ];
}

/// Windows, Windows Phone and Universal Windows targets. Not decoded yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Windows {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

/// Web fallback. Not decoded yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Web {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub should_fallback: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<Ios>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iphone: Option<Ios>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipad: Option<Ios>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<Android>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows_phone: Option<Windows>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Windows>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows_universal: Option<Windows>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<Web>,
}

impl Decode for AppLink {
    const NAME: &'static str = "AppLink";
    const FIELDS: &'static [Field<Self>] = &[
        Field::fill_in("ios", "al:ios", |l: &mut Self, scope| fill(&mut l.ios, scope)),
        Field::fill_in("iphone", "al:iphone", |l: &mut Self, scope| {
            fill(&mut l.iphone, scope)
        }),
        Field::fill_in("ipad", "al:ipad", |l: &mut Self, scope| fill(&mut l.ipad, scope)),
        Field::fill_in("android", "al:android", |l: &mut Self, scope| {
            fill(&mut l.android, scope)
        }),
    ];
}
