//! Listmonk entities as returned by the REST API, plus the enumerations
//! accepted in tool inputs.
//!
//! Entities are pass-through views: the bridge checks field presence and
//! types on the way back, nothing more. Status-like fields stay `String` on
//! output so a newer Listmonk release cannot break deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in documentation order
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    /// Subscriber account status
    SubscriberStatus {
        Enabled => "enabled",
        Disabled => "disabled",
        Blocklisted => "blocklisted",
    }
);

string_enum!(
    /// Campaign lifecycle status
    CampaignStatus {
        Draft => "draft",
        Scheduled => "scheduled",
        Running => "running",
        Paused => "paused",
        Finished => "finished",
        Cancelled => "cancelled",
    }
);

string_enum!(
    CampaignType {
        Regular => "regular",
        Optin => "optin",
    }
);

string_enum!(
    /// Body format of a campaign
    ContentType {
        Richtext => "richtext",
        Html => "html",
        Markdown => "markdown",
        Plain => "plain",
    }
);

string_enum!(
    /// Body format of a transactional message
    TxContentType {
        Html => "html",
        Markdown => "markdown",
        Plain => "plain",
    }
);

string_enum!(
    ListType {
        Public => "public",
        Private => "private",
    }
);

string_enum!(
    OptinType {
        Single => "single",
        Double => "double",
    }
);

string_enum!(
    TemplateType {
        Campaign => "campaign",
        Tx => "tx",
    }
);

string_enum!(
    /// Status given to a subscription when adding subscribers to lists
    SubscriptionStatus {
        Confirmed => "confirmed",
        Unconfirmed => "unconfirmed",
        Unsubscribed => "unsubscribed",
    }
);

string_enum!(
    /// Action for `PUT /api/subscribers/lists`
    ListAction {
        Add => "add",
        Remove => "remove",
    }
);

string_enum!(
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
);

string_enum!(
    /// Columns subscribers can be ordered by
    SubscriberOrderBy {
        Id => "id",
        Email => "email",
        Name => "name",
        Status => "status",
        CreatedAt => "created_at",
        UpdatedAt => "updated_at",
    }
);

/// Listmonk wraps every JSON payload in `{"data": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Paginated result set, in the order the server returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub per_page: i64,
    #[serde(default)]
    pub page: i64,
}

/// A list as embedded in a subscriber record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberList {
    pub id: i64,
    #[serde(default)]
    pub uuid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub subscription_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: i64,
    #[serde(default)]
    pub uuid: Option<String>,
    pub email: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub attribs: Map<String, Value>,
    #[serde(default)]
    pub lists: Vec<SubscriberList>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailingList {
    pub id: i64,
    #[serde(default)]
    pub uuid: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub list_type: String,
    #[serde(default)]
    pub optin: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subscriber_count: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A list as embedded in a campaign record.
///
/// Listmonk keeps the link after the list is deleted and reports its id as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignList {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    #[serde(default)]
    pub uuid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub altbody: Option<String>,
    #[serde(default)]
    pub send_at: Option<String>,
    pub status: String,
    #[serde(rename = "type", default)]
    pub campaign_type: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub template_id: Option<i64>,
    #[serde(default)]
    pub messenger: Option<String>,
    #[serde(default)]
    pub lists: Vec<CampaignList>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub clicks: i64,
    #[serde(default)]
    pub to_send: i64,
    #[serde(default)]
    pub sent: i64,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "type", default)]
    pub template_type: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
