/* src/client/http/src/models.rs */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use studio_core::StudioError;

// -- Wire enums --

macro_rules! string_enum {
  ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum $name {
      $(#[serde(rename = $wire)] $variant),+
    }

    impl $name {
      pub const ALL: &'static [$name] = &[$($name::$variant),+];

      pub fn as_str(self) -> &'static str {
        match self {
          $($name::$variant => $wire),+
        }
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
      }
    }

    impl FromStr for $name {
      type Err = StudioError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
          $($wire => Ok($name::$variant),)+
          other => {
            let expected: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
            Err(StudioError::validation(format!(
              "unknown {} {other:?}, expected one of: {}",
              stringify!($name),
              expected.join(", ")
            )))
          }
        }
      }
    }
  };
}

string_enum!(
  /// State of a generation job.
  JobStatus {
    Processing => "processing",
    Completed => "completed",
    Failed => "failed",
  }
);

string_enum!(
  /// Who can see a source asset.
  AssetScope {
    Private => "private",
    System => "system",
  }
);

string_enum!(AssetType {
  GenericImage => "generic_image",
  GenericVideo => "generic_video",
  VtoProduct => "vto_product",
  VtoPersonFemale => "vto_person_female",
  VtoPersonMale => "vto_person_male",
  VtoTop => "vto_top",
  VtoBottom => "vto_bottom",
  VtoDress => "vto_dress",
  VtoShoe => "vto_shoe",
});

string_enum!(UserRole {
  User => "user",
  Creator => "creator",
  Admin => "admin",
});

// -- Collection items --

/// A generated image or video in the media gallery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
  pub id: String,
  pub workspace_id: Option<String>,
  pub user_email: String,
  pub mime_type: String,
  pub model: String,
  pub prompt: Option<String>,
  pub aspect_ratio: Option<String>,
  pub status: Option<JobStatus>,
  pub gcs_uris: Vec<String>,
  pub presigned_urls: Vec<String>,
  pub thumbnail_uris: Vec<String>,
  pub error_message: Option<String>,
  pub created_at: Option<String>,
}

/// An uploaded file usable as generation input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceAsset {
  pub id: String,
  pub workspace_id: String,
  pub user_id: String,
  pub gcs_uri: String,
  pub original_filename: String,
  pub mime_type: String,
  pub aspect_ratio: Option<String>,
  pub scope: Option<AssetScope>,
  pub asset_type: Option<AssetType>,
  pub thumbnail_gcs_uri: Option<String>,
  pub presigned_url: Option<String>,
  pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAsset {
  pub id: String,
  pub user_id: String,
  pub user_email: Option<String>,
  pub gcs_uri: String,
  pub original_filename: String,
  pub mime_type: String,
  pub presigned_url: Option<String>,
  pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
  pub id: String,
  pub email: String,
  pub name: String,
  pub picture: String,
  pub roles: Vec<UserRole>,
  pub created_at: Option<String>,
}

impl User {
  /// Users stored without roles are plain users.
  pub fn effective_roles(&self) -> Vec<UserRole> {
    if self.roles.is_empty() { vec![UserRole::User] } else { self.roles.clone() }
  }
}
