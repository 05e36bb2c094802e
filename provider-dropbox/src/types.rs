//! Dropbox API request and response types
//!
//! Data structures for the Dropbox API v2 endpoints the connector calls.

use core_auth::{AccessToken, AccountId, Cursor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a `list_folder` feed: a file, folder or deletion.
///
/// See: https://www.dropbox.com/developers/documentation/http/documentation#files-list_folder
///
/// The entry is held exactly as the provider sent it, explicit `null`s
/// included, and serializes back to the same JSON object. Accessors read the
/// fields every entry type shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileEntry {
    raw: Map<String, Value>,
}

impl FileEntry {
    /// Entry kind: `file`, `folder` or `deleted`
    pub fn tag(&self) -> &str {
        self.str_field(".tag").unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or_default()
    }

    /// Absent on deleted entries
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn path_lower(&self) -> Option<&str> {
        self.str_field("path_lower")
    }

    pub fn path_display(&self) -> Option<&str> {
        self.str_field("path_display")
    }

    /// Any other field (sizes, revisions, media info, ...)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.raw
    }

    pub fn is_file(&self) -> bool {
        self.tag() == "file"
    }

    pub fn is_folder(&self) -> bool {
        self.tag() == "folder"
    }

    pub fn is_deleted(&self) -> bool {
        self.tag() == "deleted"
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }
}

/// `files/list_folder/get_latest_cursor` request body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ListFolderArg {
    pub path: String,
    pub recursive: bool,
    pub include_media_info: bool,
    pub include_deleted: bool,
    pub include_has_explicit_shared_members: bool,
    pub include_mounted_folders: bool,
}

impl ListFolderArg {
    /// Whole tree, recursive, with media info, without deleted entries.
    pub fn full_tree() -> Self {
        Self {
            path: String::new(),
            recursive: true,
            include_media_info: true,
            include_deleted: false,
            include_has_explicit_shared_members: false,
            include_mounted_folders: true,
        }
    }
}

/// `files/list_folder/continue` request body
#[derive(Debug, Serialize)]
pub(crate) struct ListFolderContinueArg<'a> {
    pub cursor: &'a Cursor,
}

/// `files/list_folder/continue` response
#[derive(Debug, Deserialize)]
pub(crate) struct ListFolderResult {
    pub entries: Vec<FileEntry>,
    pub cursor: Cursor,
    pub has_more: bool,
}

/// `files/list_folder/get_latest_cursor` response
#[derive(Debug, Deserialize)]
pub(crate) struct LatestCursorResult {
    pub cursor: Cursor,
}

/// `users/get_account` request body
#[derive(Debug, Serialize)]
pub(crate) struct GetAccountArg<'a> {
    pub account_id: &'a AccountId,
}

/// Account record returned by both `users/get_account` and
/// `users/get_current_account`
#[derive(Debug, Deserialize)]
pub(crate) struct AccountResponse {
    pub name: AccountName,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountName {
    pub display_name: String,
}

/// `oauth2/token` response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: AccessToken,
    pub account_id: AccountId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_entry_keeps_unknown_fields() {
        let raw = json!({
            ".tag": "file",
            "name": "song.mp3",
            "id": "id:a4ayc_80_OEAAAAAAAAAXw",
            "path_lower": "/music/song.mp3",
            "path_display": "/Music/song.mp3",
            "size": 7212,
            "rev": "a1c10ce0dd78",
            "media_info": { ".tag": "pending" }
        });

        let entry: FileEntry = serde_json::from_value(raw.clone()).unwrap();
        assert!(entry.is_file());
        assert_eq!(entry.name(), "song.mp3");
        assert_eq!(entry.path_display(), Some("/Music/song.mp3"));
        assert_eq!(entry.get("size"), Some(&json!(7212)));

        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn test_deleted_entry_has_no_id() {
        let entry: FileEntry = serde_json::from_value(json!({
            ".tag": "deleted",
            "name": "old.txt",
            "path_lower": "/old.txt"
        }))
        .unwrap();

        assert!(entry.is_deleted());
        assert_eq!(entry.id(), None);
        assert_eq!(entry.as_map().len(), 3);
    }

    #[test]
    fn test_file_entry_keeps_explicit_nulls() {
        let raw = json!({
            ".tag": "folder",
            "name": "Photos",
            "id": null,
            "path_display": null,
            "sharing_info": null
        });

        let entry: FileEntry = serde_json::from_value(raw.clone()).unwrap();
        assert!(entry.is_folder());
        assert_eq!(entry.id(), None);
        assert_eq!(entry.get("id"), Some(&Value::Null));

        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn test_full_tree_arg_wire_shape() {
        let body = serde_json::to_value(ListFolderArg::full_tree()).unwrap();

        assert_eq!(
            body,
            json!({
                "path": "",
                "recursive": true,
                "include_media_info": true,
                "include_deleted": false,
                "include_has_explicit_shared_members": false,
                "include_mounted_folders": true
            })
        );
    }

    #[test]
    fn test_token_response_ignores_extra_fields() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"T1","token_type":"bearer","uid":"12345","account_id":"A1"}"#,
        )
        .unwrap();

        assert_eq!(response.access_token.as_str(), "T1");
        assert_eq!(response.account_id.as_str(), "A1");
    }
}
