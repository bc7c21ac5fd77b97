//! Typed Operation Requests
//!
//! The transport delivers named operations with JSON argument maps. This
//! module checks them into a closed request enum at the call boundary so the
//! channel dispatches on types, not strings: unknown names and missing
//! required arguments never reach the correlator.

use serde::Serialize;
use serde_json::Value;

use crate::error::ChannelError;

/// Name given to a created document when the caller supplies none.
pub const DEFAULT_FILE_NAME: &str = "document.json";

/// Type given to a created document when the caller supplies none.
pub const DEFAULT_MIME_TYPE: &str = "application/json";

/// Wildcard type accepted by every picker.
pub const WILDCARD_MIME_TYPE: &str = "*/*";

/// The closed set of operations the storage channel serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageRequest {
    OpenDocumentForRead {
        mime_types: Vec<String>,
    },
    CreateDocumentForWrite {
        file_name: String,
        mime_type: String,
    },
    SelectExportDirectory,
    CreateFileInDirectory {
        directory_uri: String,
        file_name: String,
        mime_type: String,
    },
    WriteToUri {
        uri: String,
        content: String,
    },
    ReadFromUri {
        uri: String,
    },
    CheckPermission,
    RequestPermission,
}

impl StorageRequest {
    /// Wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenDocumentForRead { .. } => "open_document_for_read",
            Self::CreateDocumentForWrite { .. } => "create_document_for_write",
            Self::SelectExportDirectory => "select_export_directory",
            Self::CreateFileInDirectory { .. } => "create_file_in_directory",
            Self::WriteToUri { .. } => "write_to_uri",
            Self::ReadFromUri { .. } => "read_from_uri",
            Self::CheckPermission => "check_permission",
            Self::RequestPermission => "request_permission",
        }
    }

    /// Check a named transport call into a typed request.
    ///
    /// Optional arguments receive their documented defaults; missing
    /// required arguments fail with [`ChannelError::InvalidArguments`], and
    /// unrecognized names fail with [`ChannelError::NotImplemented`].
    pub fn from_call(method: &str, args: &Value) -> Result<Self, ChannelError> {
        match method {
            "open_document_for_read" => Ok(Self::OpenDocumentForRead {
                mime_types: string_seq_arg(args, "mime_types")
                    .unwrap_or_else(|| vec![WILDCARD_MIME_TYPE.to_string()]),
            }),
            "create_document_for_write" => Ok(Self::CreateDocumentForWrite {
                file_name: string_arg(args, "file_name")
                    .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
                mime_type: string_arg(args, "mime_type")
                    .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            }),
            "select_export_directory" => Ok(Self::SelectExportDirectory),
            "create_file_in_directory" => {
                let directory_uri = string_arg(args, "directory_uri").ok_or_else(|| {
                    ChannelError::InvalidArguments("Directory URI must be provided".to_string())
                })?;
                Ok(Self::CreateFileInDirectory {
                    directory_uri,
                    file_name: string_arg(args, "file_name")
                        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
                    mime_type: string_arg(args, "mime_type")
                        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
                })
            }
            "write_to_uri" => match (string_arg(args, "uri"), string_arg(args, "content")) {
                (Some(uri), Some(content)) => Ok(Self::WriteToUri { uri, content }),
                _ => Err(ChannelError::InvalidArguments(
                    "URI and content must be provided".to_string(),
                )),
            },
            "read_from_uri" => string_arg(args, "uri")
                .map(|uri| Self::ReadFromUri { uri })
                .ok_or_else(|| {
                    ChannelError::InvalidArguments("URI must be provided".to_string())
                }),
            "check_permission" => Ok(Self::CheckPermission),
            "request_permission" => Ok(Self::RequestPermission),
            other => Err(ChannelError::NotImplemented(other.to_string())),
        }
    }
}

/// Success payload of a channel call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReplyValue {
    Bool(bool),
    Text(String),
}

impl ReplyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Bool(_) => None,
        }
    }
}

fn string_arg(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_seq_arg(args: &Value, key: &str) -> Option<Vec<String>> {
    let items = args.get(key)?.as_array()?;
    let seq: Vec<String> = items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    if seq.is_empty() {
        None
    } else {
        Some(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_document_defaults_to_wildcard() {
        let request = StorageRequest::from_call("open_document_for_read", &json!({})).unwrap();
        assert_eq!(
            request,
            StorageRequest::OpenDocumentForRead {
                mime_types: vec!["*/*".to_string()],
            }
        );
    }

    #[test]
    fn test_open_document_keeps_given_types() {
        let args = json!({ "mime_types": ["text/plain", "application/json"] });
        let request = StorageRequest::from_call("open_document_for_read", &args).unwrap();
        assert_eq!(
            request,
            StorageRequest::OpenDocumentForRead {
                mime_types: vec!["text/plain".to_string(), "application/json".to_string()],
            }
        );
    }

    #[test]
    fn test_create_document_defaults() {
        let request = StorageRequest::from_call("create_document_for_write", &json!({})).unwrap();
        assert_eq!(
            request,
            StorageRequest::CreateDocumentForWrite {
                file_name: "document.json".to_string(),
                mime_type: "application/json".to_string(),
            }
        );
    }

    #[test]
    fn test_create_file_requires_directory() {
        let err = StorageRequest::from_call(
            "create_file_in_directory",
            &json!({ "file_name": "doc.json" }),
        )
        .unwrap_err();
        assert!(matches!(err, ChannelError::InvalidArguments(_)));
        assert_eq!(err.code(), "INVALID_ARGUMENTS");
    }

    #[test]
    fn test_write_requires_uri_and_content() {
        let err =
            StorageRequest::from_call("write_to_uri", &json!({ "uri": "content://doc/1" }))
                .unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENTS");

        let err =
            StorageRequest::from_call("write_to_uri", &json!({ "content": "body" })).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENTS");
    }

    #[test]
    fn test_read_requires_uri() {
        let err = StorageRequest::from_call("read_from_uri", &json!({})).unwrap_err();
        assert_eq!(
            err,
            ChannelError::InvalidArguments("URI must be provided".to_string())
        );
    }

    #[test]
    fn test_unknown_method_is_not_implemented() {
        let err = StorageRequest::from_call("defragment_storage", &json!({})).unwrap_err();
        assert_eq!(err.code(), "NOT_IMPLEMENTED");
        assert_eq!(
            err.to_string(),
            "Method not implemented: defragment_storage"
        );
    }

    #[test]
    fn test_reply_value_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(ReplyValue::Bool(true)).unwrap(),
            json!(true)
        );
        assert_eq!(
            serde_json::to_value(ReplyValue::Text("content://doc/1".to_string())).unwrap(),
            json!("content://doc/1")
        );
    }
}
