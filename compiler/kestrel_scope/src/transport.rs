//! Output boundary towards the serializer.

/// What a scope contributes to the serialized configuration: its type
/// (`main` for the top scope) and optional name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TransportNode {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_name: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
}
