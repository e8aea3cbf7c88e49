use serde::Deserialize;

use super::wire;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

/// A node paired with the cursor that points at it.
///
/// The API names the node after its type (`transaction`, `delegation`,
/// `trx`), so all of those land in `node`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Edge<T> {
    pub cursor: String,
    #[serde(alias = "transaction", alias = "delegation", alias = "trx")]
    pub node: T,
}

/// One page of a cursor-paginated list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default, deserialize_with = "wire::deserialize_u64")]
    pub total_count: u64,
    #[serde(default = "Vec::new", deserialize_with = "wire::null_as_default")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { page_info: PageInfo::default(), total_count: 0, edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// Cursor of the last edge, the only token the next page request needs.
    pub fn last_cursor(&self) -> Option<&str> {
        self.edges.last().map(|edge| edge.cursor.as_str())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }
}
