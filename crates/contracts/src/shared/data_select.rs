use serde::{Deserialize, Serialize};

/// Default number of rows on one page of a list widget
pub const ITEMS_PER_PAGE: usize = 10;

/// Column names accepted by the list endpoints for sorting
pub mod sortable_properties {
    pub const NAME: &str = "name";
    /// Derived from the creation timestamp on the server side
    pub const AGE: &str = "age";
    pub const STATUS: &str = "status";
}

/// Returns the value as an owned string unless it is missing or empty
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Sort order of a list: column plus direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub property: String,
    pub ascending: bool,
}

impl SortBy {
    pub fn new(property: impl Into<String>, ascending: bool) -> Self {
        Self {
            property: property.into(),
            ascending,
        }
    }

    /// Wire form used in the `sortBy` query parameter, e.g. `a,name` or `d,age`
    pub fn encode(&self) -> String {
        let direction = if self.ascending { "a" } else { "d" };
        format!("{},{}", direction, self.property)
    }
}

impl Default for SortBy {
    /// Newest objects first
    fn default() -> Self {
        Self::new(sortable_properties::AGE, false)
    }
}

/// Pagination, filter and sort parameters of one list widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSelectQuery {
    pub items_per_page: usize,
    /// 1-based
    pub page: usize,
    pub name: Option<String>,
    /// `None` means all namespaces
    pub namespace: Option<String>,
    pub sort_by: SortBy,
}

impl DataSelectQuery {
    pub fn builder() -> DataSelectQueryBuilder {
        DataSelectQueryBuilder::new()
    }

    /// Namespace path segment, empty when the query spans all namespaces
    pub fn namespace_or_all(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }
}

impl Default for DataSelectQuery {
    fn default() -> Self {
        DataSelectQueryBuilder::new().build()
    }
}

/// Builder for [`DataSelectQuery`].
///
/// Empty names and namespaces are treated as unset, so route parameters can be
/// passed through without checking them first.
#[derive(Debug, Clone)]
pub struct DataSelectQueryBuilder {
    items_per_page: usize,
    page: usize,
    name: Option<String>,
    namespace: Option<String>,
    sort_by: String,
    ascending: bool,
}

impl Default for DataSelectQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSelectQueryBuilder {
    pub fn new() -> Self {
        let sort = SortBy::default();
        Self {
            items_per_page: ITEMS_PER_PAGE,
            page: 1,
            name: None,
            namespace: None,
            sort_by: sort.property,
            ascending: sort.ascending,
        }
    }

    pub fn items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn name(mut self, name: Option<&str>) -> Self {
        self.name = non_empty(name);
        self
    }

    pub fn namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = non_empty(namespace);
        self
    }

    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    pub fn sort_by(mut self, property: impl Into<String>) -> Self {
        self.sort_by = property.into();
        self
    }

    pub fn build(self) -> DataSelectQuery {
        DataSelectQuery {
            items_per_page: self.items_per_page,
            page: self.page,
            name: self.name,
            namespace: self.namespace,
            sort_by: SortBy::new(self.sort_by, self.ascending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let query = DataSelectQuery::builder().build();
        assert_eq!(query.items_per_page, ITEMS_PER_PAGE);
        assert_eq!(query.page, 1);
        assert_eq!(query.name, None);
        assert_eq!(query.namespace, None);
        assert_eq!(query.sort_by, SortBy::new(sortable_properties::AGE, false));
        assert_eq!(query, DataSelectQuery::default());
    }

    #[test]
    fn test_builder_ignores_empty_filters() {
        let query = DataSelectQuery::builder()
            .name(Some(""))
            .namespace(Some("kube-system"))
            .build();
        assert_eq!(query.name, None);
        assert_eq!(query.namespace.as_deref(), Some("kube-system"));
        assert_eq!(query.namespace_or_all(), "kube-system");
    }

    #[test]
    fn test_sort_by_encoding() {
        assert_eq!(SortBy::new("name", true).encode(), "a,name");
        assert_eq!(SortBy::default().encode(), "d,age");
    }

    #[test]
    fn test_query_json_uses_camel_case() {
        let query = DataSelectQuery::builder().page(3).name(Some("nginx")).build();
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["itemsPerPage"], 10);
        assert_eq!(json["page"], 3);
        assert_eq!(json["name"], "nginx");
        assert_eq!(json["sortBy"]["property"], "age");
    }
}
