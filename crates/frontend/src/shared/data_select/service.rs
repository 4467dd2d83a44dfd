use contracts::shared::data_select::{
    non_empty, sortable_properties, DataSelectQuery, DataSelectQueryBuilder, SortBy,
};
use std::collections::HashMap;
use thiserror::Error;

use super::params::StateParamsSource;
use super::resource::ListResource;
use crate::shared::namespace::NamespaceContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSelectAction {
    Paginate,
    Sort,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataSelectError {
    #[error("Data select query for given data select id {id} does not exist")]
    MissingQuery { id: String },

    #[error("Data select id {id} is not registered")]
    NotRegistered { id: String },
}

/// Keeps the page and sort order currently selected in every list widget,
/// keyed by data select id, and forwards the resulting query to a list
/// resource.
pub struct DataSelectService<N, P> {
    instances: HashMap<String, DataSelectQuery>,
    namespaces: N,
    state_params: P,
    rows_limit: usize,
}

impl<N, P> DataSelectService<N, P>
where
    N: NamespaceContext,
    P: StateParamsSource,
{
    pub fn new(namespaces: N, state_params: P, rows_limit: usize) -> Self {
        Self {
            instances: HashMap::new(),
            namespaces,
            state_params,
            rows_limit,
        }
    }

    pub fn is_registered(&self, data_select_id: &str) -> bool {
        self.instances.contains_key(data_select_id)
    }

    /// Store a default query under the id, dropping whatever was there
    pub fn register_instance(&mut self, data_select_id: impl Into<String>) {
        let data_select_id = data_select_id.into();
        log::debug!("data select: registering '{}'", data_select_id);
        let query = self.query_builder().build();
        self.instances.insert(data_select_id, query);
    }

    pub fn min_rows_limit(&self) -> usize {
        self.rows_limit
    }

    pub fn query(&self, data_select_id: &str) -> Option<&DataSelectQuery> {
        self.instances.get(data_select_id)
    }

    pub fn namespaces(&self) -> &N {
        &self.namespaces
    }

    pub fn namespaces_mut(&mut self) -> &mut N {
        &mut self.namespaces
    }

    pub fn state_params_mut(&mut self) -> &mut P {
        &mut self.state_params
    }

    /// Move the widget to the page of `query` and fetch it
    pub fn paginate<R: ListResource>(
        &mut self,
        resource: &R,
        data_select_id: &str,
        query: Option<&DataSelectQuery>,
    ) -> Result<R::Response, DataSelectError> {
        self.select_data(resource, data_select_id, query, DataSelectAction::Paginate)
    }

    /// Change the sort order of the widget and fetch the list again
    pub fn sort<R: ListResource>(
        &mut self,
        resource: &R,
        data_select_id: &str,
        ascending: bool,
        sort_by: &str,
    ) -> Result<R::Response, DataSelectError> {
        let ascending = flip_for_age(sort_by, ascending);
        let query = self
            .query_builder()
            .ascending(ascending)
            .sort_by(sort_by)
            .build();
        self.select_data(resource, data_select_id, Some(&query), DataSelectAction::Sort)
    }

    /// Query for a one-off list fetch outside any registered widget
    pub fn default_resource_query(
        &self,
        namespace: Option<&str>,
        name: Option<&str>,
    ) -> DataSelectQuery {
        let mut query = self.query_builder().namespace(namespace).name(name).build();
        if self.is_multi_namespace(query.namespace.as_deref()) {
            query.namespace = None;
        }
        query
    }

    fn query_builder(&self) -> DataSelectQueryBuilder {
        DataSelectQueryBuilder::new().items_per_page(self.rows_limit)
    }

    fn is_multi_namespace(&self, namespace: Option<&str>) -> bool {
        namespace.is_some_and(|ns| self.namespaces.is_multi_namespace(ns))
    }

    fn select_data<R: ListResource>(
        &mut self,
        resource: &R,
        data_select_id: &str,
        query: Option<&DataSelectQuery>,
        action: DataSelectAction,
    ) -> Result<R::Response, DataSelectError> {
        let Some(selected) = query else {
            return Err(DataSelectError::MissingQuery {
                id: data_select_id.to_string(),
            });
        };

        let stored = self.instances.get_mut(data_select_id).ok_or_else(|| {
            DataSelectError::NotRegistered {
                id: data_select_id.to_string(),
            }
        })?;

        // Route parameters take precedence over what the widget remembers.
        let name = first_non_empty([self.state_params.object_name(), stored.name.take()]);
        let mut namespace = first_non_empty([
            self.state_params.object_namespace(),
            self.state_params.namespace(),
            stored.namespace.take(),
        ]);

        if namespace
            .as_deref()
            .is_some_and(|ns| self.namespaces.is_multi_namespace(ns))
        {
            log::trace!("data select '{}': namespace cleared to all", data_select_id);
            namespace = None;
        }

        stored.name = non_empty(selected.name.as_deref()).or(name);
        stored.namespace = non_empty(selected.namespace.as_deref()).or(namespace);

        match action {
            DataSelectAction::Paginate => stored.page = selected.page,
            DataSelectAction::Sort => stored.sort_by = selected.sort_by.clone(),
        }

        log::debug!(
            "data select '{}': {:?} page={} sort={} namespace='{}'",
            data_select_id,
            action,
            stored.page,
            stored.sort_by.encode(),
            stored.namespace_or_all()
        );

        Ok(resource.get(stored))
    }
}

/// Age grows as the creation timestamp shrinks, so the direction of the
/// age column is reversed on the wire.
fn flip_for_age(property: &str, ascending: bool) -> bool {
    if property == sortable_properties::AGE {
        !ascending
    } else {
        ascending
    }
}

/// Sort order as the user sees it in the column header, given the stored one
pub fn displayed_sort(stored: &SortBy) -> SortBy {
    SortBy::new(
        stored.property.clone(),
        flip_for_age(&stored.property, stored.ascending),
    )
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|v| !v.is_empty())
}
