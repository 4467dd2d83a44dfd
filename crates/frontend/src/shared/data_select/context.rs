//! Контекст реестра data select для всего приложения
//!
//! Реестр создаётся один раз в `App` и раздаётся через Leptos context.
//! Виджеты списков (пагинация, сортируемые заголовки) получают его через
//! `use_data_select()` и меняют страницу/сортировку только через него.
//!
//! # Примеры
//!
//! ```rust,ignore
//! // В корне приложения
//! provide_data_select(&config);
//!
//! // На странице списка
//! let data_select = use_data_select();
//! data_select.sync_location();
//! data_select.ensure_registered("pod-list");
//! let pending = data_select.reload(&resource, "pod-list")?;
//! ```

use contracts::shared::data_select::{DataSelectQuery, SortBy};
use leptos::prelude::*;

use super::params::StateParams;
use super::resource::ListResource;
use super::service::{displayed_sort, DataSelectError, DataSelectService};
use crate::shared::config::Config;
use crate::shared::namespace::NamespaceService;

pub type AppDataSelectService = DataSelectService<NamespaceService, StateParams>;

/// Копируемый хэндл реестра. Все копии ссылаются на один реестр,
/// поэтому его можно свободно захватывать в обработчики событий.
#[derive(Clone, Copy)]
pub struct DataSelectContext {
    service: StoredValue<AppDataSelectService>,
}

impl DataSelectContext {
    /// Реестр с параметрами маршрута из текущего URL
    pub fn new(config: &Config) -> Self {
        Self::with_state_params(config, StateParams::from_location())
    }

    pub fn with_state_params(config: &Config, params: StateParams) -> Self {
        let mut namespaces = NamespaceService::new(config.data_select.all_namespaces_key.clone());
        namespaces.set_current(params.namespace.clone());
        let service = DataSelectService::new(namespaces, params, config.data_select.items_per_page);
        Self {
            service: StoredValue::new(service),
        }
    }

    /// Регистрирует виджет, только если у него ещё нет состояния:
    /// перемонтированный виджет сохраняет свою страницу
    pub fn ensure_registered(&self, data_select_id: &str) {
        self.service.update_value(|svc| {
            if !svc.is_registered(data_select_id) {
                svc.register_instance(data_select_id);
            }
        });
    }

    pub fn query(&self, data_select_id: &str) -> Option<DataSelectQuery> {
        self.service
            .with_value(|svc| svc.query(data_select_id).cloned())
    }

    /// Сортировка в том виде, в каком её показывают заголовки колонок
    pub fn displayed_sort(&self, data_select_id: &str) -> Option<SortBy> {
        self.service
            .with_value(|svc| svc.query(data_select_id).map(|q| displayed_sort(&q.sort_by)))
    }

    pub fn min_rows_limit(&self) -> usize {
        self.service.with_value(|svc| svc.min_rows_limit())
    }

    /// Выбраны ли сейчас все пространства имён
    pub fn is_all_namespaces(&self) -> bool {
        self.service
            .with_value(|svc| svc.namespaces().is_all_selected())
    }

    /// Перечитать параметры маршрута после навигации
    pub fn sync_location(&self) {
        self.set_state_params(StateParams::from_location());
    }

    pub fn set_state_params(&self, params: StateParams) {
        self.service.update_value(|svc| {
            svc.namespaces_mut().set_current(params.namespace.clone());
            *svc.state_params_mut() = params;
        });
    }

    pub fn paginate<R: ListResource>(
        &self,
        resource: &R,
        data_select_id: &str,
        query: Option<&DataSelectQuery>,
    ) -> Result<R::Response, DataSelectError> {
        self.service
            .try_update_value(|svc| svc.paginate(resource, data_select_id, query))
            .unwrap_or_else(|| not_registered(data_select_id))
    }

    /// Загрузить сохранённую страницу виджета заново, с учётом параметров
    /// маршрута и правила "все пространства имён"
    pub fn reload<R: ListResource>(
        &self,
        resource: &R,
        data_select_id: &str,
    ) -> Result<R::Response, DataSelectError> {
        let page = self
            .service
            .try_with_value(|svc| svc.query(data_select_id).map(|q| q.page))
            .flatten()
            .ok_or_else(|| DataSelectError::NotRegistered {
                id: data_select_id.to_string(),
            })?;
        let query = DataSelectQuery::builder().page(page).build();
        self.paginate(resource, data_select_id, Some(&query))
    }

    pub fn sort<R: ListResource>(
        &self,
        resource: &R,
        data_select_id: &str,
        ascending: bool,
        sort_by: &str,
    ) -> Result<R::Response, DataSelectError> {
        self.service
            .try_update_value(|svc| svc.sort(resource, data_select_id, ascending, sort_by))
            .unwrap_or_else(|| not_registered(data_select_id))
    }

    pub fn default_resource_query(
        &self,
        namespace: Option<&str>,
        name: Option<&str>,
    ) -> DataSelectQuery {
        self.service
            .with_value(|svc| svc.default_resource_query(namespace, name))
    }
}

// The stored value is gone once its owner is disposed.
fn not_registered<T>(data_select_id: &str) -> Result<T, DataSelectError> {
    Err(DataSelectError::NotRegistered {
        id: data_select_id.to_string(),
    })
}

pub fn provide_data_select(config: &Config) -> DataSelectContext {
    let context = DataSelectContext::new(config);
    provide_context(context);
    context
}

pub fn use_data_select() -> DataSelectContext {
    use_context::<DataSelectContext>().expect("DataSelectContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::future::{ready, Ready};

    const ID: &str = "pod-list";

    #[derive(Default)]
    struct RecordingResource {
        calls: RefCell<Vec<DataSelectQuery>>,
    }

    impl RecordingResource {
        fn last(&self) -> DataSelectQuery {
            self.calls.borrow().last().cloned().unwrap()
        }
    }

    impl ListResource for RecordingResource {
        type Response = Ready<()>;

        fn get(&self, query: &DataSelectQuery) -> Self::Response {
            self.calls.borrow_mut().push(query.clone());
            ready(())
        }
    }

    fn context(search: &str) -> DataSelectContext {
        DataSelectContext::with_state_params(&Config::default(), StateParams::from_query(search))
    }

    #[test]
    fn test_reload_applies_route_params() {
        let owner = Owner::new();
        owner.set();

        let data_select = context("?namespace=kube-system&objectName=coredns");
        let resource = RecordingResource::default();
        data_select.ensure_registered(ID);

        data_select.reload(&resource, ID).unwrap();
        let sent = resource.last();
        assert_eq!(sent.namespace.as_deref(), Some("kube-system"));
        assert_eq!(sent.name.as_deref(), Some("coredns"));
        assert_eq!(sent.page, 1);
    }

    #[test]
    fn test_reload_clears_wildcard_namespace() {
        let owner = Owner::new();
        owner.set();

        let data_select = context("?namespace=_all");
        let resource = RecordingResource::default();
        data_select.ensure_registered(ID);

        assert!(data_select.is_all_namespaces());
        data_select.reload(&resource, ID).unwrap();
        assert_eq!(resource.last().namespace, None);
    }

    #[test]
    fn test_reload_unregistered_id() {
        let owner = Owner::new();
        owner.set();

        let data_select = context("");
        let resource = RecordingResource::default();
        assert_eq!(
            data_select.reload(&resource, ID).unwrap_err(),
            DataSelectError::NotRegistered { id: ID.to_string() }
        );
        assert!(resource.calls.borrow().is_empty());
    }

    #[test]
    fn test_ensure_registered_keeps_page() {
        let owner = Owner::new();
        owner.set();

        let data_select = context("");
        let resource = RecordingResource::default();
        data_select.ensure_registered(ID);
        let page_three = DataSelectQuery::builder().page(3).build();
        data_select.paginate(&resource, ID, Some(&page_three)).unwrap();

        data_select.ensure_registered(ID);
        assert_eq!(data_select.query(ID).unwrap().page, 3);

        data_select.reload(&resource, ID).unwrap();
        assert_eq!(resource.last().page, 3);
    }

    #[test]
    fn test_set_state_params_replaces_route() {
        let owner = Owner::new();
        owner.set();

        let data_select = context("?namespace=default");
        let resource = RecordingResource::default();
        data_select.ensure_registered(ID);

        data_select.set_state_params(StateParams::from_query("?namespace=_all"));
        assert!(data_select.is_all_namespaces());
        data_select.reload(&resource, ID).unwrap();
        assert_eq!(resource.last().namespace, None);

        data_select.set_state_params(StateParams::from_query("?namespace=web"));
        assert!(!data_select.is_all_namespaces());
        data_select.reload(&resource, ID).unwrap();
        assert_eq!(resource.last().namespace.as_deref(), Some("web"));
    }

    #[test]
    fn test_displayed_sort_follows_registry() {
        let owner = Owner::new();
        owner.set();

        let data_select = context("");
        let resource = RecordingResource::default();
        data_select.ensure_registered(ID);
        assert_eq!(data_select.displayed_sort(ID), Some(SortBy::new("age", true)));

        data_select.sort(&resource, ID, true, "name").unwrap();
        assert_eq!(data_select.displayed_sort(ID), Some(SortBy::new("name", true)));
        assert_eq!(data_select.displayed_sort("deployments"), None);
    }

    #[test]
    fn test_disposed_registry_reports_not_registered() {
        let owner = Owner::new();
        owner.set();

        let data_select = context("");
        let resource = RecordingResource::default();
        data_select.ensure_registered(ID);
        data_select.service.dispose();

        let page = DataSelectQuery::default();
        assert_eq!(
            data_select.paginate(&resource, ID, Some(&page)).unwrap_err(),
            DataSelectError::NotRegistered { id: ID.to_string() }
        );
        assert!(data_select.sort(&resource, ID, true, "name").is_err());
        assert!(resource.calls.borrow().is_empty());
    }
}
