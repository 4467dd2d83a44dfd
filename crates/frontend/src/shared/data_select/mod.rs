//! Состояние пагинации и сортировки для каждого виджета списка
//!
//! - `service` — реестр запросов по data select id (`DataSelectService`)
//! - `params` — параметры маршрута из строки запроса URL
//! - `resource` — загрузка страницы списка с бэкенда
//! - `context` — общий хэндл реестра через Leptos context

pub mod context;
pub mod params;
pub mod resource;
pub mod service;

pub use context::{provide_data_select, use_data_select, DataSelectContext};
pub use params::{StateParams, StateParamsSource};
pub use resource::{HttpListResource, ListFuture, ListResource};
pub use service::{DataSelectAction, DataSelectError, DataSelectService};
