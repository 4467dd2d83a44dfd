//! Сортируемая ячейка заголовка, привязанная к реестру data select
//!
//! Все заголовки одной таблицы получают общий сигнал `current_sort`,
//! поэтому индикатор ▲/▼ показывается только у активной колонки.
//! Начальное значение берётся из реестра (`DataSelectContext::displayed_sort`).
//!
//! # Примеры
//!
//! ```rust,ignore
//! let current_sort = RwSignal::new(data_select.displayed_sort("pod-list"));
//!
//! <DataSelectSortHeader
//!     data_select_id="pod-list"
//!     resource=resource.clone()
//!     label="Имя"
//!     property=sortable_properties::NAME
//!     current_sort=current_sort
//!     on_loaded=on_loaded
//!     on_error=on_error
//! />
//! ```

use contracts::shared::data_select::SortBy;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use thaw::*;

use crate::shared::data_select::{use_data_select, HttpListResource};

/// Индикатор сортировки для заголовка колонки
pub fn sort_indicator(current: Option<&SortBy>, property: &str) -> &'static str {
    match current {
        Some(sort) if sort.property == property => {
            if sort.ascending {
                " ▲"
            } else {
                " ▼"
            }
        }
        _ => " ⇅",
    }
}

/// Направление после клика по колонке `property`:
/// активная колонка переключается, остальные начинают по возрастанию
pub fn next_direction(current: Option<&SortBy>, property: &str) -> bool {
    match current {
        Some(sort) if sort.property == property => !sort.ascending,
        _ => true,
    }
}

/// Ячейка заголовка, пересортировывающая зарегистрированный список по клику
#[component]
pub fn DataSelectSortHeader<T>(
    /// Data select id виджета списка
    #[prop(into)]
    data_select_id: String,

    /// Эндпоинт списка для повторной загрузки
    resource: HttpListResource<T>,

    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле сортировки этой колонки
    property: &'static str,

    /// Текущая сортировка таблицы, общая для всех заголовков
    current_sort: RwSignal<Option<SortBy>>,

    /// Получает первую страницу после пересортировки
    on_loaded: Callback<T>,

    /// Получает ошибки загрузки
    on_error: Callback<String>,
) -> impl IntoView
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let data_select = use_data_select();
    data_select.ensure_registered(&data_select_id);

    let id = StoredValue::new(data_select_id);
    let resource = StoredValue::new(resource);

    let handle_click = move |_| {
        let ascending = current_sort.with_untracked(|s| next_direction(s.as_ref(), property));
        let pending = resource.with_value(|resource| {
            id.with_value(|id| data_select.sort(resource, id, ascending, property))
        });

        match pending {
            Ok(pending) => {
                current_sort.set(Some(SortBy::new(property, ascending)));
                spawn_local(async move {
                    match pending.await {
                        Ok(list) => on_loaded.run(list),
                        Err(e) => on_error.run(e),
                    }
                });
            }
            Err(e) => {
                log::error!("sort by '{}' failed: {}", property, e);
                on_error.run(e.to_string());
            }
        }
    };

    view! {
        <TableHeaderCell>
            <span class="table__sortable-header" style="cursor: pointer;" on:click=handle_click>
                {label}
                <span class="table__sort-icon">
                    {move || current_sort.with(|s| sort_indicator(s.as_ref(), property))}
                </span>
            </span>
        </TableHeaderCell>
    }
}
