//! Компонент пагинации, привязанный к реестру data select
//!
//! В отличие от обычных контролов пагинации, страница не хранится на
//! странице списка: каждый переход идёт через `DataSelectContext::paginate`,
//! который применяет параметры маршрута и сам запускает загрузку.
//!
//! # Примеры
//!
//! ```rust,ignore
//! <DataSelectPagination
//!     data_select_id="pod-list"
//!     resource=resource
//!     total_count=total_count
//!     on_loaded=on_loaded
//!     on_error=on_error
//! />
//! ```

use contracts::shared::data_select::DataSelectQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use thaw::*;

use crate::shared::data_select::{use_data_select, HttpListResource};

/// Количество страниц для `total_count` строк (минимум одна)
pub fn page_count(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 || total_count == 0 {
        1
    } else {
        total_count.div_ceil(page_size)
    }
}

/// Контролы пагинации для зарегистрированного data select id
///
/// Автоматически:
/// - Регистрирует виджет, если он ещё не зарегистрирован
/// - Начинает с сохранённой в реестре страницы
/// - Передаёт загруженную страницу в `on_loaded`, ошибки в `on_error`
#[component]
pub fn DataSelectPagination<T>(
    /// Data select id виджета списка
    #[prop(into)]
    data_select_id: String,

    /// Эндпоинт списка
    resource: HttpListResource<T>,

    /// Общее количество строк на всех страницах
    #[prop(into)]
    total_count: Signal<usize>,

    /// Получает каждую загруженную страницу
    on_loaded: Callback<T>,

    /// Получает ошибки загрузки
    on_error: Callback<String>,
) -> impl IntoView
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let data_select = use_data_select();
    data_select.ensure_registered(&data_select_id);

    let initial_page = data_select
        .query(&data_select_id)
        .map(|q| q.page)
        .unwrap_or(1);
    let current_page = RwSignal::new(initial_page);
    let page_size = data_select.min_rows_limit();
    let total_pages = Signal::derive(move || page_count(total_count.get(), page_size));

    let id = StoredValue::new(data_select_id);
    let resource = StoredValue::new(resource);

    let go_to = move |page: usize| {
        let query = DataSelectQuery::builder().page(page).build();
        let pending = resource.with_value(|resource| {
            id.with_value(|id| data_select.paginate(resource, id, Some(&query)))
        });

        match pending {
            Ok(pending) => {
                current_page.set(page);
                spawn_local(async move {
                    match pending.await {
                        Ok(list) => on_loaded.run(list),
                        Err(e) => on_error.run(e),
                    }
                });
            }
            Err(e) => {
                log::error!("pagination failed: {}", e);
                on_error.run(e.to_string());
            }
        }
    };

    let at_first = Signal::derive(move || current_page.get() <= 1);
    let at_last = Signal::derive(move || current_page.get() >= total_pages.get());

    view! {
        <div class="pagination-controls">
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| go_to(1)
                disabled=at_first
            >
                "«"
            </Button>
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| go_to(current_page.get_untracked().saturating_sub(1).max(1))
                disabled=at_first
            >
                "‹"
            </Button>
            <span class="pagination-info">
                {move || {
                    format!(
                        "{} / {} ({})",
                        current_page.get(),
                        total_pages.get(),
                        total_count.get()
                    )
                }}
            </span>
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| go_to(current_page.get_untracked() + 1)
                disabled=at_last
            >
                "›"
            </Button>
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| go_to(total_pages.get_untracked())
                disabled=at_last
            >
                "»"
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(95, 10), 10);
        assert_eq!(page_count(5, 0), 1);
    }
}
