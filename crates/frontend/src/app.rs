use leptos::prelude::*;

use crate::shared::api_utils::api_base;
use crate::shared::config::{load_config, Config};
use crate::shared::data_select::provide_data_select;
use crate::workloads::pod::ui::list::PodListPage;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {:#}", e);
        Config::default()
    });

    // One data select registry for the whole app.
    provide_data_select(&config);

    view! {
        <PodListPage api_base=api_base(config.api.port) />
    }
}
