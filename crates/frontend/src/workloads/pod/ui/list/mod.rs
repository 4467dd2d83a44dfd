use contracts::shared::data_select::sortable_properties;
use contracts::workloads::pod::PodList;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::data_select_pagination::DataSelectPagination;
use crate::shared::components::data_select_sort_header::DataSelectSortHeader;
use crate::shared::data_select::{use_data_select, HttpListResource};

const DATA_SELECT_ID: &str = "pod-list";

#[component]
pub fn PodListPage(
    /// Backend base URL
    #[prop(into)]
    api_base: String,
) -> impl IntoView {
    let data_select = use_data_select();
    data_select.sync_location();
    data_select.ensure_registered(DATA_SELECT_ID);

    let resource = HttpListResource::<PodList>::new(api_base, "pod");
    let list = RwSignal::new(PodList::default());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_loaded = Callback::new(move |pods: PodList| {
        set_error.set(None);
        list.set(pods);
    });
    let on_error = Callback::new(move |e: String| set_error.set(Some(e)));

    // Initial load of the remembered page, filtered by the route.
    match data_select.reload(&resource, DATA_SELECT_ID) {
        Ok(pending) => spawn_local(async move {
            match pending.await {
                Ok(pods) => on_loaded.run(pods),
                Err(e) => on_error.run(format!("Failed to load pods: {}", e)),
            }
        }),
        Err(e) => on_error.run(e.to_string()),
    }

    let current_sort = RwSignal::new(data_select.displayed_sort(DATA_SELECT_ID));
    let show_namespace = data_select.is_all_namespaces();

    let name_resource = resource.clone();
    let status_resource = resource.clone();
    let age_resource = resource.clone();
    let total_count = Signal::derive(move || list.with(|l| l.list_meta.total_items));

    view! {
        <div class="page">
            <div class="page__header">
                <h1 class="page__title">"Pods"</h1>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <DataSelectSortHeader
                            data_select_id=DATA_SELECT_ID
                            resource=name_resource
                            label="Name"
                            property=sortable_properties::NAME
                            current_sort=current_sort
                            on_loaded=on_loaded
                            on_error=on_error
                        />
                        {show_namespace
                            .then(|| view! { <TableHeaderCell>"Namespace"</TableHeaderCell> })}
                        <DataSelectSortHeader
                            data_select_id=DATA_SELECT_ID
                            resource=status_resource
                            label="Status"
                            property=sortable_properties::STATUS
                            current_sort=current_sort
                            on_loaded=on_loaded
                            on_error=on_error
                        />
                        <TableHeaderCell>"Restarts"</TableHeaderCell>
                        <DataSelectSortHeader
                            data_select_id=DATA_SELECT_ID
                            resource=age_resource
                            label="Age"
                            property=sortable_properties::AGE
                            current_sort=current_sort
                            on_loaded=on_loaded
                            on_error=on_error
                        />
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        list.with(|l| {
                            l.pods
                                .iter()
                                .map(|pod| {
                                    let meta = pod.object_meta.clone();
                                    let status = pod.pod_status.clone();
                                    let restarts = pod.restart_count;
                                    view! {
                                        <TableRow>
                                            <TableCell>{meta.name}</TableCell>
                                            {show_namespace
                                                .then(|| view! { <TableCell>{meta.namespace}</TableCell> })}
                                            <TableCell>{status}</TableCell>
                                            <TableCell>{restarts}</TableCell>
                                            <TableCell>{meta.creation_timestamp}</TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </TableBody>
            </Table>

            <DataSelectPagination
                data_select_id=DATA_SELECT_ID
                resource=resource
                total_count=total_count
                on_loaded=on_loaded
                on_error=on_error
            />
        </div>
    }
}
